//! The shared knowledge base.
//!
//! Holds the ordered category sequence with its triple index and match
//! order, the bot's read-only properties, process-global variables, and the
//! external collections (sets, maps, lists) templates consult.
//!
//! The triple index is a deterministic function of the category sequence:
//! loading the same files in the same order always produces the same match
//! behavior, and a duplicate (pattern, that, topic) triple replaces the
//! earlier category's template in place.

use rustc_hash::{FxHashMap, FxHashSet};

use golem_language::matcher::SetMembership;
use golem_language::{PatternError, RawCategory};

use crate::category::Category;

/// Outcome of installing one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    /// An existing category had the same (pattern, that, topic) triple; its
    /// template was replaced and its declaration slot kept.
    Replaced,
}

#[derive(Debug, Default, Clone)]
struct SetCollection {
    /// Members in first-occurrence order, stored uppercase.
    members: Vec<String>,
    index: FxHashSet<String>,
}

#[derive(Debug, Default, Clone)]
struct MapCollection {
    entries: Vec<(String, String)>,
    /// Uppercased key → value for case-insensitive lookup.
    index: FxHashMap<String, String>,
}

/// Categories, properties, globals, and external collections.
#[derive(Debug, Default)]
pub struct KnowledgeBase {
    categories: Vec<Category>,
    /// (pattern, that, topic) → slot in `categories`.
    index: FxHashMap<(String, String, String), usize>,
    /// Slots sorted by descending priority, then declaration order.
    match_order: Vec<usize>,
    properties: FxHashMap<String, String>,
    variables: FxHashMap<String, String>,
    sets: FxHashMap<String, SetCollection>,
    maps: FxHashMap<String, MapCollection>,
    lists: FxHashMap<String, Vec<String>>,
    next_seq: u64,
}

impl KnowledgeBase {
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------
    // Categories
    // ------------------------------------------------------------------

    /// Compile and install one category. A duplicate triple replaces the
    /// existing template; otherwise the category is appended and spliced
    /// into the match order.
    pub fn add_category(&mut self, raw: &RawCategory) -> Result<AddOutcome, PatternError> {
        let seq = self.next_seq;
        let category = Category::compile(raw, seq)?;
        let key = category.key();

        if let Some(&slot) = self.index.get(&key) {
            self.categories[slot].template = category.template;
            return Ok(AddOutcome::Replaced);
        }

        self.next_seq += 1;
        let slot = self.categories.len();
        let new_key = order_key(&category);
        self.categories.push(category);
        self.index.insert(key, slot);

        let at = match self
            .match_order
            .binary_search_by_key(&new_key, |&s| order_key(&self.categories[s]))
        {
            Ok(i) | Err(i) => i,
        };
        self.match_order.insert(at, slot);
        Ok(AddOutcome::Added)
    }

    /// All categories in declaration order.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Categories in match order: descending priority, ties by declaration.
    pub fn candidates(&self) -> impl Iterator<Item = &Category> {
        self.match_order.iter().map(|&s| &self.categories[s])
    }

    // ------------------------------------------------------------------
    // Properties and global variables
    // ------------------------------------------------------------------

    /// Bot identity lookup; `None` when the property is unset.
    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(String::as_str)
    }

    pub fn set_property(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.properties.insert(name.into(), value.into());
    }

    pub fn global(&self, name: &str) -> Option<&str> {
        self.variables.get(name).map(String::as_str)
    }

    pub fn set_global(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.variables.insert(name.into(), value.into());
    }

    // ------------------------------------------------------------------
    // Sets
    // ------------------------------------------------------------------

    /// Install a set; members are uppercased and deduplicated, keeping
    /// first-occurrence order.
    pub fn add_set(&mut self, name: &str, members: impl IntoIterator<Item = String>) {
        let mut set = SetCollection::default();
        for member in members {
            let upper = member.trim().to_uppercase();
            if !upper.is_empty() && set.index.insert(upper.clone()) {
                set.members.push(upper);
            }
        }
        self.sets.insert(name.to_lowercase(), set);
    }

    pub fn set_members(&self, name: &str) -> Option<&[String]> {
        self.sets
            .get(&name.to_lowercase())
            .map(|s| s.members.as_slice())
    }

    // ------------------------------------------------------------------
    // Maps
    // ------------------------------------------------------------------

    pub fn add_map(&mut self, name: &str, entries: impl IntoIterator<Item = (String, String)>) {
        let mut map = MapCollection::default();
        for (key, value) in entries {
            map.index.insert(key.trim().to_uppercase(), value.clone());
            map.entries.push((key, value));
        }
        self.maps.insert(name.to_lowercase(), map);
    }

    /// Case-insensitive map lookup. `None` when the map or key is absent;
    /// the key-passthrough fallback belongs to the `<map>` tag, not here.
    pub fn map_lookup(&self, name: &str, key: &str) -> Option<&str> {
        self.maps
            .get(&name.to_lowercase())?
            .index
            .get(&key.trim().to_uppercase())
            .map(String::as_str)
    }

    // ------------------------------------------------------------------
    // Lists
    // ------------------------------------------------------------------

    pub fn add_list(&mut self, name: &str, items: Vec<String>) {
        self.lists.insert(name.to_lowercase(), items);
    }

    /// Append to a list, creating it on first use.
    pub fn list_push(&mut self, name: &str, value: impl Into<String>) {
        self.lists
            .entry(name.to_lowercase())
            .or_default()
            .push(value.into());
    }

    pub fn list_clear(&mut self, name: &str) {
        if let Some(list) = self.lists.get_mut(&name.to_lowercase()) {
            list.clear();
        }
    }

    pub fn list_items(&self, name: &str) -> Option<&[String]> {
        self.lists.get(&name.to_lowercase()).map(Vec::as_slice)
    }
}

/// Sort key for the match order: highest priority first, then oldest.
fn order_key(category: &Category) -> (std::cmp::Reverse<u32>, u64) {
    (std::cmp::Reverse(category.pattern.priority()), category.seq)
}

impl SetMembership for KnowledgeBase {
    fn set_contains(&self, set: &str, word: &str) -> bool {
        self.sets
            .get(&set.to_lowercase())
            .map(|s| s.index.contains(&word.trim().to_uppercase()))
            .unwrap_or(false)
    }
}
