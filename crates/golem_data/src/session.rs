//! Per-conversation state: topic, variables, and three bounded history
//! rings.
//!
//! The rings grow on the right and evict from the left once the capacity is
//! reached. Tags index them 1-based where 1 is the most recent entry; an
//! index at or below zero clamps to 1, and an index past the stored history
//! yields the empty string (the "no history" sentinel).

use std::collections::VecDeque;

use rustc_hash::FxHashMap;

/// A bounded FIFO of strings with most-recent-first indexing.
#[derive(Debug, Clone)]
pub struct HistoryRing {
    items: VecDeque<String>,
    capacity: usize,
}

impl HistoryRing {
    pub fn new(capacity: usize) -> Self {
        Self {
            items: VecDeque::with_capacity(capacity.min(64)),
            capacity,
        }
    }

    /// Append on the right, evicting the oldest entry when full.
    pub fn push(&mut self, value: impl Into<String>) {
        if self.capacity == 0 {
            return;
        }
        if self.items.len() == self.capacity {
            self.items.pop_front();
        }
        self.items.push_back(value.into());
    }

    /// 1-based most-recent-first lookup; clamps low indices, returns ""
    /// past the end.
    pub fn get(&self, index: i64) -> &str {
        let index = index.max(1) as usize;
        if index > self.items.len() {
            return "";
        }
        &self.items[self.items.len() - index]
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// One conversation's mutable state.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: String,
    pub topic: String,
    pub variables: FxHashMap<String, String>,
    /// Topic-scoped bindings keyed by (topic, name); a topic switch hides
    /// them without deleting anything.
    topic_variables: FxHashMap<(String, String), String>,
    pub requests: HistoryRing,
    pub responses: HistoryRing,
    pub that: HistoryRing,
}

impl Session {
    pub fn new(id: impl Into<String>, history_limit: usize) -> Self {
        Self {
            id: id.into(),
            topic: String::new(),
            variables: FxHashMap::default(),
            topic_variables: FxHashMap::default(),
            requests: HistoryRing::new(history_limit),
            responses: HistoryRing::new(history_limit),
            that: HistoryRing::new(history_limit),
        }
    }

    /// Topic-scoped read under the current topic.
    pub fn topic_var(&self, name: &str) -> Option<&str> {
        self.topic_variables
            .get(&(self.topic.clone(), name.to_string()))
            .map(String::as_str)
    }

    /// Topic-scoped write under the current topic.
    pub fn set_topic_var(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.topic_variables
            .insert((self.topic.clone(), name.into()), value.into());
    }
}
