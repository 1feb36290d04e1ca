//! The template evaluator: a single dispatching tree walk.
//!
//! One [`Evaluator`] exists per template evaluation. It owns the wildcard
//! bindings of the match that selected the template, a fresh local-variable
//! frame, and the SRAI recursion depth. Children evaluate before their
//! parent applies its transformation, with four deliberate exceptions that
//! consume raw children:
//!
//! - `<think>` evaluates children but discards the output;
//! - `<random>` picks one `<li>` *before* evaluating it;
//! - `<learn>`/`<learnf>` forward their children literally, evaluating only
//!   `<eval>` regions (and `<star>` references) at learn time.
//!
//! Failure semantics: unknown tags re-serialize verbatim, missing variables
//! and properties yield "", `<map>` falls through to its key, and SRAI past
//! the depth cap returns its raw input. Nothing here returns an error - a
//! template always renders to a string.

use rustc_hash::FxHashMap;

use golem_data::{resolve, Scope, Session};
use golem_language::aiml::categories_from_nodes;
use golem_language::markup::{serialize, serialize_node, Element, Node};
use golem_language::matcher::Bindings;
use golem_language::normalize::normalize;
use rand::seq::SliceRandom;

use crate::datetime::{format_date, format_time};
use crate::engine::Engine;
use crate::transforms;

pub(crate) struct Evaluator<'a> {
    engine: &'a Engine,
    session: &'a mut Session,
    wildcards: Bindings,
    locals: FxHashMap<String, String>,
    depth: usize,
}

impl<'a> Evaluator<'a> {
    pub(crate) fn new(
        engine: &'a Engine,
        session: &'a mut Session,
        wildcards: Bindings,
        depth: usize,
    ) -> Self {
        Self {
            engine,
            session,
            wildcards,
            locals: FxHashMap::default(),
            depth,
        }
    }

    pub(crate) fn eval(&mut self, nodes: &[Node]) -> String {
        let mut out = String::new();
        for node in nodes {
            match node {
                Node::Text(text) => out.push_str(text),
                Node::Raw(raw) => out.push_str(raw),
                Node::Element(el) => out.push_str(&self.eval_element(el)),
            }
        }
        out
    }

    fn eval_element(&mut self, el: &Element) -> String {
        match el.name.as_str() {
            // Wildcards and history ------------------------------------
            "star" => self.star_value(el),
            "sr" => {
                let star = self.wildcards.get("star1").cloned().unwrap_or_default();
                self.srai(&star)
            }
            "srai" => {
                let input = self.eval(&el.children);
                self.srai(&input)
            }
            "that" => self.session.responses.get(attr_index(el)).to_string(),
            "input" => self.session.requests.get(1).to_string(),
            "repeat" => self.session.requests.get(1).to_string(),
            "request" => self.session.requests.get(attr_index(el)).to_string(),
            "response" => self.session.responses.get(attr_index(el)).to_string(),
            "topic" => self.session.topic.clone(),

            // Variables ------------------------------------------------
            "get" => self.get_value(el),
            "set" => self.set_value(el),
            "bot" => match el.attr("name") {
                Some(name) => self
                    .engine
                    .kb_read()
                    .property(name)
                    .unwrap_or_default()
                    .to_string(),
                None => String::new(),
            },

            // Control --------------------------------------------------
            "think" => {
                self.eval(&el.children);
                String::new()
            }
            "condition" => self.condition(el),
            "random" => self.random(el),
            "eval" => self.eval(&el.children),

            // Collections ----------------------------------------------
            "map" => self.map_lookup(el),
            "list" => self.list_op(el),

            // Learning -------------------------------------------------
            "learn" => self.learn(el, false),
            "learnf" => self.learn(el, true),

            // Date and time --------------------------------------------
            "date" => format_date(self.engine.config().now(), el.attr("format")),
            "time" => format_time(self.engine.config().now(), el.attr("format")),

            // Text transforms ------------------------------------------
            "person" => transforms::person(&self.eval(&el.children)),
            "gender" => transforms::gender(&self.eval(&el.children)),
            "uppercase" => transforms::uppercase(&self.eval(&el.children)),
            "lowercase" => transforms::lowercase(&self.eval(&el.children)),
            "formal" => transforms::formal(&self.eval(&el.children)),
            "sentence" => transforms::sentence(&self.eval(&el.children)),
            "word" => transforms::word(&self.eval(&el.children)),
            "capitalize" => transforms::capitalize(&self.eval(&el.children)),
            "explode" => transforms::explode(&self.eval(&el.children)),
            "reverse" => transforms::reverse(&self.eval(&el.children)),
            "acronym" => transforms::acronym(&self.eval(&el.children)),
            "trim" => transforms::trim(&self.eval(&el.children)),
            "first" => transforms::first(&self.eval(&el.children)),
            "rest" => transforms::rest(&self.eval(&el.children)),
            "pluralize" => transforms::pluralize(&self.eval(&el.children)),
            "shuffle" => transforms::shuffle(&self.eval(&el.children)),
            "length" => transforms::length(&self.eval(&el.children)),
            "indent" => transforms::indent(&self.eval(&el.children)),
            "dedent" => transforms::dedent(&self.eval(&el.children)),
            "substring" => {
                let inner = self.eval(&el.children);
                transforms::substring(&inner, attr_usize(el, "start"), attr_usize(el, "end"))
            }
            "replace" => {
                let inner = self.eval(&el.children);
                transforms::replace(
                    &inner,
                    el.attr("search").unwrap_or_default(),
                    el.attr("replace").unwrap_or_default(),
                )
            }
            "count" => {
                let inner = self.eval(&el.children);
                transforms::count(&inner, el.attr("search").unwrap_or_default())
            }
            "split" => {
                let inner = self.eval(&el.children);
                transforms::split(&inner, el.attr("delimiter"))
            }
            "join" => {
                let inner = self.eval(&el.children);
                transforms::join(&inner, el.attr("delimiter"))
            }
            "unique" => {
                let inner = self.eval(&el.children);
                transforms::unique(&inner, el.attr("delimiter"))
            }

            // Bound context captures (that_star1, topic_star1, ...) ----
            name if self.wildcards.contains_key(name) => self.wildcards[name].clone(),

            // Unknown tags pass through verbatim -----------------------
            _ => {
                let mut out = String::new();
                serialize_node(&Node::Element(el.clone()), &mut out);
                out
            }
        }
    }

    // ----------------------------------------------------------------
    // Wildcards
    // ----------------------------------------------------------------

    fn star_value(&self, el: &Element) -> String {
        let index = attr_index(el).max(1);
        self.wildcards
            .get(&format!("star{}", index))
            .cloned()
            .unwrap_or_default()
    }

    // ----------------------------------------------------------------
    // SRAI
    // ----------------------------------------------------------------

    /// Recursively match and evaluate. Depth cap exceeded or no match both
    /// fall through with the raw input.
    fn srai(&mut self, input: &str) -> String {
        if self.depth + 1 > self.engine.config().srai_depth_limit {
            return input.to_string();
        }
        let normalized = normalize(input);
        match self.engine.select(&normalized, self.session) {
            Some((template, bindings)) => {
                let mut sub = Evaluator {
                    engine: self.engine,
                    session: &mut *self.session,
                    wildcards: bindings,
                    locals: FxHashMap::default(),
                    depth: self.depth + 1,
                };
                sub.eval(&template)
            }
            None => input.to_string(),
        }
    }

    // ----------------------------------------------------------------
    // Variables
    // ----------------------------------------------------------------

    fn get_value(&mut self, el: &Element) -> String {
        if let Some(var) = el.attr("var") {
            return self.locals.get(var).cloned().unwrap_or_default();
        }
        match el.attr("name") {
            Some(name) if name.eq_ignore_ascii_case("topic") => self.session.topic.clone(),
            Some(name) => resolve(name, &self.locals, self.session, &self.engine.kb_read()),
            None => String::new(),
        }
    }

    fn set_value(&mut self, el: &Element) -> String {
        let value = self.eval(&el.children);

        if let Some(var) = el.attr("var") {
            self.locals.insert(var.to_string(), value.clone());
            return value;
        }
        let Some(name) = el.attr("name") else {
            return value;
        };
        let scope = el
            .attr("scope")
            .and_then(Scope::from_name)
            .unwrap_or(Scope::Session);
        // The "topic" predicate is the session topic itself.
        if name.eq_ignore_ascii_case("topic") && scope == Scope::Session {
            self.session.topic = value.clone();
            return value;
        }
        match scope {
            Scope::Local => {
                self.locals.insert(name.to_string(), value.clone());
            }
            Scope::Session => {
                self.session
                    .variables
                    .insert(name.to_string(), value.clone());
            }
            Scope::Topic => self.session.set_topic_var(name, value.clone()),
            Scope::Global => self.engine.kb_write().set_global(name, value.clone()),
            Scope::Properties => {
                log::warn!("ignored write to read-only properties scope: {}", name);
            }
        }
        value
    }

    // ----------------------------------------------------------------
    // Control
    // ----------------------------------------------------------------

    fn condition(&mut self, el: &Element) -> String {
        let resolved = self.resolve_condition_subject(el);

        if let Some(expected) = el.attr("value") {
            return if resolved == expected {
                self.eval(&el.children)
            } else {
                String::new()
            };
        }

        // List form: first matching <li value>, default <li> as fallback.
        let mut default = None;
        for li in el.child_elements().filter(|c| c.name == "li") {
            match li.attr("value") {
                Some(expected) if resolved == expected => return self.eval(&li.children),
                None if default.is_none() => default = Some(li),
                _ => {}
            }
        }
        default
            .map(|li| self.eval(&li.children))
            .unwrap_or_default()
    }

    fn resolve_condition_subject(&mut self, el: &Element) -> String {
        if let Some(var) = el.attr("var") {
            return self.locals.get(var).cloned().unwrap_or_default();
        }
        match el.attr("name") {
            Some(name) => resolve(name, &self.locals, self.session, &self.engine.kb_read()),
            None => String::new(),
        }
    }

    /// Pick one `<li>` uniformly at random before evaluating it.
    fn random(&mut self, el: &Element) -> String {
        let lis: Vec<&Element> = el.child_elements().filter(|c| c.name == "li").collect();
        match lis.choose(&mut rand::thread_rng()) {
            Some(li) => self.eval(&li.children),
            None => serialize(&el.children),
        }
    }

    // ----------------------------------------------------------------
    // Collections
    // ----------------------------------------------------------------

    fn map_lookup(&mut self, el: &Element) -> String {
        let key = self.eval(&el.children).trim().to_string();
        let Some(name) = el.attr("name") else {
            return key;
        };
        self.engine
            .kb_read()
            .map_lookup(name, &key)
            .map(str::to_string)
            .unwrap_or(key)
    }

    fn list_op(&mut self, el: &Element) -> String {
        let Some(name) = el.attr("name") else {
            return String::new();
        };
        let operation = el.attr("operation").unwrap_or("get").to_ascii_lowercase();
        let inner = self.eval(&el.children);

        match operation.as_str() {
            "add" => {
                self.engine.kb_write().list_push(name, inner.trim());
                String::new()
            }
            "clear" => {
                self.engine.kb_write().list_clear(name);
                String::new()
            }
            _ => {
                let kb = self.engine.kb_read();
                let Some(items) = kb.list_items(name) else {
                    return String::new();
                };
                match inner.trim().parse::<usize>() {
                    Ok(index) if index >= 1 && index <= items.len() => items[index - 1].clone(),
                    Ok(_) => String::new(),
                    Err(_) => items.join(", "),
                }
            }
        }
    }

    // ----------------------------------------------------------------
    // Learning
    // ----------------------------------------------------------------

    /// Install the `<category>` children. `<eval>` regions and `<star>`
    /// references are expanded now; everything else copies literally.
    fn learn(&mut self, el: &Element, persist: bool) -> String {
        let body = self.expand_learn_body(&el.children);
        self.engine.install_learned(&body, persist);
        String::new()
    }

    fn expand_learn_body(&mut self, nodes: &[Node]) -> Vec<Node> {
        nodes
            .iter()
            .map(|node| match node {
                Node::Element(el) if el.name == "eval" => Node::Text(self.eval(&el.children)),
                Node::Element(el) if el.name == "star" => Node::Text(self.star_value(el)),
                Node::Element(el) => Node::Element(Element {
                    name: el.name.clone(),
                    attrs: el.attrs.clone(),
                    children: self.expand_learn_body(&el.children),
                }),
                other => other.clone(),
            })
            .collect()
    }
}

/// Shared install path for `<learn>`/`<learnf>` bodies; failures are
/// reported and the turn proceeds.
impl Engine {
    pub(crate) fn install_learned(&self, nodes: &[Node], persist: bool) {
        let categories = match categories_from_nodes(nodes) {
            Ok(categories) => categories,
            Err(e) => {
                log::warn!("learn body rejected: {}", e);
                return;
            }
        };

        {
            let mut kb = self.kb_write();
            for raw in &categories {
                if let Err(e) = kb.add_category(raw) {
                    log::warn!("learned category rejected: {}", e);
                }
            }
        }

        if !persist {
            return;
        }
        let Some(sink) = self.learn_sink() else {
            return;
        };
        for node in nodes {
            if let Node::Element(el) = node {
                if el.name == "category" {
                    let mut xml = String::new();
                    serialize_node(node, &mut xml);
                    if let Err(e) = sink.persist(&xml) {
                        log::warn!("learnf persistence failed: {}", e);
                    }
                }
            }
        }
    }
}

fn attr_index(el: &Element) -> i64 {
    el.attr("index")
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(1)
}

fn attr_usize(el: &Element, name: &str) -> Option<usize> {
    el.attr(name).and_then(|v| v.trim().parse().ok())
}
