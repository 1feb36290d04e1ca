//! The embedding API.
//!
//! An [`Engine`] owns the shared knowledge base and the session registry.
//! Reads take short-lived `RwLock` read guards - never held across template
//! evaluation - and writer operations (`learn`/`learnf`, `<list>`
//! mutations, loading) take short-lived write guards, so concurrent turns
//! on distinct sessions observe either the pre- or post-write state, never
//! a partial one. Turns on one session serialize on that session's mutex.
//!
//! ## One turn
//!
//! ```text
//! process_input(utterance, session)
//!   ├─ requests.push(utterance)
//!   ├─ normalize(utterance)
//!   ├─ select best category under (pattern, that, topic)
//!   ├─ evaluate its template with the bound wildcards
//!   └─ responses.push(result)  (that ring mirrors it)
//! ```
//!
//! No match is not an error: the turn resolves to the empty string.

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use rustc_hash::FxHashMap;

use golem_data::{KnowledgeBase, Session};
use golem_language::aiml;
use golem_language::markup::{parse_fragment, Node};
use golem_language::matcher::{self, split_words, Axis, Bindings};
use golem_language::normalize::normalize;
use golem_system::{
    files_with_extension, load_list_file, load_map_file, load_set_file, load_properties_file,
    read_file, LearnfSink,
};

use crate::config::EngineConfig;
use crate::diagnostic::{Diagnostic, LoadReport};
use crate::error::EngineError;
use crate::eval::Evaluator;

/// Shared handle to one conversation's state.
pub type SessionRef = Arc<Mutex<Session>>;

/// The conversational rule engine.
pub struct Engine {
    kb: RwLock<KnowledgeBase>,
    sessions: RwLock<FxHashMap<String, SessionRef>>,
    config: EngineConfig,
    learn_sink: Option<Box<dyn LearnfSink>>,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            kb: RwLock::new(KnowledgeBase::new()),
            sessions: RwLock::new(FxHashMap::default()),
            config,
            learn_sink: None,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Install the persistence callback `<learnf>` writes through.
    pub fn set_learnf_sink(&mut self, sink: Box<dyn LearnfSink>) {
        self.learn_sink = Some(sink);
    }

    pub(crate) fn learn_sink(&self) -> Option<&dyn LearnfSink> {
        self.learn_sink.as_deref()
    }

    pub(crate) fn kb_read(&self) -> RwLockReadGuard<'_, KnowledgeBase> {
        self.kb.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn kb_write(&self) -> RwLockWriteGuard<'_, KnowledgeBase> {
        self.kb.write().unwrap_or_else(PoisonError::into_inner)
    }

    // ------------------------------------------------------------------
    // Loading
    // ------------------------------------------------------------------

    /// Load AIML from an in-memory document.
    pub fn load_aiml_from_string(&self, xml: &str) -> Result<LoadReport, EngineError> {
        self.load_aiml_source(xml, "<string>")
    }

    /// Load one AIML file.
    pub fn load_aiml(&self, path: impl AsRef<Path>) -> Result<LoadReport, EngineError> {
        let path = path.as_ref();
        let xml = read_file(path)?;
        self.load_aiml_source(&xml, &path.display().to_string())
    }

    /// Load every `.aiml` file in a directory. A file that fails whole-
    /// document validation is reported and skipped; the rest still load.
    pub fn load_aiml_from_directory(&self, dir: impl AsRef<Path>) -> Result<LoadReport, EngineError> {
        let mut report = LoadReport::default();
        for path in files_with_extension(dir.as_ref(), "aiml")? {
            match self.load_aiml(&path) {
                Ok(file_report) => report.merge(file_report),
                Err(e) => {
                    log::warn!("{}", e);
                    report.rejected.push(Diagnostic {
                        source: path.display().to_string(),
                        detail: e.to_string(),
                    });
                }
            }
        }
        Ok(report)
    }

    fn load_aiml_source(&self, xml: &str, source_name: &str) -> Result<LoadReport, EngineError> {
        let doc = aiml::parse_document(xml).map_err(|error| EngineError::Document {
            source_name: source_name.to_string(),
            error,
        })?;

        let mut report = LoadReport::default();
        let mut kb = self.kb_write();
        for raw in &doc.categories {
            match kb.add_category(raw) {
                Ok(_) => report.loaded += 1,
                Err(e) => {
                    log::warn!("{}: rejected category: {}", source_name, e);
                    report.rejected.push(Diagnostic {
                        source: source_name.to_string(),
                        detail: e.to_string(),
                    });
                }
            }
        }
        Ok(report)
    }

    pub fn load_map(&self, path: impl AsRef<Path>) -> Result<(), EngineError> {
        let (name, entries) = load_map_file(path.as_ref())?;
        self.kb_write().add_map(&name, entries);
        Ok(())
    }

    pub fn load_set(&self, path: impl AsRef<Path>) -> Result<(), EngineError> {
        let (name, members) = load_set_file(path.as_ref())?;
        self.kb_write().add_set(&name, members);
        Ok(())
    }

    pub fn load_list(&self, path: impl AsRef<Path>) -> Result<(), EngineError> {
        let (name, items) = load_list_file(path.as_ref())?;
        self.kb_write().add_list(&name, items);
        Ok(())
    }

    pub fn load_maps_from_directory(&self, dir: impl AsRef<Path>) -> Result<LoadReport, EngineError> {
        self.load_collection_dir(dir.as_ref(), |engine, path| engine.load_map(path))
    }

    pub fn load_sets_from_directory(&self, dir: impl AsRef<Path>) -> Result<LoadReport, EngineError> {
        self.load_collection_dir(dir.as_ref(), |engine, path| engine.load_set(path))
    }

    pub fn load_lists_from_directory(&self, dir: impl AsRef<Path>) -> Result<LoadReport, EngineError> {
        self.load_collection_dir(dir.as_ref(), |engine, path| engine.load_list(path))
    }

    fn load_collection_dir(
        &self,
        dir: &Path,
        load: impl Fn(&Self, &Path) -> Result<(), EngineError>,
    ) -> Result<LoadReport, EngineError> {
        let mut report = LoadReport::default();
        for path in files_with_extension(dir, "json")? {
            match load(self, &path) {
                Ok(()) => report.loaded += 1,
                Err(e) => {
                    log::warn!("{}", e);
                    report.rejected.push(Diagnostic {
                        source: path.display().to_string(),
                        detail: e.to_string(),
                    });
                }
            }
        }
        Ok(report)
    }

    /// Load bot properties from a `key=value` file.
    pub fn load_properties(&self, path: impl AsRef<Path>) -> Result<(), EngineError> {
        let props = load_properties_file(path.as_ref())?;
        let mut kb = self.kb_write();
        for (key, value) in props {
            kb.set_property(key, value);
        }
        Ok(())
    }

    /// Set one bot property directly.
    pub fn set_property(&self, name: &str, value: &str) {
        self.kb_write().set_property(name, value);
    }

    pub fn property(&self, name: &str) -> Option<String> {
        self.kb_read().property(name).map(str::to_string)
    }

    /// Set one process-global variable directly.
    pub fn set_global(&self, name: &str, value: &str) {
        self.kb_write().set_global(name, value);
    }

    /// Install a set without going through a file.
    pub fn add_set<I, S>(&self, name: &str, members: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.kb_write()
            .add_set(name, members.into_iter().map(Into::into));
    }

    /// Install a map without going through a file.
    pub fn add_map<I, K, V>(&self, name: &str, entries: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.kb_write().add_map(
            name,
            entries.into_iter().map(|(k, v)| (k.into(), v.into())),
        );
    }

    /// Install a list without going through a file.
    pub fn add_list<I, S>(&self, name: &str, items: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.kb_write()
            .add_list(name, items.into_iter().map(Into::into).collect());
    }

    // ------------------------------------------------------------------
    // Sessions
    // ------------------------------------------------------------------

    /// Create (or return the existing) session for an id.
    pub fn create_session(&self, id: &str) -> SessionRef {
        let mut sessions = self
            .sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        sessions
            .entry(id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(Session::new(id, self.config.history_limit))))
            .clone()
    }

    pub fn get_session(&self, id: &str) -> Option<SessionRef> {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()
    }

    /// Drop a session; returns whether it existed.
    pub fn delete_session(&self, id: &str) -> bool {
        self.sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(id)
            .is_some()
    }

    // ------------------------------------------------------------------
    // Turns
    // ------------------------------------------------------------------

    /// Process one conversational turn.
    pub fn process_input(&self, input: &str, session: &SessionRef) -> Result<String, EngineError> {
        let mut session = lock_session(session);
        session.requests.push(input.trim());

        let normalized = normalize(input);
        let response = match self.select(&normalized, &session) {
            Some((template, bindings)) => {
                let mut evaluator = Evaluator::new(self, &mut session, bindings, 0);
                evaluator.eval(&template).trim().to_string()
            }
            None => String::new(),
        };

        session.responses.push(response.as_str());
        session.that.push(response.as_str());
        Ok(response)
    }

    /// Test hook: evaluate a template against a throwaway session.
    pub fn process_template(&self, template: &str, wildcards: &[(&str, &str)]) -> String {
        let mut session = Session::new("", self.config.history_limit);
        self.eval_template(template, wildcards, &mut session)
    }

    /// Evaluate a template against an existing session.
    pub fn process_template_with_session(
        &self,
        template: &str,
        wildcards: &[(&str, &str)],
        session: &SessionRef,
    ) -> String {
        let mut session = lock_session(session);
        self.eval_template(template, wildcards, &mut session)
    }

    fn eval_template(
        &self,
        template: &str,
        wildcards: &[(&str, &str)],
        session: &mut Session,
    ) -> String {
        let nodes = match parse_fragment(template) {
            Ok(nodes) => nodes,
            Err(e) => {
                log::warn!("unparseable template: {}", e);
                return template.to_string();
            }
        };
        let bindings: Bindings = wildcards
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Evaluator::new(self, session, bindings, 0)
            .eval(&nodes)
            .trim()
            .to_string()
    }

    /// Select the best category for a normalized input under the session's
    /// that/topic context. Returns a cloned template plus merged bindings so
    /// no lock is held during evaluation.
    pub(crate) fn select(&self, input: &str, session: &Session) -> Option<(Vec<Node>, Bindings)> {
        let kb = self.kb_read();
        let input_words = split_words(input);

        let that_text = normalize(session.that.get(1));
        let that_words = split_words(&that_text);
        let topic_text = normalize(&session.topic);
        let topic_words = split_words(&topic_text);

        for category in kb.candidates() {
            let Some(mut bindings) =
                matcher::bind(&category.pattern, &input_words, Axis::Pattern, &*kb)
            else {
                continue;
            };
            if let Some(that_pattern) = &category.that {
                match matcher::bind(that_pattern, &that_words, Axis::That, &*kb) {
                    Some(extra) => bindings.extend(extra),
                    None => continue,
                }
            }
            if let Some(topic_pattern) = &category.topic {
                match matcher::bind(topic_pattern, &topic_words, Axis::Topic, &*kb) {
                    Some(extra) => bindings.extend(extra),
                    None => continue,
                }
            }
            return Some((category.template.clone(), bindings));
        }
        None
    }
}

fn lock_session(session: &SessionRef) -> MutexGuard<'_, Session> {
    session.lock().unwrap_or_else(PoisonError::into_inner)
}
