//! Four-scope variable resolution.
//!
//! Reads walk Local → Session → Global → Properties and return the first
//! non-empty binding; a miss is the empty string, never an error. Writes are
//! routed by the caller (the evaluator owns the mutable references); this
//! module only fixes the scope vocabulary and the read order.
//!
//! Topic is a Session sub-scope: bindings written while a topic is current
//! are keyed by (topic, name), so switching topics hides them without
//! deleting them. They take precedence over plain session variables while
//! their topic is current.

use rustc_hash::FxHashMap;

use crate::knowledge::KnowledgeBase;
use crate::session::Session;

/// Where a variable read or write is addressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Local,
    Session,
    Topic,
    Global,
    Properties,
}

impl Scope {
    /// Parse a `scope` attribute value. Unknown names get the default
    /// (session) at the tag layer, so this is a plain `Option`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "local" => Some(Scope::Local),
            "session" => Some(Scope::Session),
            "topic" => Some(Scope::Topic),
            "global" => Some(Scope::Global),
            "properties" | "bot" => Some(Scope::Properties),
            _ => None,
        }
    }
}

/// Resolve a name across all four scopes; "" when nothing non-empty binds.
pub fn resolve(
    name: &str,
    locals: &FxHashMap<String, String>,
    session: &Session,
    kb: &KnowledgeBase,
) -> String {
    let candidates = [
        locals.get(name).map(String::as_str),
        session.topic_var(name),
        session.variables.get(name).map(String::as_str),
        kb.global(name),
        kb.property(name),
    ];
    candidates
        .into_iter()
        .flatten()
        .find(|v| !v.is_empty())
        .unwrap_or("")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixtures() -> (FxHashMap<String, String>, Session, KnowledgeBase) {
        (FxHashMap::default(), Session::new("s", 15), KnowledgeBase::new())
    }

    #[test]
    fn local_wins_over_session() {
        let (mut locals, mut session, kb) = fixtures();
        session.variables.insert("x".into(), "session".into());
        locals.insert("x".into(), "local".into());
        assert_eq!(resolve("x", &locals, &session, &kb), "local");
    }

    #[test]
    fn empty_bindings_fall_through() {
        let (mut locals, session, mut kb) = fixtures();
        locals.insert("x".into(), String::new());
        kb.set_global("x", "global");
        assert_eq!(resolve("x", &locals, &session, &kb), "global");
    }

    #[test]
    fn properties_are_last() {
        let (locals, session, mut kb) = fixtures();
        kb.set_property("name", "Golem");
        assert_eq!(resolve("name", &locals, &session, &kb), "Golem");
    }

    #[test]
    fn miss_is_empty_string() {
        let (locals, session, kb) = fixtures();
        assert_eq!(resolve("missing", &locals, &session, &kb), "");
    }

    #[test]
    fn topic_binding_precedes_plain_session() {
        let (locals, mut session, kb) = fixtures();
        session.variables.insert("mood".into(), "flat".into());
        session.topic = "GAMES".into();
        session.set_topic_var("mood", "excited");
        assert_eq!(resolve("mood", &locals, &session, &kb), "excited");

        session.topic = String::new();
        assert_eq!(resolve("mood", &locals, &session, &kb), "flat");
    }

    #[test]
    fn scope_names_parse() {
        assert_eq!(Scope::from_name("Global"), Some(Scope::Global));
        assert_eq!(Scope::from_name("properties"), Some(Scope::Properties));
        assert_eq!(Scope::from_name("nonsense"), None);
    }
}
