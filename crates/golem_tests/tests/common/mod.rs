//! E2E test harness.
//!
//! Builds engines from inline category fragments and asserts on full
//! conversational turns.
#![allow(dead_code)]

use golem_engine::{Engine, SessionRef};

/// Engine loaded with the given `<category>` fragments.
pub fn engine_with(categories_xml: &str) -> Engine {
    let engine = Engine::new();
    let doc = format!(r#"<aiml version="2.0">{}</aiml>"#, categories_xml);
    let report = engine
        .load_aiml_from_string(&doc)
        .expect("test knowledge base must load");
    assert!(
        report.rejected.is_empty(),
        "test categories rejected: {:?}",
        report.rejected
    );
    engine
}

/// One turn, unwrapped.
pub fn reply(engine: &Engine, session: &SessionRef, input: &str) -> String {
    engine
        .process_input(input, session)
        .expect("process_input must not error")
}

/// One turn with an expected exact response.
pub fn assert_reply(engine: &Engine, session: &SessionRef, input: &str, expected: &str) {
    assert_eq!(reply(engine, session, input), expected, "input: {:?}", input);
}
