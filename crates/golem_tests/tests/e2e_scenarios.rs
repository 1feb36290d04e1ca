//! E2E: the canonical end-to-end conversations.
//!
//! Each test is one literal knowledge base / input / expected-response
//! triple exercised through the full pipeline.

mod common;

use common::{assert_reply, engine_with, reply};

#[test]
fn e2e_exact_match() {
    let engine = engine_with("<category><pattern>HELLO</pattern><template>Hi!</template></category>");
    let session = engine.create_session("s");
    assert_reply(&engine, &session, "Hello", "Hi!");
}

#[test]
fn e2e_star_capture() {
    let engine = engine_with(
        "<category><pattern>MY NAME IS *</pattern>\
         <template>Nice to meet you, <star/>!</template></category>",
    );
    let session = engine.create_session("s");
    assert_reply(&engine, &session, "my name is John", "Nice to meet you, JOHN!");
}

#[test]
fn e2e_bot_property() {
    let engine = engine_with(
        "<category><pattern>WHAT IS YOUR NAME</pattern>\
         <template>I am <bot name=\"name\"/>.</template></category>",
    );
    engine.set_property("name", "Golem");
    let session = engine.create_session("s");
    assert_reply(&engine, &session, "what is your name", "I am Golem.");
}

#[test]
fn e2e_srai_reduction() {
    let engine = engine_with(
        "<category><pattern>HELLO</pattern><template>Hi!</template></category>\
         <category><pattern>GREETING</pattern><template><srai>HELLO</srai></template></category>",
    );
    let session = engine.create_session("s");
    assert_reply(&engine, &session, "greeting", "Hi!");
}

#[test]
fn e2e_random_picks_a_candidate() {
    let engine = engine_with(
        "<category><pattern>GO</pattern>\
         <template><random><li>A</li><li>B</li></random></template></category>",
    );
    let session = engine.create_session("s");
    for _ in 0..20 {
        let out = reply(&engine, &session, "go");
        assert!(out == "A" || out == "B", "unexpected choice: {:?}", out);
    }
}

#[test]
fn e2e_set_membership_pattern() {
    let engine = engine_with(
        "<category><pattern>I AM <set>emotions</set></pattern>\
         <template>You feel <star/>.</template></category>",
    );
    engine.add_set("emotions", ["happy", "sad"]);
    let session = engine.create_session("s");
    assert_reply(&engine, &session, "i am happy", "You feel HAPPY.");
    assert_reply(&engine, &session, "i am angry", "");
}

#[test]
fn e2e_that_context_capture() {
    let engine = engine_with(
        "<category><pattern>ASK</pattern>\
         <template>DO YOU LIKE ACTION MOVIES</template></category>\
         <category><pattern>YES</pattern><that>DO YOU LIKE * MOVIES</that>\
         <template>I love <that_star1/></template></category>",
    );
    let session = engine.create_session("s");
    assert_reply(&engine, &session, "ask", "DO YOU LIKE ACTION MOVIES");
    assert_reply(&engine, &session, "yes", "I love ACTION");
}

#[test]
fn e2e_learnf_teaches_a_rule() {
    let engine = engine_with(
        "<category><pattern>TEACH * MEANS *</pattern>\
         <template><learnf><category><pattern><star/></pattern>\
         <template><star index=\"2\"/></template></category></learnf>ok</template></category>",
    );
    let session = engine.create_session("s");
    assert_reply(&engine, &session, "teach foo means bar", "ok");
    assert_reply(&engine, &session, "foo", "bar");
}
