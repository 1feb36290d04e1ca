//! E2E: template tag semantics through `process_template` and full turns.

mod common;

use common::{assert_reply, engine_with};
use golem_engine::Engine;

#[test]
fn e2e_get_set_session_scope() {
    let engine = engine_with(
        "<category><pattern>CALL ME *</pattern>\
         <template><think><set name=\"who\"><star/></set></think>Done.</template></category>\
         <category><pattern>WHO AM I</pattern>\
         <template>You are <get name=\"who\"/>.</template></category>",
    );
    let session = engine.create_session("s");
    assert_reply(&engine, &session, "call me Ishmael", "Done.");
    assert_reply(&engine, &session, "who am i", "You are ISHMAEL.");
}

#[test]
fn e2e_set_outside_think_echoes_value() {
    let engine = Engine::new();
    let out = engine.process_template("<set name=\"x\">visible</set>", &[]);
    assert_eq!(out, "visible");
}

#[test]
fn e2e_think_discards_output_but_keeps_effects() {
    let engine = engine_with(
        "<category><pattern>QUIET</pattern>\
         <template><think><set name=\"mood\">calm</set></think><get name=\"mood\"/></template></category>",
    );
    let session = engine.create_session("s");
    // Side effects inside think are visible to later siblings.
    assert_reply(&engine, &session, "quiet", "calm");
}

#[test]
fn e2e_local_var_is_template_scoped() {
    let engine = engine_with(
        "<category><pattern>LOCAL</pattern>\
         <template><think><set var=\"tmp\">here</set></think><get var=\"tmp\"/></template></category>\
         <category><pattern>PEEK</pattern>\
         <template>[<get var=\"tmp\"/>]</template></category>",
    );
    let session = engine.create_session("s");
    assert_reply(&engine, &session, "local", "here");
    // A later template evaluation gets a fresh local frame.
    assert_reply(&engine, &session, "peek", "[]");
}

#[test]
fn e2e_global_scope_spans_sessions() {
    let engine = engine_with(
        "<category><pattern>REMEMBER *</pattern>\
         <template><think><set name=\"fact\" scope=\"global\"><star/></set></think>ok</template></category>\
         <category><pattern>RECALL</pattern>\
         <template><get name=\"fact\"/></template></category>",
    );
    let one = engine.create_session("one");
    let two = engine.create_session("two");
    assert_reply(&engine, &one, "remember gravity", "ok");
    assert_reply(&engine, &two, "recall", "GRAVITY");
}

#[test]
fn e2e_properties_scope_write_is_ignored() {
    let engine = engine_with(
        "<category><pattern>HACK</pattern>\
         <template><think><set name=\"name\" scope=\"properties\">Mallory</set></think>done</template></category>",
    );
    engine.set_property("name", "Golem");
    let session = engine.create_session("s");
    assert_reply(&engine, &session, "hack", "done");
    assert_eq!(engine.property("name").as_deref(), Some("Golem"));
}

#[test]
fn e2e_condition_value_form() {
    let engine = Engine::new();
    engine.set_global("color", "red");
    assert_eq!(
        engine.process_template("<condition name=\"color\" value=\"red\">warm</condition>", &[]),
        "warm"
    );
    assert_eq!(
        engine.process_template("<condition name=\"color\" value=\"RED\">warm</condition>", &[]),
        "",
        "comparison is case-sensitive"
    );
}

#[test]
fn e2e_condition_list_form_with_default() {
    let engine = Engine::new();
    let template = "<condition name=\"mood\">\
                    <li value=\"happy\">grin</li>\
                    <li value=\"sad\">frown</li>\
                    <li>blank stare</li>\
                    </condition>";
    engine.set_global("mood", "sad");
    assert_eq!(engine.process_template(template, &[]), "frown");
    engine.set_global("mood", "confused");
    assert_eq!(engine.process_template(template, &[]), "blank stare");
}

#[test]
fn e2e_random_without_li_returns_raw_inner() {
    let engine = Engine::new();
    assert_eq!(
        engine.process_template("<random>just text</random>", &[]),
        "just text"
    );
}

#[test]
fn e2e_sr_is_srai_star_sugar() {
    let engine = engine_with(
        "<category><pattern>HELLO</pattern><template>Hi!</template></category>\
         <category><pattern>SAY *</pattern><template><sr/></template></category>",
    );
    let session = engine.create_session("s");
    assert_reply(&engine, &session, "say hello", "Hi!");
}

#[test]
fn e2e_srai_no_match_returns_raw_input() {
    let engine = engine_with(
        "<category><pattern>ASK</pattern><template><srai>NO SUCH RULE</srai></template></category>",
    );
    let session = engine.create_session("s");
    assert_reply(&engine, &session, "ask", "NO SUCH RULE");
}

#[test]
fn e2e_srai_cycle_hits_depth_cap() {
    let engine = engine_with(
        "<category><pattern>LOOP</pattern><template><srai>LOOP</srai></template></category>",
    );
    let session = engine.create_session("s");
    // The cycle bottoms out at the depth cap and falls through with the
    // raw input instead of hanging.
    assert_reply(&engine, &session, "loop", "LOOP");
}

#[test]
fn e2e_map_lookup_and_passthrough() {
    let engine = engine_with(
        "<category><pattern>CAPITAL OF *</pattern>\
         <template><map name=\"capitals\"><star/></map></template></category>",
    );
    engine.add_map("capitals", [("FRANCE", "Paris"), ("SPAIN", "Madrid")]);
    let session = engine.create_session("s");
    assert_reply(&engine, &session, "capital of france", "Paris");
    // Unknown key falls through to the key itself, markup stripped.
    assert_reply(&engine, &session, "capital of atlantis", "ATLANTIS");
}

#[test]
fn e2e_list_operations() {
    let engine = Engine::new();
    assert_eq!(
        engine.process_template("<list name=\"todo\" operation=\"add\">alpha</list>", &[]),
        ""
    );
    engine.process_template("<list name=\"todo\" operation=\"add\">beta</list>", &[]);
    assert_eq!(
        engine.process_template("<list name=\"todo\" operation=\"get\"/>", &[]),
        "alpha, beta"
    );
    assert_eq!(
        engine.process_template("<list name=\"todo\" operation=\"get\">2</list>", &[]),
        "beta"
    );
    assert_eq!(
        engine.process_template("<list name=\"todo\" operation=\"clear\"/>", &[]),
        ""
    );
    assert_eq!(
        engine.process_template("<list name=\"todo\" operation=\"get\"/>", &[]),
        ""
    );
}

#[test]
fn e2e_unknown_tags_pass_through() {
    let engine = Engine::new();
    assert_eq!(
        engine.process_template("before <widget kind=\"x\">inner</widget> after", &[]),
        "before <widget kind=\"x\">inner</widget> after"
    );
}

#[test]
fn e2e_comments_pass_through_outside_think() {
    let engine = Engine::new();
    assert_eq!(
        engine.process_template("a <!-- note --> b", &[]),
        "a <!-- note --> b"
    );
    assert_eq!(engine.process_template("<think><!-- gone --></think>x", &[]), "x");
}

#[test]
fn e2e_eval_is_transparent_outside_learn() {
    let engine = Engine::new();
    assert_eq!(
        engine.process_template("<eval><uppercase>hi</uppercase></eval>", &[]),
        "HI"
    );
}

#[test]
fn e2e_nested_same_tag_evaluates_inside_out() {
    let engine = Engine::new();
    assert_eq!(
        engine.process_template("<uppercase><uppercase>x</uppercase>y</uppercase>", &[]),
        "XY"
    );
}

#[test]
fn e2e_missing_attributes_degrade() {
    let engine = Engine::new();
    assert_eq!(engine.process_template("<get/>", &[]), "");
    assert_eq!(engine.process_template("<bot/>", &[]), "");
    assert_eq!(
        engine.process_template("<star/>", &[("star1", "X")]),
        "X",
        "star defaults to index 1"
    );
}

#[test]
fn e2e_first_and_rest() {
    let engine = Engine::new();
    assert_eq!(engine.process_template("<first>alpha beta gamma</first>", &[]), "alpha");
    assert_eq!(engine.process_template("<rest>alpha beta gamma</rest>", &[]), "beta gamma");
    assert_eq!(engine.process_template("<rest>alpha</rest>", &[]), "");
}
