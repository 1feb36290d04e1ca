//! E2E: text transform tags, person/gender, and date/time formatting.

mod common;

use chrono::TimeZone;
use common::{assert_reply, engine_with};
use golem_engine::{Engine, EngineConfig};

fn template(engine: &Engine, t: &str) -> String {
    engine.process_template(t, &[])
}

#[test]
fn e2e_case_transforms() {
    let engine = Engine::new();
    assert_eq!(template(&engine, "<uppercase>hello  world</uppercase>"), "HELLO WORLD");
    assert_eq!(template(&engine, "<lowercase>HELLO</lowercase>"), "hello");
    assert_eq!(template(&engine, "<formal>alan turing</formal>"), "Alan Turing");
    assert_eq!(template(&engine, "<capitalize>two words</capitalize>"), "Two words");
    assert_eq!(
        template(&engine, "<sentence>one thing. another thing.</sentence>"),
        "One thing. Another thing."
    );
    assert_eq!(template(&engine, "<word>semi-famous words</word>"), "Semi-Famous Words");
}

#[test]
fn e2e_shape_transforms() {
    let engine = Engine::new();
    assert_eq!(template(&engine, "<explode>abc</explode>"), "a b c");
    assert_eq!(template(&engine, "<reverse>stressed</reverse>"), "desserts");
    assert_eq!(
        template(&engine, "<acronym>graphics interchange format</acronym>"),
        "GIF"
    );
    assert_eq!(template(&engine, "<trim>  spaced  </trim>"), "spaced");
    assert_eq!(
        template(&engine, "<substring start=\"0\" end=\"5\">hello world</substring>"),
        "hello"
    );
    assert_eq!(
        template(&engine, "<replace search=\"cat\" replace=\"dog\">cat and cat</replace>"),
        "dog and dog"
    );
    assert_eq!(template(&engine, "<length>four</length>"), "4");
    assert_eq!(template(&engine, "<count search=\"s\">mississippi</count>"), "4");
}

#[test]
fn e2e_list_shaping_transforms() {
    let engine = Engine::new();
    assert_eq!(template(&engine, "<split delimiter=\",\">a,b,c</split>"), "a b c");
    assert_eq!(template(&engine, "<join delimiter=\"-\">a b c</join>"), "a-b-c");
    assert_eq!(template(&engine, "<unique>red blue red green</unique>"), "red blue green");
    assert_eq!(
        template(&engine, "<unique delimiter=\",\">x,y,x</unique>"),
        "x,y"
    );
    assert_eq!(template(&engine, "<pluralize>mouse</pluralize>"), "mice");
    assert_eq!(template(&engine, "<pluralize>grey cat</pluralize>"), "grey cats");
}

#[test]
fn e2e_shuffle_keeps_words() {
    let engine = Engine::new();
    let out = template(&engine, "<shuffle>a b c</shuffle>");
    let mut words: Vec<&str> = out.split_whitespace().collect();
    words.sort_unstable();
    assert_eq!(words, vec!["a", "b", "c"]);
}

#[test]
fn e2e_person_swaps_perspective() {
    let engine = engine_with(
        "<category><pattern>I THINK *</pattern>\
         <template>You think <person><star/></person></template></category>",
    );
    let session = engine.create_session("s");
    // Captures arrive uppercased; the swap is case-insensitive and the
    // replacement keeps the all-caps shape.
    assert_reply(&engine, &session, "i think my plan works", "You think YOUR PLAN WORKS");
}

#[test]
fn e2e_person_in_plain_text() {
    let engine = Engine::new();
    assert_eq!(
        template(&engine, "<person>i gave you my word</person>"),
        "you gave i your word"
    );
    assert_eq!(
        template(&engine, "<person>we did it ourselves</person>"),
        "you did it yourself"
    );
}

#[test]
fn e2e_gender_swaps() {
    let engine = Engine::new();
    assert_eq!(
        template(&engine, "<gender>he gave her his word</gender>"),
        "she gave his her word"
    );
    assert_eq!(template(&engine, "<gender>it is his</gender>"), "it is hers");
}

#[test]
fn e2e_nested_transforms_compose() {
    let engine = Engine::new();
    assert_eq!(
        template(&engine, "<uppercase><reverse>ab</reverse> cd</uppercase>"),
        "BA CD"
    );
}

fn pinned_engine() -> Engine {
    let config = EngineConfig {
        fixed_now: Some(
            chrono::Local
                .with_ymd_and_hms(2024, 3, 9, 15, 4, 5)
                .unwrap(),
        ),
        ..EngineConfig::default()
    };
    Engine::with_config(config)
}

#[test]
fn e2e_date_formats() {
    let engine = pinned_engine();
    assert_eq!(template(&engine, "<date/>"), "March 9, 2024");
    assert_eq!(template(&engine, "<date format=\"iso\"/>"), "2024-03-09");
    assert_eq!(template(&engine, "<date format=\"short\"/>"), "03/09/24");
    assert_eq!(template(&engine, "<date format=\"quarter\"/>"), "Q1");
    assert_eq!(template(&engine, "<date format=\"leapyear\"/>"), "yes");
    assert_eq!(template(&engine, "<date format=\"%d.%m.%Y\"/>"), "09.03.2024");
    assert_eq!(template(&engine, "<date format=\"YYYY/MM\"/>"), "2024/03");
    assert_eq!(template(&engine, "<date format=\"nonsense\"/>"), "March 9, 2024");
}

#[test]
fn e2e_time_formats() {
    let engine = pinned_engine();
    assert_eq!(template(&engine, "<time/>"), "3:04 PM");
    assert_eq!(template(&engine, "<time format=\"24\"/>"), "15:04");
    assert_eq!(template(&engine, "<time format=\"iso\"/>"), "15:04:05");
    assert_eq!(template(&engine, "<time format=\"kitchen\"/>"), "3:04PM");
    assert_eq!(template(&engine, "<time format=\"HH:MM\"/>"), "15:04");
    assert_eq!(template(&engine, "<time format=\"nonsense\"/>"), "3:04 PM");
}
