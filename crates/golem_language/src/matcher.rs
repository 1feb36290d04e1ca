//! Binding a compiled pattern against normalized input words.
//!
//! Matching is a straightforward backtracking walk: literal tokens must
//! equal the current word, `<set>` references consult the named collection,
//! and wildcards try the shortest extension first and grow on backtrack.
//! Which category gets tried first is decided elsewhere (priority order in
//! the knowledge base); this module only answers "does it bind, and to
//! what".
//!
//! Capture naming depends on the axis being matched:
//!
//! - **Pattern** axis: one shared counter, `star1`…`starN`, in token order
//!   (set-reference matches count as stars).
//! - **That/Topic** axes: per-kind counters prefixed with the axis -
//!   `that_star1`, `that_underscore1`, `that_caret1`, `that_hash1`,
//!   `topic_star1`, ….

use rustc_hash::FxHashMap;

use crate::pattern::CompiledPattern;
use crate::token::PatternToken;

/// Wildcard captures bound during a match, keyed by capture name.
pub type Bindings = FxHashMap<String, String>;

/// Set-membership oracle the matcher consults for `<set>` references.
///
/// Implemented by the knowledge base; membership is case-insensitive over
/// uppercase-stored members.
pub trait SetMembership {
    fn set_contains(&self, set: &str, word: &str) -> bool;
}

/// Oracle for contexts with no sets loaded; every membership test fails.
pub struct NoSets;

impl SetMembership for NoSets {
    fn set_contains(&self, _set: &str, _word: &str) -> bool {
        false
    }
}

/// Which context dimension a pattern is being matched on. Controls capture
/// naming.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Pattern,
    That,
    Topic,
}

impl Axis {
    fn prefix(self) -> Option<&'static str> {
        match self {
            Axis::Pattern => None,
            Axis::That => Some("that"),
            Axis::Topic => Some("topic"),
        }
    }
}

/// Split normalized text into match words. Empty text yields no words.
pub fn split_words(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

/// Try to bind `pattern` against `words`; `None` when it cannot bind.
pub fn bind(
    pattern: &CompiledPattern,
    words: &[&str],
    axis: Axis,
    sets: &dyn SetMembership,
) -> Option<Bindings> {
    let mut captures: Vec<(&'static str, String)> = Vec::new();
    if walk(pattern.tokens(), 0, words, 0, sets, &mut captures) {
        Some(name_captures(axis, &captures))
    } else {
        None
    }
}

fn walk(
    tokens: &[PatternToken],
    ti: usize,
    words: &[&str],
    wi: usize,
    sets: &dyn SetMembership,
    captures: &mut Vec<(&'static str, String)>,
) -> bool {
    let Some(token) = tokens.get(ti) else {
        return wi == words.len();
    };

    match token {
        PatternToken::Word(w) | PatternToken::Exact(w) => {
            wi < words.len()
                && words[wi] == w.as_str()
                && walk(tokens, ti + 1, words, wi + 1, sets, captures)
        }
        PatternToken::TopicRef(name) => {
            // Literal token in the pattern string.
            let literal = format!("<topic>{}</topic>", name);
            wi < words.len()
                && words[wi].eq_ignore_ascii_case(&literal)
                && walk(tokens, ti + 1, words, wi + 1, sets, captures)
        }
        PatternToken::SetRef(name) => {
            if wi < words.len() && sets.set_contains(name, words[wi]) {
                captures.push(("star", words[wi].to_string()));
                if walk(tokens, ti + 1, words, wi + 1, sets, captures) {
                    return true;
                }
                captures.pop();
            }
            false
        }
        PatternToken::Wild(kind) => {
            // Shortest extension first; grow on backtrack.
            let remaining = words.len() - wi;
            for take in kind.min_words()..=remaining {
                captures.push((kind.capture_label(), words[wi..wi + take].join(" ")));
                if walk(tokens, ti + 1, words, wi + take, sets, captures) {
                    return true;
                }
                captures.pop();
            }
            false
        }
    }
}

fn name_captures(axis: Axis, captures: &[(&'static str, String)]) -> Bindings {
    let mut out = Bindings::default();
    match axis.prefix() {
        None => {
            for (n, (_, text)) in captures.iter().enumerate() {
                out.insert(format!("star{}", n + 1), text.clone());
            }
        }
        Some(prefix) => {
            let mut counters: FxHashMap<&str, usize> = FxHashMap::default();
            for (label, text) in captures {
                let n = counters.entry(label).or_insert(0);
                *n += 1;
                out.insert(format!("{}_{}{}", prefix, label, n), text.clone());
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::CompiledPattern;

    fn compile(p: &str) -> CompiledPattern {
        CompiledPattern::compile(p).unwrap()
    }

    fn bind_simple(pattern: &str, input: &str) -> Option<Bindings> {
        let p = compile(pattern);
        let words = split_words(input);
        bind(&p, &words, Axis::Pattern, &NoSets)
    }

    #[test]
    fn literal_match() {
        assert!(bind_simple("HELLO", "HELLO").is_some());
        assert!(bind_simple("HELLO", "GOODBYE").is_none());
        assert!(bind_simple("HELLO THERE", "HELLO").is_none());
    }

    #[test]
    fn star_captures() {
        let b = bind_simple("MY NAME IS *", "MY NAME IS JOHN SMITH").unwrap();
        assert_eq!(b["star1"], "JOHN SMITH");
    }

    #[test]
    fn star_matches_zero_words() {
        let b = bind_simple("HELLO *", "HELLO").unwrap();
        assert_eq!(b["star1"], "");
    }

    #[test]
    fn underscore_requires_one_word() {
        assert!(bind_simple("HELLO _", "HELLO").is_none());
        let b = bind_simple("HELLO _", "HELLO WORLD").unwrap();
        assert_eq!(b["star1"], "WORLD");
    }

    #[test]
    fn multiple_captures_number_in_order() {
        let b = bind_simple("* IS *", "LIFE IS GOOD TODAY").unwrap();
        assert_eq!(b["star1"], "LIFE");
        assert_eq!(b["star2"], "GOOD TODAY");
    }

    #[test]
    fn backtracking_finds_interior_literal() {
        let b = bind_simple("* IS * IS *", "A IS B IS C").unwrap();
        assert_eq!(b["star1"], "A");
        assert_eq!(b["star2"], "B");
        assert_eq!(b["star3"], "C");
    }

    #[test]
    fn exact_token_matches_like_a_word() {
        let b = bind_simple("$HELLO *", "HELLO FRIEND").unwrap();
        assert_eq!(b["star1"], "FRIEND");
    }

    #[test]
    fn that_axis_uses_kind_counters() {
        let p = compile("DO YOU LIKE * MOVIES");
        let words = split_words("DO YOU LIKE ACTION MOVIES");
        let b = bind(&p, &words, Axis::That, &NoSets).unwrap();
        assert_eq!(b["that_star1"], "ACTION");

        let p = compile("YOU SAID _ THEN # NOW");
        let words = split_words("YOU SAID THIS THEN NOW");
        let b = bind(&p, &words, Axis::That, &NoSets).unwrap();
        assert_eq!(b["that_underscore1"], "THIS");
        assert_eq!(b["that_hash1"], "");
    }

    #[test]
    fn set_reference_binds_membership() {
        struct Emotions;
        impl SetMembership for Emotions {
            fn set_contains(&self, set: &str, word: &str) -> bool {
                set == "emotions" && matches!(word, "HAPPY" | "SAD")
            }
        }
        let p = compile("I AM <set>emotions</set>");
        let b = bind(&p, &split_words("I AM HAPPY"), Axis::Pattern, &Emotions).unwrap();
        assert_eq!(b["star1"], "HAPPY");
        assert!(bind(&p, &split_words("I AM TIRED"), Axis::Pattern, &Emotions).is_none());
    }

    #[test]
    fn empty_input_binds_only_zero_width() {
        assert!(bind_simple("HELLO", "").is_none());
        // A pattern may not start with a wildcard, so an empty input can
        // only fail here.
        assert!(bind_simple("HELLO *", "").is_none());
    }
}
