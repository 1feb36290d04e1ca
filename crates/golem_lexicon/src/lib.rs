//! # golem-lexicon
//!
//! Static English vocabulary tables for the golem conversational engine.
//!
//! The tables here back three concerns of the pipeline:
//!
//! 1. **Contraction expansion** - the normalizer rewrites "what's" → "what is"
//!    before patterns and inputs are compared ([`expand_contraction`]).
//! 2. **Pronoun substitution** - the `<person>` and `<gender>` template tags
//!    rewrite perspective word-by-word ([`person_swap`], [`gender_swap`]).
//! 3. **Morphology** - irregular plurals for `<pluralize>`
//!    ([`irregular_plural`]) and the abbreviation tokens the sentence
//!    splitter must not break after ([`is_abbreviation`]).
//!
//! All lookups are case-insensitive; callers pass lowercased words and
//! restore casing themselves.

mod tables;

use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;

pub use tables::{
    CONTRACTIONS, GENDER_PAIRS, IRREGULAR_PLURALS, PERSON_PAIRS, TITLE_ABBREVIATIONS,
};

static CONTRACTION_INDEX: Lazy<FxHashMap<&'static str, &'static str>> =
    Lazy::new(|| CONTRACTIONS.iter().copied().collect());

static PERSON_INDEX: Lazy<FxHashMap<&'static str, &'static str>> =
    Lazy::new(|| PERSON_PAIRS.iter().copied().collect());

static GENDER_INDEX: Lazy<FxHashMap<&'static str, &'static str>> =
    Lazy::new(|| GENDER_PAIRS.iter().copied().collect());

static PLURAL_INDEX: Lazy<FxHashMap<&'static str, &'static str>> =
    Lazy::new(|| IRREGULAR_PLURALS.iter().copied().collect());

/// Expand a contraction to its full form ("i'm" → "i am").
///
/// Returns `None` when the word is not a known contraction.
pub fn expand_contraction(lower: &str) -> Option<&'static str> {
    CONTRACTION_INDEX.get(lower).copied()
}

/// First↔second person substitution for a single lowercased word.
///
/// The mapping is applied exactly once per token and is deliberately not an
/// involution: plural first person ("we", "our") collapses to singular
/// second person ("you", "your"), and "you" maps back to the subject form
/// "i" regardless of its original grammatical role.
pub fn person_swap(lower: &str) -> Option<&'static str> {
    PERSON_INDEX.get(lower).copied()
}

/// Masculine↔feminine substitution for a single lowercased word.
///
/// "his" and "her" are position-sensitive (possessive determiner vs
/// pronoun), so they are absent from the flat table; callers resolve them
/// with `followed_by_word` - whether the next token in the sentence is a
/// word rather than punctuation or end-of-text.
pub fn gender_swap(lower: &str, followed_by_word: bool) -> Option<&'static str> {
    match lower {
        "his" => Some(if followed_by_word { "her" } else { "hers" }),
        "her" => Some(if followed_by_word { "his" } else { "him" }),
        _ => GENDER_INDEX.get(lower).copied(),
    }
}

/// Irregular plural lookup ("child" → "children").
pub fn irregular_plural(lower: &str) -> Option<&'static str> {
    PLURAL_INDEX.get(lower).copied()
}

/// True when `token` (trailing dot included, any case) is a title or
/// abbreviation the sentence splitter must not break after.
pub fn is_abbreviation(token: &str) -> bool {
    let lower = token.to_lowercase();
    TITLE_ABBREVIATIONS.iter().any(|a| *a == lower)
}
