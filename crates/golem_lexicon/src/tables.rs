//! The raw substitution tables.
//!
//! Kept as `&'static` pair slices so the data reads as a dictionary and the
//! lookup indices in `lib.rs` stay trivial. Entries are lowercase; casing is
//! the caller's concern.

/// Contraction → expansion, applied by pattern/matching normalization.
pub const CONTRACTIONS: &[(&str, &str)] = &[
    ("i'm", "i am"),
    ("i've", "i have"),
    ("i'll", "i will"),
    ("i'd", "i would"),
    ("you're", "you are"),
    ("you've", "you have"),
    ("you'll", "you will"),
    ("you'd", "you would"),
    ("he's", "he is"),
    ("she's", "she is"),
    ("it's", "it is"),
    ("we're", "we are"),
    ("we've", "we have"),
    ("we'll", "we will"),
    ("they're", "they are"),
    ("they've", "they have"),
    ("they'll", "they will"),
    ("that's", "that is"),
    ("there's", "there is"),
    ("here's", "here is"),
    ("what's", "what is"),
    ("who's", "who is"),
    ("where's", "where is"),
    ("how's", "how is"),
    ("let's", "let us"),
    ("don't", "do not"),
    ("doesn't", "does not"),
    ("didn't", "did not"),
    ("can't", "cannot"),
    ("couldn't", "could not"),
    ("won't", "will not"),
    ("wouldn't", "would not"),
    ("shouldn't", "should not"),
    ("isn't", "is not"),
    ("aren't", "are not"),
    ("wasn't", "was not"),
    ("weren't", "were not"),
    ("haven't", "have not"),
    ("hasn't", "has not"),
    ("hadn't", "had not"),
];

/// First↔second person swaps for `<person>`.
///
/// Plural first person collapses to singular second person, so the table is
/// not an involution; "you" always maps back to the subject form "i".
pub const PERSON_PAIRS: &[(&str, &str)] = &[
    ("i", "you"),
    ("me", "you"),
    ("my", "your"),
    ("mine", "yours"),
    ("myself", "yourself"),
    ("we", "you"),
    ("us", "you"),
    ("our", "your"),
    ("ours", "yours"),
    ("ourselves", "yourself"),
    ("you", "i"),
    ("your", "my"),
    ("yours", "mine"),
    ("yourself", "myself"),
    ("i'm", "you're"),
    ("i've", "you've"),
    ("i'll", "you'll"),
    ("i'd", "you'd"),
    ("you're", "i'm"),
    ("you've", "i've"),
    ("you'll", "i'll"),
    ("you'd", "i'd"),
    ("am", "are"),
    ("was", "were"),
];

/// Masculine↔feminine swaps for `<gender>`.
///
/// "his" and "her" are position-sensitive and handled in
/// [`crate::gender_swap`] instead of here.
pub const GENDER_PAIRS: &[(&str, &str)] = &[
    ("he", "she"),
    ("she", "he"),
    ("him", "her"),
    ("hers", "his"),
    ("himself", "herself"),
    ("herself", "himself"),
    ("he's", "she's"),
    ("she's", "he's"),
];

/// Irregular singular → plural forms for `<pluralize>`.
pub const IRREGULAR_PLURALS: &[(&str, &str)] = &[
    ("man", "men"),
    ("woman", "women"),
    ("child", "children"),
    ("person", "people"),
    ("mouse", "mice"),
    ("goose", "geese"),
    ("foot", "feet"),
    ("tooth", "teeth"),
    ("ox", "oxen"),
    ("sheep", "sheep"),
    ("deer", "deer"),
    ("fish", "fish"),
    ("datum", "data"),
    ("criterion", "criteria"),
];

/// Tokens (trailing dot included) the sentence splitter never breaks after.
pub const TITLE_ABBREVIATIONS: &[&str] = &[
    "dr.", "mr.", "mrs.", "ms.", "prof.", "st.", "jr.", "sr.", "inc.", "corp.", "ltd.", "co.",
    "vs.", "etc.", "p.m.", "a.m.", "e.g.", "i.e.",
];
