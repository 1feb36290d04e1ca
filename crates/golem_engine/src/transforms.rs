//! Text transforms backing the template tags of the same names.
//!
//! Every transform receives the fully evaluated inner string and returns a
//! new string. Whitespace handling is tag-specific: the case transforms
//! collapse internal runs, the word-shape transforms preserve punctuation
//! in place, and `<trim>`/`<dedent>` touch only the edges.

use golem_lexicon::{gender_swap, irregular_plural, person_swap};
use golem_language::normalize::collapse_whitespace;
use golem_language::split::{segments, sentences, Segment};
use rand::seq::SliceRandom;

pub fn uppercase(text: &str) -> String {
    collapse_whitespace(&text.to_uppercase())
}

pub fn lowercase(text: &str) -> String {
    collapse_whitespace(&text.to_lowercase())
}

/// Title Case on whitespace-separated words.
pub fn formal(text: &str) -> String {
    text.split_whitespace()
        .map(title_word)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Title Case on tokenized words, punctuation preserved in place.
pub fn word(text: &str) -> String {
    map_words(text, |w| title_word(&w))
}

/// Capitalize the first letter of each sentence.
pub fn sentence(text: &str) -> String {
    sentences(text)
        .iter()
        .map(|s| capitalize(s))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Uppercase the first alphabetic character; leave the rest alone.
pub fn capitalize(text: &str) -> String {
    let mut done = false;
    text.chars()
        .map(|c| {
            if !done && c.is_alphabetic() {
                done = true;
                c.to_uppercase().to_string()
            } else {
                c.to_string()
            }
        })
        .collect()
}

/// A space between every non-whitespace character.
pub fn explode(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_whitespace())
        .map(String::from)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Reverse the character sequence.
pub fn reverse(text: &str) -> String {
    text.chars().rev().collect()
}

/// First letter of each word, uppercased and concatenated.
pub fn acronym(text: &str) -> String {
    text.split_whitespace()
        .filter_map(|w| w.chars().next())
        .flat_map(char::to_uppercase)
        .collect()
}

pub fn trim(text: &str) -> String {
    text.trim().to_string()
}

/// Character slice `[start, end)`, clamped to the text.
pub fn substring(text: &str, start: Option<usize>, end: Option<usize>) -> String {
    let chars: Vec<char> = text.chars().collect();
    let start = start.unwrap_or(0).min(chars.len());
    let end = end.unwrap_or(chars.len()).min(chars.len());
    if start >= end {
        return String::new();
    }
    chars[start..end].iter().collect()
}

pub fn replace(text: &str, search: &str, replacement: &str) -> String {
    if search.is_empty() {
        return text.to_string();
    }
    text.replace(search, replacement)
}

/// Pluralize the final word; earlier words pass through.
pub fn pluralize(text: &str) -> String {
    let trimmed = text.trim();
    let Some(last_start) = trimmed.rfind(char::is_whitespace).map(|i| i + 1) else {
        return pluralize_word(trimmed);
    };
    format!("{}{}", &trimmed[..last_start], pluralize_word(&trimmed[last_start..]))
}

fn pluralize_word(word: &str) -> String {
    if word.is_empty() {
        return String::new();
    }
    let lower = word.to_lowercase();
    if let Some(plural) = irregular_plural(&lower) {
        return match_case(word, plural);
    }
    if lower.ends_with('s')
        || lower.ends_with('x')
        || lower.ends_with('z')
        || lower.ends_with("ch")
        || lower.ends_with("sh")
    {
        return format!("{}es", word);
    }
    if let Some(stem) = word.strip_suffix('y') {
        let before = stem.chars().last();
        if before.map(|c| !"aeiouAEIOU".contains(c)).unwrap_or(false) {
            return format!("{}ies", stem);
        }
    }
    if let Some(stem) = word.strip_suffix("fe") {
        return format!("{}ves", stem);
    }
    if let Some(stem) = word.strip_suffix('f') {
        return format!("{}ves", stem);
    }
    format!("{}s", word)
}

/// Random permutation of the whitespace-separated words.
pub fn shuffle(text: &str) -> String {
    let mut words: Vec<&str> = text.split_whitespace().collect();
    words.shuffle(&mut rand::thread_rng());
    words.join(" ")
}

/// Character count.
pub fn length(text: &str) -> String {
    text.chars().count().to_string()
}

/// Non-overlapping occurrences of `search`.
pub fn count(text: &str, search: &str) -> String {
    if search.is_empty() {
        return "0".to_string();
    }
    text.matches(search).count().to_string()
}

/// Split on a delimiter and rejoin with single spaces.
pub fn split(text: &str, delimiter: Option<&str>) -> String {
    match delimiter.filter(|d| !d.is_empty()) {
        Some(d) => text
            .split(d)
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect::<Vec<_>>()
            .join(" "),
        None => collapse_whitespace(text),
    }
}

/// Join whitespace-separated words with a delimiter.
pub fn join(text: &str, delimiter: Option<&str>) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(delimiter.unwrap_or(" "))
}

/// Prefix every line with four spaces.
pub fn indent(text: &str) -> String {
    text.lines()
        .map(|line| format!("    {}", line))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Strip the common leading whitespace of all non-empty lines.
pub fn dedent(text: &str) -> String {
    let margin = text
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(|l| l.chars().take_while(|c| c.is_whitespace()).count())
        .min()
        .unwrap_or(0);
    text.lines()
        .map(|line| {
            let cut = line
                .char_indices()
                .nth(margin.min(line.chars().count()))
                .map(|(i, _)| i)
                .unwrap_or(line.len());
            &line[cut..]
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Deduplicate tokens, keeping first occurrences in order. Idempotent.
pub fn unique(text: &str, delimiter: Option<&str>) -> String {
    let (tokens, joiner): (Vec<&str>, &str) = match delimiter.filter(|d| !d.is_empty()) {
        Some(d) => (text.split(d).collect(), d),
        None => (text.split_whitespace().collect(), " "),
    };
    let mut seen = Vec::new();
    for token in tokens {
        if !seen.contains(&token) {
            seen.push(token);
        }
    }
    seen.join(joiner)
}

/// First whitespace-separated token.
pub fn first(text: &str) -> String {
    text.split_whitespace().next().unwrap_or("").to_string()
}

/// Everything after the first token.
pub fn rest(text: &str) -> String {
    text.split_whitespace().skip(1).collect::<Vec<_>>().join(" ")
}

/// First↔second person pronoun swap, word by word.
pub fn person(text: &str) -> String {
    map_words(text, |w| match person_swap(&w.to_lowercase()) {
        Some(swapped) => match_case(&w, swapped),
        None => w,
    })
}

/// Masculine↔feminine swap. "his"/"her" pick their form from whether a
/// word follows (possessive determiner) or not (possessive pronoun).
pub fn gender(text: &str) -> String {
    let segs = segments(text);
    let mut out = String::with_capacity(text.len());
    for (i, seg) in segs.iter().enumerate() {
        if !seg.is_word {
            out.push_str(&seg.text);
            continue;
        }
        let followed_by_word = segs[i + 1..]
            .iter()
            .find(|s| !s.text.chars().all(char::is_whitespace))
            .map(|s| s.is_word)
            .unwrap_or(false);
        match gender_swap(&seg.text.to_lowercase(), followed_by_word) {
            Some(swapped) => out.push_str(&match_case(&seg.text, swapped)),
            None => out.push_str(&seg.text),
        }
    }
    out
}

/// Rewrite word segments through `f`, leaving everything else in place.
fn map_words(text: &str, mut f: impl FnMut(String) -> String) -> String {
    segments(text)
        .into_iter()
        .map(|Segment { text, is_word }| if is_word { f(text) } else { text })
        .collect()
}

fn title_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        None => String::new(),
        Some(c) => c.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
    }
}

/// Shape `replacement` like `original`: ALL CAPS stays caps, leading
/// capital stays capital.
fn match_case(original: &str, replacement: &str) -> String {
    if original.chars().count() > 1 && original.chars().all(|c| !c.is_lowercase()) {
        replacement.to_uppercase()
    } else if original.chars().next().map(char::is_uppercase).unwrap_or(false) {
        capitalize(replacement)
    } else {
        replacement.to_string()
    }
}
