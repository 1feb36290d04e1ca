//! Sentence splitting and word tokenization.
//!
//! Both are shared infrastructure: the `<sentence>` transform and the
//! display normalizer split sentences, while `<word>`, `<person>`, and
//! `<gender>` walk word segments.

use golem_lexicon::is_abbreviation;

/// Split text into sentences.
///
/// A boundary is a run of `.`/`!`/`?` followed by whitespace, unless the
/// token ending at the run is a known title or abbreviation ("Dr.",
/// "p.m."). Internal whitespace of each produced sentence is collapsed.
pub fn sentences(text: &str) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let mut out = Vec::new();
    let mut current = String::new();
    let mut i = 0;

    while i < chars.len() {
        let ch = chars[i];
        current.push(ch);

        if matches!(ch, '.' | '!' | '?') {
            // Extend over the whole terminator run.
            while i + 1 < chars.len() && matches!(chars[i + 1], '.' | '!' | '?') {
                i += 1;
                current.push(chars[i]);
            }
            let at_boundary = i + 1 >= chars.len() || chars[i + 1].is_whitespace();
            if at_boundary && !ends_with_abbreviation(&current) {
                push_sentence(&mut out, &current);
                current.clear();
            }
        }
        i += 1;
    }
    push_sentence(&mut out, &current);
    out
}

fn push_sentence(out: &mut Vec<String>, raw: &str) {
    let cleaned = crate::normalize::collapse_whitespace(raw);
    if !cleaned.is_empty() {
        out.push(cleaned);
    }
}

/// Whether the trailing token of `sentence` is an abbreviation like "Dr.".
fn ends_with_abbreviation(sentence: &str) -> bool {
    let token = sentence
        .rsplit(char::is_whitespace)
        .next()
        .unwrap_or(sentence);
    is_abbreviation(token)
}

/// One segment of tokenized text: an alphanumeric word (apostrophes inside
/// stay attached) or a single non-word glyph, whitespace included.
///
/// Concatenating segment texts in order reproduces the input exactly, which
/// lets transforms rewrite words while preserving punctuation in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub is_word: bool,
}

/// Tokenize into word and glyph segments.
pub fn segments(text: &str) -> Vec<Segment> {
    let chars: Vec<char> = text.chars().collect();
    let mut out = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        if chars[i].is_alphanumeric() {
            let start = i;
            while i < chars.len() {
                if chars[i].is_alphanumeric() {
                    i += 1;
                } else if chars[i] == '\''
                    && i > start
                    && i + 1 < chars.len()
                    && chars[i + 1].is_alphanumeric()
                {
                    // Interior apostrophe: don't, o'clock
                    i += 1;
                } else {
                    break;
                }
            }
            out.push(Segment {
                text: chars[start..i].iter().collect(),
                is_word: true,
            });
        } else {
            out.push(Segment {
                text: chars[i].to_string(),
                is_word: false,
            });
            i += 1;
        }
    }
    out
}

/// The word segments only.
pub fn words(text: &str) -> Vec<String> {
    segments(text)
        .into_iter()
        .filter(|s| s.is_word)
        .map(|s| s.text)
        .collect()
}
