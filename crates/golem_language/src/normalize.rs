//! Canonical text form for patterns and inputs.
//!
//! Two normalizers live here:
//!
//! 1. [`normalize`] - the idempotent pattern/matching form. Uppercases,
//!    expands the fixed contraction table, collapses whitespace, and strips
//!    punctuation while preserving wildcard glyphs, digits, and literal
//!    `<set>NAME</set>` / `<topic>NAME</topic>` references (those name
//!    external collections and must survive unchanged).
//!
//! 2. [`protect`] / [`Protected::denormalize`] - the lossy-with-recovery
//!    preprocessor used on `<eval>`/display paths. Quoted spans, URLs,
//!    emails, balanced math expressions, and arbitrary `<…>` tags are
//!    replaced by `__KIND_i__` placeholders that survive downstream text
//!    transforms; `denormalize` restores the originals exactly.
//!
//! Neither normalizer fails. Degenerate input (empty, whitespace, control
//! characters) normalizes to the empty string.

use golem_lexicon::expand_contraction;

/// Wildcard glyphs that survive punctuation stripping.
const WILDCARD_GLYPHS: &[char] = &['*', '_', '^', '#', '$'];

/// Produce the canonical matching form of a pattern or input.
///
/// Idempotent: `normalize(normalize(s)) == normalize(s)`.
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());

    for piece in split_preserved(text) {
        match piece {
            Piece::Preserved(span) => {
                out.push(' ');
                out.push_str(span);
                out.push(' ');
            }
            Piece::Plain(span) => normalize_plain(span, &mut out),
        }
    }

    collapse_whitespace(&out)
}

/// A segment of input: either a preserved collection reference or plain text.
enum Piece<'a> {
    Preserved(&'a str),
    Plain(&'a str),
}

/// Split out literal `<set>…</set>` and `<topic>…</topic>` spans so they
/// bypass normalization verbatim.
fn split_preserved(text: &str) -> Vec<Piece<'_>> {
    let mut pieces = Vec::new();
    let bytes = text.as_bytes();
    let mut plain_start = 0;
    let mut pos = 0;

    while pos < bytes.len() {
        if bytes[pos] == b'<' {
            if let Some(end) = preserved_span_end(text, pos) {
                if plain_start < pos {
                    pieces.push(Piece::Plain(&text[plain_start..pos]));
                }
                pieces.push(Piece::Preserved(&text[pos..end]));
                pos = end;
                plain_start = end;
                continue;
            }
        }
        pos += 1;
    }
    if plain_start < text.len() {
        pieces.push(Piece::Plain(&text[plain_start..]));
    }
    pieces
}

/// If `text[pos..]` opens a `<set>` or `<topic>` reference, return the byte
/// offset one past its close tag.
fn preserved_span_end(text: &str, pos: usize) -> Option<usize> {
    let rest = &text[pos..];
    for tag in ["set", "topic"] {
        let open = format!("<{}>", tag);
        let close = format!("</{}>", tag);
        if starts_with_ignore_case(rest, &open) {
            let body_start = open.len();
            if let Some(rel) = find_ignore_case(&rest[body_start..], &close) {
                return Some(pos + body_start + rel + close.len());
            }
        }
    }
    None
}

// Byte-based ASCII case folding: never slices inside a multibyte char.
fn starts_with_ignore_case(haystack: &str, prefix: &str) -> bool {
    haystack.len() >= prefix.len()
        && haystack.as_bytes()[..prefix.len()].eq_ignore_ascii_case(prefix.as_bytes())
}

fn find_ignore_case(haystack: &str, needle: &str) -> Option<usize> {
    if needle.is_empty() || haystack.len() < needle.len() {
        return None;
    }
    let haystack_bytes = haystack.as_bytes();
    let needle_bytes = needle.as_bytes();
    (0..=haystack_bytes.len() - needle_bytes.len())
        .find(|&i| haystack_bytes[i..i + needle_bytes.len()].eq_ignore_ascii_case(needle_bytes))
}

/// Normalize a plain-text segment into `out`: contraction expansion,
/// uppercasing, punctuation stripping.
fn normalize_plain(span: &str, out: &mut String) {
    let mut word = String::new();

    let mut flush = |word: &mut String, out: &mut String| {
        if word.is_empty() {
            return;
        }
        match expand_contraction(word) {
            Some(expanded) => {
                for ch in expanded.chars() {
                    out.extend(ch.to_uppercase());
                }
            }
            None => {
                // Unknown apostrophes vanish without a break: "john's" → JOHNS
                for ch in word.chars().filter(|c| *c != '\'') {
                    out.extend(ch.to_uppercase());
                }
            }
        }
        word.clear();
    };

    for ch in span.chars() {
        if ch.is_alphanumeric() || ch == '\'' {
            word.extend(ch.to_lowercase());
        } else {
            flush(&mut word, out);
            if WILDCARD_GLYPHS.contains(&ch) {
                out.push(ch);
            } else {
                // Whitespace and remaining punctuation both become a word break.
                out.push(' ');
            }
        }
    }
    flush(&mut word, out);
}

/// Collapse whitespace runs to single spaces and trim the ends.
pub fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_space = true;
    for ch in text.chars() {
        if ch.is_whitespace() {
            if !in_space {
                out.push(' ');
                in_space = true;
            }
        } else {
            out.push(ch);
            in_space = false;
        }
    }
    while out.ends_with(' ') {
        out.pop();
    }
    out
}

// ============================================================================
// Lossy-with-recovery preprocessor
// ============================================================================

/// Text with sensitive spans swapped for placeholders, plus the mapping
/// needed to restore them.
#[derive(Debug, Clone)]
pub struct Protected {
    /// The text with `__KIND_i__` placeholders substituted in.
    pub text: String,
    spans: Vec<(String, String)>,
}

impl Protected {
    /// Restore every protected span. Placeholder matching is
    /// case-insensitive so the mapping survives case transforms applied in
    /// between.
    pub fn denormalize(&self, text: &str) -> String {
        let mut out = text.to_string();
        for (placeholder, original) in &self.spans {
            out = replace_ignore_case(&out, placeholder, original);
        }
        out
    }

    /// Number of spans that were protected.
    pub fn span_count(&self) -> usize {
        self.spans.len()
    }
}

fn replace_ignore_case(text: &str, needle: &str, replacement: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(i) = find_ignore_case(rest, needle) {
        out.push_str(&rest[..i]);
        out.push_str(replacement);
        rest = &rest[i + needle.len()..];
    }
    out.push_str(rest);
    out
}

/// Shield quoted spans, URLs, emails, balanced math expressions, and `<…>`
/// tags behind unique placeholders.
pub fn protect(input: &str) -> Protected {
    let mut text = String::with_capacity(input.len());
    let mut spans = Vec::new();
    let mut counter = 0usize;

    let chars: Vec<char> = input.chars().collect();
    let mut i = 0;
    let mut at_word_start = true;

    let mut shield = |kind: &str, original: &str, text: &mut String, spans: &mut Vec<(String, String)>| {
        let placeholder = format!("__{}_{}__", kind, counter);
        counter += 1;
        text.push_str(&placeholder);
        spans.push((placeholder, original.to_string()));
    };

    while i < chars.len() {
        let ch = chars[i];

        if ch == '"' {
            if let Some(close) = chars[i + 1..].iter().position(|c| *c == '"') {
                let original: String = chars[i..=i + 1 + close].iter().collect();
                shield("QUOTE", &original, &mut text, &mut spans);
                i += close + 2;
                at_word_start = true;
                continue;
            }
        }

        if ch == '<' && i + 1 < chars.len() {
            let next = chars[i + 1];
            if next.is_ascii_alphabetic() || next == '/' || next == '!' || next == '?' {
                if let Some(close) = chars[i + 1..].iter().position(|c| *c == '>') {
                    let original: String = chars[i..=i + 1 + close].iter().collect();
                    shield("TAG", &original, &mut text, &mut spans);
                    i += close + 2;
                    at_word_start = true;
                    continue;
                }
            }
        }

        if at_word_start {
            if let Some(len) = url_length(&chars[i..]) {
                let original: String = chars[i..i + len].iter().collect();
                shield("URL", &original, &mut text, &mut spans);
                i += len;
                at_word_start = true;
                continue;
            }
            if let Some(len) = email_length(&chars[i..]) {
                let original: String = chars[i..i + len].iter().collect();
                shield("EMAIL", &original, &mut text, &mut spans);
                i += len;
                at_word_start = true;
                continue;
            }
            if let Some(len) = math_length(&chars[i..]) {
                let original: String = chars[i..i + len].iter().collect();
                shield("MATH", &original, &mut text, &mut spans);
                i += len;
                at_word_start = true;
                continue;
            }
        }

        text.push(ch);
        at_word_start = !ch.is_alphanumeric();
        i += 1;
    }

    Protected { text, spans }
}

/// Length of a URL starting at the head of `chars`, if one starts there.
fn url_length(chars: &[char]) -> Option<usize> {
    let head: String = chars.iter().take(8).collect();
    let lower = head.to_lowercase();
    if !(lower.starts_with("http://") || lower.starts_with("https://") || lower.starts_with("www."))
    {
        return None;
    }
    let len = chars
        .iter()
        .position(|c| c.is_whitespace() || *c == '"' || *c == '<')
        .unwrap_or(chars.len());
    // Trailing sentence punctuation belongs to the prose, not the URL.
    let mut end = len;
    while end > 0 && matches!(chars[end - 1], '.' | ',' | '!' | '?' | ';' | ')') {
        end -= 1;
    }
    (end > 4).then_some(end)
}

/// Length of an email address starting at the head of `chars`.
fn email_length(chars: &[char]) -> Option<usize> {
    let is_local = |c: char| c.is_alphanumeric() || matches!(c, '.' | '_' | '%' | '+' | '-');
    let is_domain = |c: char| c.is_alphanumeric() || matches!(c, '.' | '-');

    let local_len = chars.iter().take_while(|c| is_local(**c)).count();
    if local_len == 0 || chars.get(local_len) != Some(&'@') {
        return None;
    }
    let domain = &chars[local_len + 1..];
    let domain_len = domain.iter().take_while(|c| is_domain(**c)).count();
    let mut end = domain_len;
    while end > 0 && domain[end - 1] == '.' {
        end -= 1;
    }
    let domain_str: String = domain[..end].iter().collect();
    if end == 0 || !domain_str.contains('.') {
        return None;
    }
    Some(local_len + 1 + end)
}

/// Length of a balanced arithmetic expression starting at the head of
/// `chars`. Requires at least one digit, one operator, and balanced parens.
fn math_length(chars: &[char]) -> Option<usize> {
    if !(chars[0].is_ascii_digit() || chars[0] == '(') {
        return None;
    }
    let mut depth = 0i32;
    let mut has_digit = false;
    let mut has_operator = false;
    let mut len = 0;

    for &c in chars {
        match c {
            '0'..='9' => has_digit = true,
            '+' | '-' | '*' | '/' | '%' => has_operator = true,
            '(' => depth += 1,
            ')' => {
                if depth == 0 {
                    break;
                }
                depth -= 1;
            }
            ' ' | '.' => {}
            _ => break,
        }
        len += 1;
    }
    if depth != 0 {
        return None;
    }
    // Trim stray trailing separators so "1 + 2. Next" keeps its period.
    while len > 0 && matches!(chars[len - 1], ' ' | '.' | '+' | '-' | '*' | '/' | '%') {
        len -= 1;
    }
    (has_digit && has_operator && len >= 3).then_some(len)
}
