//! Pattern compilation, validation, and static priority.
//!
//! Patterns are normalized, tokenized, validated against the load-time
//! grammar rules, and assigned a static priority score. Matching happens in
//! [`crate::matcher`]; candidates are tried in descending score order so the
//! most specific pattern always wins.

use crate::error::{PatternError, PatternErrorKind};
use crate::normalize::normalize;
use crate::token::{PatternToken, WildKind};

/// Exact-literal (`$`) bonus. Forces "exact match at this position" to win
/// ties against wildcard alternatives.
const DOLLAR_BONUS: u32 = 50;

/// Maximum wildcard tokens allowed in one pattern.
pub const MAX_WILDCARDS: usize = 10;

/// A validated, scored pattern ready for matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledPattern {
    tokens: Vec<PatternToken>,
    text: String,
    priority: u32,
}

impl CompiledPattern {
    /// Normalize, tokenize, validate, and score a raw pattern.
    pub fn compile(raw: &str) -> Result<Self, PatternError> {
        let text = normalize(raw);
        if text.is_empty() {
            return Err(PatternError::new(PatternErrorKind::Empty, text));
        }

        let tokens: Vec<PatternToken> = text.split(' ').map(parse_token).collect();

        if tokens[0].is_wildcard() {
            return Err(PatternError::new(PatternErrorKind::LeadingWildcard, text));
        }
        if tokens.windows(2).any(|w| w[0].is_wildcard() && w[1].is_wildcard()) {
            return Err(PatternError::new(PatternErrorKind::AdjacentWildcards, text));
        }
        let wildcard_count = tokens.iter().filter(|t| t.is_wildcard()).count();
        if wildcard_count > MAX_WILDCARDS {
            return Err(PatternError::new(PatternErrorKind::TooManyWildcards, text));
        }

        let priority = score(&tokens, wildcard_count);
        Ok(Self {
            tokens,
            text,
            priority,
        })
    }

    /// The token sequence.
    pub fn tokens(&self) -> &[PatternToken] {
        &self.tokens
    }

    /// The normalized pattern text (index key material).
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Static priority; higher matches first. Ties break by declaration
    /// order at the knowledge-base layer.
    pub fn priority(&self) -> u32 {
        self.priority
    }

    /// The `<topic>` reference embedded in the pattern, if any.
    pub fn topic_hint(&self) -> Option<&str> {
        self.tokens.iter().find_map(|t| match t {
            PatternToken::TopicRef(name) => Some(name.as_str()),
            _ => None,
        })
    }
}

/// `1000 + (10 − wildcards)·100 + Σ bonuses + 5·literal words`.
fn score(tokens: &[PatternToken], wildcard_count: usize) -> u32 {
    let mut bonus = 0u32;
    let mut literal_words = 0u32;
    for token in tokens {
        match token {
            PatternToken::Wild(kind) => bonus += kind.bonus(),
            PatternToken::Exact(_) => {
                bonus += DOLLAR_BONUS;
                literal_words += 1;
            }
            PatternToken::Word(_) | PatternToken::SetRef(_) | PatternToken::TopicRef(_) => {
                literal_words += 1;
            }
        }
    }
    1000 + (MAX_WILDCARDS - wildcard_count) as u32 * 100 + bonus + 5 * literal_words
}

fn parse_token(token: &str) -> PatternToken {
    if let Some(kind) = WildKind::from_token(token) {
        return PatternToken::Wild(kind);
    }
    if let Some(rest) = token.strip_prefix('$') {
        if !rest.is_empty() {
            return PatternToken::Exact(rest.to_string());
        }
    }
    if let Some(name) = strip_ref(token, "<set>", "</set>") {
        return PatternToken::SetRef(name);
    }
    if let Some(name) = strip_ref(token, "<topic>", "</topic>") {
        return PatternToken::TopicRef(name);
    }
    PatternToken::Word(token.to_string())
}

fn strip_ref(token: &str, open: &str, close: &str) -> Option<String> {
    let len = token.len();
    if len > open.len() + close.len()
        && token[..open.len()].eq_ignore_ascii_case(open)
        && token[len - close.len()..].eq_ignore_ascii_case(close)
    {
        Some(token[open.len()..len - close.len()].to_string())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compiles_and_normalizes() {
        let p = CompiledPattern::compile("my name is *").unwrap();
        assert_eq!(p.text(), "MY NAME IS *");
        assert_eq!(p.tokens().len(), 4);
    }

    #[test]
    fn rejects_empty() {
        let err = CompiledPattern::compile("  ?! ").unwrap_err();
        assert_eq!(err.kind, PatternErrorKind::Empty);
    }

    #[test]
    fn rejects_leading_wildcard() {
        let err = CompiledPattern::compile("* hello").unwrap_err();
        assert_eq!(err.kind, PatternErrorKind::LeadingWildcard);
    }

    #[test]
    fn trailing_wildcard_is_fine() {
        assert!(CompiledPattern::compile("hello *").is_ok());
    }

    #[test]
    fn rejects_adjacent_wildcards() {
        for pattern in ["hi * *", "hi * _", "hi _ _", "hi # ^"] {
            let err = CompiledPattern::compile(pattern).unwrap_err();
            assert_eq!(err.kind, PatternErrorKind::AdjacentWildcards, "{}", pattern);
        }
    }

    #[test]
    fn rejects_too_many_wildcards() {
        let pattern = (0..11).map(|i| format!("w{} *", i)).collect::<Vec<_>>().join(" ");
        let err = CompiledPattern::compile(&pattern).unwrap_err();
        assert_eq!(err.kind, PatternErrorKind::TooManyWildcards);
    }

    #[test]
    fn set_and_topic_refs_parse() {
        let p = CompiledPattern::compile("i am <set>emotions</set>").unwrap();
        assert!(matches!(
            p.tokens().last().unwrap(),
            PatternToken::SetRef(name) if name == "emotions"
        ));

        let p = CompiledPattern::compile("chat <topic>sports</topic>").unwrap();
        assert_eq!(p.topic_hint(), Some("sports"));
    }

    #[test]
    fn dollar_promotes_priority() {
        let exact = CompiledPattern::compile("$hello world").unwrap();
        let plain = CompiledPattern::compile("hello world").unwrap();
        assert_eq!(exact.priority(), plain.priority() + DOLLAR_BONUS);
    }

    #[test]
    fn fewer_wildcards_always_outrank() {
        let specific = CompiledPattern::compile("my name is *").unwrap();
        let general = CompiledPattern::compile("my * is *").unwrap();
        assert!(specific.priority() > general.priority());
    }

    #[test]
    fn hash_outranks_star_outranks_underscore() {
        let hash = CompiledPattern::compile("hello #").unwrap();
        let caret = CompiledPattern::compile("hello ^").unwrap();
        let star = CompiledPattern::compile("hello *").unwrap();
        let under = CompiledPattern::compile("hello _").unwrap();
        assert!(hash.priority() > caret.priority());
        assert!(caret.priority() > star.priority());
        assert!(star.priority() > under.priority());
    }
}
