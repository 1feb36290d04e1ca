//! Error types for the language layer.
//!
//! Everything here is a load-time error: a pattern that violates the grammar
//! rules, a template whose markup does not nest, or an AIML document missing
//! its required structure. Runtime lookup misses are not errors anywhere in
//! golem - they degrade to the empty string at the evaluation layer.

use std::fmt;

/// A markup fragment failed to parse.
///
/// Display format: `{message} at byte {offset}`.
#[derive(Debug, Clone)]
pub struct MarkupError {
    /// Human-readable description of the failure.
    pub message: String,
    /// Byte offset into the fragment where the failure was detected.
    pub offset: usize,
}

impl MarkupError {
    pub fn new(message: impl Into<String>, offset: usize) -> Self {
        Self {
            message: message.into(),
            offset,
        }
    }
}

impl fmt::Display for MarkupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at byte {}", self.message, self.offset)
    }
}

impl std::error::Error for MarkupError {}

/// Why a pattern was rejected at load time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternErrorKind {
    /// Pattern is empty after normalization.
    Empty,
    /// Pattern begins with a wildcard token.
    LeadingWildcard,
    /// Two wildcard tokens are adjacent (`* *`, `*_`, `__`, ...).
    AdjacentWildcards,
    /// More than the allowed number of wildcard tokens.
    TooManyWildcards,
}

impl PatternErrorKind {
    fn describe(self) -> &'static str {
        match self {
            PatternErrorKind::Empty => "pattern is empty",
            PatternErrorKind::LeadingWildcard => "pattern begins with a wildcard",
            PatternErrorKind::AdjacentWildcards => "pattern contains adjacent wildcards",
            PatternErrorKind::TooManyWildcards => "pattern exceeds the wildcard limit",
        }
    }
}

/// A pattern that violates the grammar rules of the matcher.
///
/// The offending category is rejected and reported; loading continues with
/// the remaining categories.
#[derive(Debug, Clone)]
pub struct PatternError {
    pub kind: PatternErrorKind,
    /// The normalized pattern text that was rejected.
    pub pattern: String,
}

impl PatternError {
    pub fn new(kind: PatternErrorKind, pattern: impl Into<String>) -> Self {
        Self {
            kind,
            pattern: pattern.into(),
        }
    }
}

impl fmt::Display for PatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: '{}'", self.kind.describe(), self.pattern)
    }
}

impl std::error::Error for PatternError {}

/// An AIML document failed structural validation.
#[derive(Debug)]
pub enum AimlError {
    /// The document markup itself does not parse.
    Markup(MarkupError),
    /// No `<aiml>` root element.
    MissingRoot,
    /// The root element has no `version` attribute.
    MissingVersion,
    /// The document contains no `<category>` elements.
    NoCategories,
    /// A fragment handed to the learner contained no `<category>` elements.
    NoLearnableCategories,
    /// A `<category>` is missing a required child.
    IncompleteCategory {
        /// Which child was missing (`pattern` or `template`).
        missing: &'static str,
    },
}

impl fmt::Display for AimlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AimlError::Markup(e) => write!(f, "malformed markup: {}", e),
            AimlError::MissingRoot => write!(f, "document has no <aiml> root element"),
            AimlError::MissingVersion => write!(f, "<aiml> root is missing the version attribute"),
            AimlError::NoCategories => write!(f, "document contains no categories"),
            AimlError::NoLearnableCategories => {
                write!(f, "learn body contains no <category> elements")
            }
            AimlError::IncompleteCategory { missing } => {
                write!(f, "category is missing its <{}>", missing)
            }
        }
    }
}

impl std::error::Error for AimlError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AimlError::Markup(e) => Some(e),
            _ => None,
        }
    }
}

impl From<MarkupError> for AimlError {
    fn from(e: MarkupError) -> Self {
        AimlError::Markup(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats() {
        let e = MarkupError::new("unexpected close tag", 12);
        assert_eq!(e.to_string(), "unexpected close tag at byte 12");

        let p = PatternError::new(PatternErrorKind::LeadingWildcard, "* HELLO");
        assert!(p.to_string().contains("begins with a wildcard"));
        assert!(p.to_string().contains("* HELLO"));

        let a = AimlError::IncompleteCategory { missing: "pattern" };
        assert!(a.to_string().contains("<pattern>"));
    }
}
