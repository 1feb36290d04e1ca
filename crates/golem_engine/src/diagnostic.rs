//! Load-time reporting.
//!
//! Loading is forgiving per category: an invalid pattern rejects that one
//! category with a diagnostic while the rest of the source loads. The
//! report carries both counts so callers can decide whether a partially
//! loaded knowledge base is acceptable.

use std::fmt;

/// One rejected item and why.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// Originating source: a file path or "<string>".
    pub source: String,
    pub detail: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.source, self.detail)
    }
}

/// Outcome of a load operation.
#[derive(Debug, Default, Clone)]
pub struct LoadReport {
    /// Categories (or files, for collection directories) installed.
    pub loaded: usize,
    pub rejected: Vec<Diagnostic>,
}

impl LoadReport {
    pub fn merge(&mut self, other: LoadReport) {
        self.loaded += other.loaded;
        self.rejected.extend(other.rejected);
    }
}
