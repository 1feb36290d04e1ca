//! Errors that surface to embedders.
//!
//! Only IO failures and per-source document rejections reach the caller.
//! Everything conversational recovers locally: a missed variable is "",
//! an unmatched input is an empty reply, a failed learn is a logged
//! warning.

use std::fmt;

use golem_language::AimlError;
use golem_system::SystemError;

#[derive(Debug)]
pub enum EngineError {
    /// Filesystem or decode failure from the IO layer.
    System(SystemError),
    /// An AIML source failed structural validation and was rejected whole.
    Document {
        /// File path, or "<string>" for in-memory loads.
        source_name: String,
        error: AimlError,
    },
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::System(e) => write!(f, "{}", e),
            EngineError::Document { source_name, error } => {
                write!(f, "rejected {}: {}", source_name, error)
            }
        }
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EngineError::System(e) => Some(e),
            EngineError::Document { error, .. } => Some(error),
        }
    }
}

impl From<SystemError> for EngineError {
    fn from(e: SystemError) -> Self {
        EngineError::System(e)
    }
}
