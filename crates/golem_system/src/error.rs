//! IO-layer errors.

use std::fmt;
use std::path::PathBuf;

/// A filesystem or decode failure, with the path that caused it.
#[derive(Debug)]
pub enum SystemError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl SystemError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SystemError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        SystemError::Json {
            path: path.into(),
            source,
        }
    }
}

impl fmt::Display for SystemError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SystemError::Io { path, source } => {
                write!(f, "io error on {}: {}", path.display(), source)
            }
            SystemError::Json { path, source } => {
                write!(f, "invalid json in {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for SystemError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SystemError::Io { source, .. } => Some(source),
            SystemError::Json { source, .. } => Some(source),
        }
    }
}
