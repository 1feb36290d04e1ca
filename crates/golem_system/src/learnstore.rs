//! Persistence for `<learnf>`-produced categories.
//!
//! The engine hands each learned category's markup to a [`LearnfSink`];
//! [`FileLearnSink`] appends it into an AIML file so the knowledge survives
//! restarts. Persistence failures are the caller's to report - a failed
//! append must not abort the conversational turn that learned the rule.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::SystemError;

/// Receiver for categories that must outlive the process.
pub trait LearnfSink: Send + Sync {
    /// Persist one `<category>…</category>` fragment.
    fn persist(&self, category_xml: &str) -> Result<(), SystemError>;
}

/// Appends learned categories into one AIML file, creating it with an
/// empty `<aiml version="2.0">` skeleton on first use.
#[derive(Debug, Clone)]
pub struct FileLearnSink {
    path: PathBuf,
}

const SKELETON: &str = "<aiml version=\"2.0\">\n</aiml>\n";

impl FileLearnSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LearnfSink for FileLearnSink {
    fn persist(&self, category_xml: &str) -> Result<(), SystemError> {
        let current = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => SKELETON.to_string(),
            Err(e) => return Err(SystemError::io(&self.path, e)),
        };

        let updated = match current.rfind("</aiml>") {
            Some(at) => {
                let mut text = String::with_capacity(current.len() + category_xml.len() + 1);
                text.push_str(&current[..at]);
                text.push_str(category_xml);
                text.push('\n');
                text.push_str(&current[at..]);
                text
            }
            // No closing root; treat the file as a bare fragment list.
            None => format!("{}{}\n", current, category_xml),
        };

        fs::write(&self.path, updated).map_err(|e| SystemError::io(&self.path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_skeleton_and_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("learnf.aiml");
        let sink = FileLearnSink::new(&path);

        sink.persist("<category><pattern>FOO</pattern><template>bar</template></category>")
            .unwrap();
        sink.persist("<category><pattern>BAZ</pattern><template>qux</template></category>")
            .unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("<aiml version=\"2.0\">"));
        assert!(text.trim_end().ends_with("</aiml>"));
        let foo = text.find("FOO").unwrap();
        let baz = text.find("BAZ").unwrap();
        assert!(foo < baz);
    }
}
