//! Filesystem primitives: reads with path context and extension-filtered
//! directory walks.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::SystemError;

/// Read a file to a string, attaching the path to any failure.
pub fn read_file(path: &Path) -> Result<String, SystemError> {
    fs::read_to_string(path).map_err(|e| SystemError::io(path, e))
}

/// Immediate children of `dir` with the given extension (no dot), sorted by
/// file name so load order is deterministic across platforms.
pub fn files_with_extension(dir: &Path, extension: &str) -> Result<Vec<PathBuf>, SystemError> {
    let entries = fs::read_dir(dir).map_err(|e| SystemError::io(dir, e))?;
    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| SystemError::io(dir, e))?;
        let path = entry.path();
        if path.is_file()
            && path
                .extension()
                .map(|e| e.eq_ignore_ascii_case(extension))
                .unwrap_or(false)
        {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Collection name for a file: the basename without extension.
pub fn collection_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn walks_by_extension_sorted() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.aiml", "a.aiml", "c.json", "notes.txt"] {
            let mut f = fs::File::create(dir.path().join(name)).unwrap();
            writeln!(f, "x").unwrap();
        }
        let files = files_with_extension(dir.path(), "aiml").unwrap();
        let names: Vec<String> = files.iter().map(|p| collection_name(p)).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn missing_file_carries_path() {
        let err = read_file(Path::new("/no/such/file.aiml")).unwrap_err();
        assert!(err.to_string().contains("/no/such/file.aiml"));
    }
}
