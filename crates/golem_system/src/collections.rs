//! Collection file decoding.
//!
//! Maps are a JSON array of `{"key": …, "value": …}` objects; sets and
//! lists are JSON arrays of strings. The file basename (minus extension)
//! becomes the collection name; the engine owns insertion semantics
//! (uppercasing, dedup), so these functions return the decoded shapes
//! untouched.

use std::path::Path;

use serde::Deserialize;

use crate::error::SystemError;
use crate::file::{collection_name, read_file};

#[derive(Debug, Deserialize)]
struct MapEntry {
    key: String,
    value: String,
}

/// Decode a map file: `(name, key/value pairs)`.
pub fn load_map_file(path: &Path) -> Result<(String, Vec<(String, String)>), SystemError> {
    let text = read_file(path)?;
    let entries: Vec<MapEntry> =
        serde_json::from_str(&text).map_err(|e| SystemError::json(path, e))?;
    Ok((
        collection_name(path),
        entries.into_iter().map(|e| (e.key, e.value)).collect(),
    ))
}

/// Decode a set file: `(name, members)`.
pub fn load_set_file(path: &Path) -> Result<(String, Vec<String>), SystemError> {
    let text = read_file(path)?;
    let members: Vec<String> =
        serde_json::from_str(&text).map_err(|e| SystemError::json(path, e))?;
    Ok((collection_name(path), members))
}

/// Decode a list file: `(name, items)`.
pub fn load_list_file(path: &Path) -> Result<(String, Vec<String>), SystemError> {
    load_set_file(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn decodes_map_set_list() {
        let dir = tempfile::tempdir().unwrap();

        let map_path = dir.path().join("capitals.json");
        fs::write(
            &map_path,
            r#"[{"key": "France", "value": "Paris"}, {"key": "Spain", "value": "Madrid"}]"#,
        )
        .unwrap();
        let (name, entries) = load_map_file(&map_path).unwrap();
        assert_eq!(name, "capitals");
        assert_eq!(entries[1], ("Spain".to_string(), "Madrid".to_string()));

        let set_path = dir.path().join("emotions.json");
        fs::write(&set_path, r#"["happy", "sad"]"#).unwrap();
        let (name, members) = load_set_file(&set_path).unwrap();
        assert_eq!(name, "emotions");
        assert_eq!(members, vec!["happy", "sad"]);

        let list_path = dir.path().join("todo.json");
        fs::write(&list_path, r#"["one"]"#).unwrap();
        let (name, items) = load_list_file(&list_path).unwrap();
        assert_eq!((name.as_str(), items.len()), ("todo", 1));
    }

    #[test]
    fn malformed_json_names_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "{not json").unwrap();
        let err = load_set_file(&path).unwrap_err();
        assert!(err.to_string().contains("bad.json"));
    }
}
