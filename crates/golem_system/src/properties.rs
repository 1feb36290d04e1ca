//! Bot properties file: `key=value` lines.

use std::path::Path;

use crate::error::SystemError;
use crate::file::read_file;

/// Parse properties text. `#`-prefixed lines and blanks are ignored; the
/// first `=` splits key from value; lines without `=` are skipped.
pub fn parse_properties(text: &str) -> Vec<(String, String)> {
    let mut out = Vec::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some((key, value)) = line.split_once('=') {
            out.push((key.trim().to_string(), value.trim().to_string()));
        }
    }
    out
}

/// Load and parse a properties file.
pub fn load_properties_file(path: &Path) -> Result<Vec<(String, String)>, SystemError> {
    Ok(parse_properties(&read_file(path)?))
}
