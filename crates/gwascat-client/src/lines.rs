//! Identifier lists read from line-delimited text.

use std::path::Path;

use gwascat_common::Result;
use tracing::debug;

/// One identifier per line, surrounding whitespace trimmed, blank lines
/// skipped.
pub fn parse_identifiers(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

pub fn read_identifiers(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)?;
    let ids = parse_identifiers(&content);
    debug!(path = %path.display(), count = ids.len(), "Read identifiers");
    Ok(ids)
}
