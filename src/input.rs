//! Reading URL lists for the command line.
//!
//! Two formats are accepted, chosen by file extension:
//!
//! - **`.json`**: an array of entries using the protocol field names
//!   (`loc`, `changefreq`, `lastmod`, `priority`, `images`, `alternates`).
//! - **anything else**: one location per line. Blank lines and lines
//!   starting with `#` are skipped; surrounding whitespace is trimmed.
//!
//! ```text
//! # urls.txt
//! https://example.com/
//! https://example.com/about
//! ```

use crate::types::UrlEntry;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Entry {index} has an empty loc")]
    EmptyLocation { index: usize },
}

/// Load entries from a file, picking the format from its extension.
pub fn load_entries(path: &Path) -> Result<Vec<UrlEntry>, InputError> {
    let content = fs::read_to_string(path)?;
    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));
    if is_json {
        parse_json(&content)
    } else {
        Ok(parse_lines(&content))
    }
}

/// Parse a JSON array of entries.
pub fn parse_json(content: &str) -> Result<Vec<UrlEntry>, InputError> {
    let entries: Vec<UrlEntry> = serde_json::from_str(content)?;
    if let Some(index) = entries.iter().position(|e| e.location.trim().is_empty()) {
        return Err(InputError::EmptyLocation { index });
    }
    Ok(entries)
}

/// Parse one location per line.
pub fn parse_lines(content: &str) -> Vec<UrlEntry> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(UrlEntry::new)
        .collect()
}
