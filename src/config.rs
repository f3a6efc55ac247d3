//! Generator options and `sitemap.toml` loading.
//!
//! Options are layered: stock defaults are overridden by an optional
//! `sitemap.toml`, which is in turn overridden by command-line flags. Each
//! layer is a sparse TOML table merged on top of the previous one, then the
//! result is deserialized and validated.
//!
//! ## Configuration Options
//!
//! ```toml
//! base_url = "https://example.com/"   # Required. Prefix for URLs of generated files
//! output_dir = "."                     # Where sitemap files are written
//! base_filename = "sitemap"            # sitemap.xml, sitemap-1.xml, ...
//! max_entries_per_file = 50000         # 0 = unlimited
//! max_bytes_per_file = 52428800        # 0 = unlimited
//!
//! [extra_namespaces]
//! image = "http://www.google.com/schemas/sitemap-image/1.1"
//! xhtml = "http://www.w3.org/1999/xhtml"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::budget::Budget;
use crate::document;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Maximum number of URLs the sitemap protocol allows in one file.
pub const PROTOCOL_MAX_ENTRIES: i64 = 50_000;
/// Maximum uncompressed size the sitemap protocol allows for one file (50 MiB).
pub const PROTOCOL_MAX_BYTES: i64 = 52_428_800;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Settings for one generation run. Immutable once the run is opened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Options {
    /// Prefix used to build absolute URLs of generated part files.
    pub base_url: String,
    /// Directory the files are written to.
    pub output_dir: PathBuf,
    /// File stem: `{base_filename}.xml`, `{base_filename}-1.xml`, ...
    pub base_filename: String,
    /// URLs per file; zero means unlimited. Signed so bad input is reported, not truncated.
    pub max_entries_per_file: i64,
    /// Bytes per file including header and footer; zero means unlimited.
    pub max_bytes_per_file: i64,
    /// Extra `xmlns:*` attributes for the `<urlset>` root, keyed by prefix.
    pub extra_namespaces: BTreeMap<String, String>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            output_dir: PathBuf::from("."),
            base_filename: "sitemap".to_string(),
            max_entries_per_file: PROTOCOL_MAX_ENTRIES,
            max_bytes_per_file: PROTOCOL_MAX_BYTES,
            extra_namespaces: BTreeMap::new(),
        }
    }
}

impl Options {
    /// Validate values that the type system cannot.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::Validation("base_url must not be empty".into()));
        }
        if self.base_filename.is_empty() {
            return Err(ConfigError::Validation(
                "base_filename must not be empty".into(),
            ));
        }
        if self.base_filename.contains(['/', '\\']) {
            return Err(ConfigError::Validation(format!(
                "base_filename must be a plain name, got {:?}",
                self.base_filename
            )));
        }
        let mut declared: BTreeMap<String, &str> = BTreeMap::new();
        for (key, uri) in &self.extra_namespaces {
            let prefix = document::namespace_prefix(key);
            if !is_ncname(prefix) {
                return Err(ConfigError::Validation(format!(
                    "invalid namespace prefix {key:?}: expected a letter or '_' followed by letters, digits, '-', '_' or '.'"
                )));
            }
            if prefix.eq_ignore_ascii_case("xml") || prefix.eq_ignore_ascii_case("xmlns") {
                return Err(ConfigError::Validation(format!(
                    "namespace prefix {key:?} is reserved"
                )));
            }
            if uri.is_empty() {
                return Err(ConfigError::Validation(format!(
                    "namespace {key:?} has an empty URI"
                )));
            }
            let attribute = document::namespace_attribute(key);
            if let Some(previous) = declared.insert(attribute.clone(), key) {
                return Err(ConfigError::Validation(format!(
                    "namespace keys {previous:?} and {key:?} both declare {attribute}"
                )));
            }
        }
        Budget::from_options(self)?;
        Ok(())
    }

    /// Declare a namespace on the urlset root.
    pub fn with_namespace(mut self, prefix: impl Into<String>, uri: impl Into<String>) -> Self {
        self.extra_namespaces.insert(prefix.into(), uri.into());
        self
    }
}

/// XML `NCName`: a letter or `_`, then letters, digits, `-`, `_` or `.`.
fn is_ncname(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default options as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(Options::default()).expect("default options must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge overlays onto a base value in order, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlays: impl IntoIterator<Item = toml::Value>,
) -> Result<Options, ConfigError> {
    let merged = overlays.into_iter().fold(base, merge_toml);
    let options: Options = merged.try_into()?;
    options.validate()?;
    Ok(options)
}

/// Load options from stock defaults, the config file at `path` (if present),
/// and a final overlay (typically built from command-line flags).
pub fn load_config(path: &Path, overlay: Option<toml::Value>) -> Result<Options, ConfigError> {
    let file = load_raw_config(path)?;
    resolve_config(stock_defaults_value(), file.into_iter().chain(overlay))
}

/// Returns a fully-commented stock `sitemap.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Sitemapper Configuration
# ========================
# Values shown below are the defaults. Only base_url must be set.
# Command-line flags override values from this file.
# Unknown keys will cause an error.

# Prefix for the URLs of generated files, as listed in the sitemap index.
# Usually the public URL of output_dir, with a trailing slash.
base_url = ""

# Directory the sitemap files are written to.
output_dir = "."

# File stem. A single file is written as sitemap.xml; when the URLs do not
# fit in one file they are split into sitemap-1.xml, sitemap-2.xml, ... and
# sitemap.xml becomes an index referencing them.
base_filename = "sitemap"

# ---------------------------------------------------------------------------
# Limits per file (0 = unlimited). Defaults are the sitemap protocol maxima.
# ---------------------------------------------------------------------------
max_entries_per_file = 50000

# Counted in bytes, including the XML declaration and root element.
max_bytes_per_file = 52428800

# ---------------------------------------------------------------------------
# Extension namespaces declared on the <urlset> element.
# Needed when entries carry images or alternate-language links.
# ---------------------------------------------------------------------------
[extra_namespaces]
# image = "http://www.google.com/schemas/sitemap-image/1.1"
# xhtml = "http://www.w3.org/1999/xhtml"
"##
}
