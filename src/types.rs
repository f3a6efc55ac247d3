//! Value types describing the URLs that go into a sitemap.
//!
//! Entries are plain immutable data supplied by the caller. The generator
//! borrows them, formats them, and never mutates them. The serde field names
//! follow the sitemap protocol tags so JSON input reads like the XML it
//! produces (`loc`, `changefreq`, `lastmod`, ...).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How frequently a page is likely to change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeFrequency {
    Always,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Never,
}

impl ChangeFrequency {
    /// The protocol token written inside `<changefreq>`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Always => "always",
            Self::Hourly => "hourly",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
            Self::Never => "never",
        }
    }
}

impl fmt::Display for ChangeFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not one of the seven change frequencies.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid change frequency: {0:?}")]
pub struct ParseChangeFrequencyError(String);

impl FromStr for ChangeFrequency {
    type Err = ParseChangeFrequencyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "always" => Ok(Self::Always),
            "hourly" => Ok(Self::Hourly),
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            "yearly" => Ok(Self::Yearly),
            "never" => Ok(Self::Never),
            _ => Err(ParseChangeFrequencyError(s.to_string())),
        }
    }
}

/// One `<url>` entry.
///
/// Optional text fields are rendered only when present and non-empty, so
/// `Some(String::new())` behaves the same as `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UrlEntry {
    /// Absolute URL of the page.
    #[serde(rename = "loc")]
    pub location: String,
    #[serde(rename = "changefreq", default, skip_serializing_if = "Option::is_none")]
    pub change_frequency: Option<ChangeFrequency>,
    /// Free-form date, written as given (usually W3C datetime).
    #[serde(rename = "lastmod", default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<ImageEntry>,
    #[serde(rename = "alternates", default, skip_serializing_if = "Vec::is_empty")]
    pub alternate_links: Vec<AlternateLink>,
}

impl UrlEntry {
    /// An entry with only a location set.
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            ..Self::default()
        }
    }

    pub fn with_change_frequency(mut self, frequency: ChangeFrequency) -> Self {
        self.change_frequency = Some(frequency);
        self
    }

    pub fn with_last_modified(mut self, value: impl Into<String>) -> Self {
        self.last_modified = Some(value.into());
        self
    }

    pub fn with_priority(mut self, value: impl Into<String>) -> Self {
        self.priority = Some(value.into());
        self
    }

    pub fn with_image(mut self, image: ImageEntry) -> Self {
        self.images.push(image);
        self
    }

    pub fn with_alternate(mut self, link: AlternateLink) -> Self {
        self.alternate_links.push(link);
        self
    }
}

/// An `<image:image>` block nested in a URL entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ImageEntry {
    #[serde(rename = "loc")]
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geo_location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// URL of the image license.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
}

impl ImageEntry {
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            ..Self::default()
        }
    }
}

/// An `<xhtml:link rel="alternate">` pointing at a translated page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AlternateLink {
    #[serde(rename = "href")]
    pub url: String,
    #[serde(rename = "hreflang")]
    pub language_code: String,
}

impl AlternateLink {
    pub fn new(url: impl Into<String>, language_code: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            language_code: language_code.into(),
        }
    }
}
