//! Per-part byte and entry budgets.
//!
//! A part is charged for everything it will contain: the header is counted
//! as soon as the part is opened, each entry adds its fragment length, and
//! the footer is reserved up front so sealing can never push a part over
//! the limit. With `H` the header length and `F` the footer length, a part
//! holding fragments `f1..fn` has size `H + Σ len(fi) + F`, which is never
//! more than `max_bytes`.
//!
//! A limit of zero means unlimited.

use crate::config::{ConfigError, Options};
use crate::document::{self, Root};

/// What the currently open part already holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PartUsage {
    /// Bytes written so far, header included.
    pub bytes: usize,
    pub entries: usize,
}

/// Validated limits for one generation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Budget {
    max_bytes: Option<usize>,
    max_entries: Option<usize>,
    header_len: usize,
    footer_len: usize,
}

impl Budget {
    /// Validate raw limits against the header and footer they must hold.
    pub fn new(
        max_bytes: i64,
        max_entries: i64,
        header_len: usize,
        footer_len: usize,
    ) -> Result<Self, ConfigError> {
        let max_entries = usize::try_from(max_entries).map_err(|_| {
            ConfigError::Validation(format!(
                "max_entries_per_file must be zero or positive, got {max_entries}"
            ))
        })?;
        let max_bytes = usize::try_from(max_bytes).map_err(|_| {
            ConfigError::Validation(format!(
                "max_bytes_per_file must be zero or positive, got {max_bytes}"
            ))
        })?;
        let minimum = header_len + footer_len;
        if max_bytes != 0 && max_bytes < minimum {
            return Err(ConfigError::Validation(format!(
                "max_bytes_per_file is {max_bytes} but an empty sitemap needs {minimum} bytes"
            )));
        }
        Ok(Self {
            max_bytes: (max_bytes != 0).then_some(max_bytes),
            max_entries: (max_entries != 0).then_some(max_entries),
            header_len,
            footer_len,
        })
    }

    /// Budget for urlset parts under the given options.
    pub fn from_options(options: &Options) -> Result<Self, ConfigError> {
        let header = document::header(Root::UrlSet, &options.extra_namespaces);
        Self::new(
            options.max_bytes_per_file,
            options.max_entries_per_file,
            header.len(),
            Root::UrlSet.footer().len(),
        )
    }

    /// Whether a fragment of `candidate` bytes can go into a part with `usage`.
    pub fn can_fit(&self, usage: PartUsage, candidate: usize) -> bool {
        let bytes_fit = match self.max_bytes {
            Some(max) => usage.bytes + candidate + self.footer_len <= max,
            None => true,
        };
        let entries_fit = match self.max_entries {
            Some(max) => usage.entries < max,
            None => true,
        };
        bytes_fit && entries_fit
    }

    /// Whether a fragment fits into a freshly opened, empty part.
    ///
    /// When this is false the fragment can never be written.
    pub fn fits_empty_part(&self, candidate: usize) -> bool {
        self.can_fit(
            PartUsage {
                bytes: self.header_len,
                entries: 0,
            },
            candidate,
        )
    }

    /// Largest fragment an empty part accepts, or `None` when unbounded.
    pub fn entry_capacity(&self) -> Option<usize> {
        self.max_bytes
            .map(|max| max - self.header_len - self.footer_len)
    }

    pub fn max_bytes(&self) -> Option<usize> {
        self.max_bytes
    }

    pub fn max_entries(&self) -> Option<usize> {
        self.max_entries
    }
}
