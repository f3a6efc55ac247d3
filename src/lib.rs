//! # Sitemapper
//!
//! Writes sitemap XML files for a list of URLs while respecting the two
//! limits crawlers impose on a single file: a maximum number of URL entries
//! and a maximum size in bytes. When the input does not fit in one file the
//! output is split into numbered parts and a sitemap index is written under
//! the usual name, so there is always exactly one entry point.
//!
//! # Architecture: Format → Budget → Write → Finalize
//!
//! Entries flow through the generator one at a time:
//!
//! ```text
//! UrlEntry ─▶ node::format_url ─▶ Budget::can_fit ─▶ DocumentWriter::append
//!                                        │
//!                                        └─ no: seal part, open next part
//!
//! close() ─▶ seal last part ─▶ index::finalize (rename, maybe write index)
//! ```
//!
//! ```rust
//! use sitemapper::{Generator, MemoryStorage, Options, UrlEntry};
//!
//! let options = Options {
//!     base_url: "https://example.com/".into(),
//!     max_entries_per_file: 2,
//!     ..Options::default()
//! };
//! let storage = MemoryStorage::new();
//! let mut generator = Generator::with_storage(options, storage.clone());
//! generator.open()?;
//! for path in ["/", "/about", "/contact"] {
//!     generator.add(&UrlEntry::new(format!("https://example.com{path}")))?;
//! }
//! let summary = generator.close()?;
//!
//! assert_eq!(summary.entry_point().name, "sitemap.xml");
//! assert_eq!(storage.file_names(), ["sitemap-1.xml", "sitemap-2.xml", "sitemap.xml"]);
//! # Ok::<(), sitemapper::GeneratorError>(())
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`types`] | URL, image, and alternate-link entries supplied by callers |
//! | [`node`] | Renders an entry as a `<url>` fragment, with XML escaping |
//! | [`budget`] | Byte and entry accounting for the open part |
//! | [`document`] | Header/footer text and the single-sink document writer |
//! | [`generator`] | `open → add* → close` state machine, part rotation |
//! | [`index`] | Final file names, the sitemap index, the run summary |
//! | [`storage`] | Where bytes go: filesystem or memory |
//! | [`config`] | `Options`, validation, layered `sitemap.toml` loading |
//! | [`input`] | URL list readers used by the CLI |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## The Footer Is Paid For Up Front
//!
//! A part is charged for its header when it is opened, and every fit check
//! reserves the footer. Sealing therefore never needs room that is not
//! there, and a sealed part is never larger than `max_bytes_per_file`.
//!
//! ## Two-Phase Naming
//!
//! Whether the output is one file or many is only known at `close()`. Parts
//! are written under temporary names, sealed, and only then renamed; the
//! final step touches file names and the small index, never part contents.
//!
//! ## Entries Are Never Split
//!
//! A `<url>` element that cannot fit even an empty part is an error, not a
//! reason to write a partial element. The run is aborted and the caller
//! decides whether to raise the limit or shrink the entry.

pub mod budget;
pub mod config;
pub mod document;
pub mod generator;
pub mod index;
pub mod input;
pub mod node;
pub mod output;
pub mod storage;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use config::{ConfigError, Options};
pub use document::{IMAGE_NAMESPACE, SITEMAP_NAMESPACE, XHTML_NAMESPACE};
pub use generator::{Generator, GeneratorError, write_sitemaps, write_sitemaps_with_storage};
pub use index::{GenerationSummary, OutputFile};
pub use storage::{FsStorage, MemoryStorage, Storage, StorageError};
pub use types::{AlternateLink, ChangeFrequency, ImageEntry, UrlEntry};
