//! The generator: formats entries, enforces budgets, rotates parts.
//!
//! ## Lifecycle
//!
//! ```text
//!            open()            close()
//! Unopened ─────────▶ Open ─────────────▶ Closed
//!                      │ ▲
//!                      └─┘ add(entry)
//!
//! any failure in add() or close() ─────▶ Aborted
//! ```
//!
//! A failed `open()` caused by configuration leaves the generator
//! `Unopened`, and no file is created. Once a run is `Aborted` every further
//! call returns [`GeneratorError::InvalidState`]; files already written are
//! left where they are.
//!
//! ## Rotation
//!
//! For each entry the formatted fragment is checked against the
//! [`Budget`]. If it does not fit the current part, that part is sealed and
//! the next one is opened before appending. A fragment that would not fit
//! even an empty part is rejected with [`GeneratorError::EntryTooLarge`];
//! entries are never split across files.

use crate::budget::Budget;
use crate::config::{ConfigError, Options};
use crate::document::{self, DocumentWriter, Root};
use crate::index::{self, GenerationSummary, SealedPart};
use crate::node;
use crate::storage::{FsStorage, Storage, StorageError};
use crate::types::UrlEntry;
use std::mem;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error(
        "Entry too large: {location} needs {needed} bytes but a sitemap file has room for {available}"
    )]
    EntryTooLarge {
        location: String,
        needed: usize,
        available: usize,
    },
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("Finalize failed: {0}")]
    Finalize(#[source] StorageError),
    #[error("Invalid state: cannot {operation} a generator that is {state}")]
    InvalidState {
        operation: &'static str,
        state: &'static str,
    },
}

/// Mutable state of one run. Exists only while the generator is open.
struct GenerationRun<W: std::io::Write> {
    budget: Budget,
    header: String,
    current: DocumentWriter<W>,
    /// Sequence number of `current`, starting at 1.
    sequence: usize,
    sealed: Vec<SealedPart>,
}

impl<W: std::io::Write> GenerationRun<W> {
    fn start<S>(storage: &S, options: &Options, budget: Budget) -> Result<Self, StorageError>
    where
        S: Storage<Sink = W>,
    {
        let header = document::header(Root::UrlSet, &options.extra_namespaces);
        let name = index::temp_part_name(&options.base_filename, 1);
        let current = DocumentWriter::open(storage, &name, Root::UrlSet, &header)?;
        Ok(Self {
            budget,
            header,
            current,
            sequence: 1,
            sealed: Vec::new(),
        })
    }

    fn push<S>(
        mut self,
        storage: &S,
        options: &Options,
        entry: &UrlEntry,
    ) -> Result<Self, GeneratorError>
    where
        S: Storage<Sink = W>,
    {
        let fragment = node::format_url(entry);
        if !self.budget.fits_empty_part(fragment.len()) {
            return Err(GeneratorError::EntryTooLarge {
                location: entry.location.clone(),
                needed: fragment.len(),
                available: self.budget.entry_capacity().unwrap_or(usize::MAX),
            });
        }
        if !self.budget.can_fit(self.current.usage(), fragment.len()) {
            self = self.rotate(storage, options)?;
        }
        self.current.append(&fragment)?;
        Ok(self)
    }

    fn rotate<S>(mut self, storage: &S, options: &Options) -> Result<Self, StorageError>
    where
        S: Storage<Sink = W>,
    {
        let document = self.current.seal(storage)?;
        self.sealed.push(SealedPart {
            sequence: self.sequence,
            document,
        });
        self.sequence += 1;
        tracing::debug!(part = self.sequence, "rotating to next sitemap part");
        let name = index::temp_part_name(&options.base_filename, self.sequence);
        self.current = DocumentWriter::open(storage, &name, Root::UrlSet, &self.header)?;
        Ok(self)
    }

    fn finish<S>(mut self, storage: &S) -> Result<Vec<SealedPart>, StorageError>
    where
        S: Storage<Sink = W>,
    {
        let document = self.current.seal(storage)?;
        self.sealed.push(SealedPart {
            sequence: self.sequence,
            document,
        });
        Ok(self.sealed)
    }
}

enum State<W: std::io::Write> {
    Unopened,
    Open(GenerationRun<W>),
    Closed,
    Aborted,
}

impl<W: std::io::Write> State<W> {
    fn name(&self) -> &'static str {
        match self {
            Self::Unopened => "not opened",
            Self::Open(_) => "already open",
            Self::Closed => "closed",
            Self::Aborted => "aborted",
        }
    }
}

/// Writes URL entries into one or more sitemap files.
///
/// Drive it from a single owner: [`open`](Self::open), any number of
/// [`add`](Self::add) calls, then [`close`](Self::close). Entries appear in
/// the output in the order they were added.
pub struct Generator<S: Storage = FsStorage> {
    options: Options,
    storage: S,
    state: State<S::Sink>,
}

impl Generator<FsStorage> {
    /// A generator writing into `options.output_dir`.
    pub fn new(options: Options) -> Self {
        let storage = FsStorage::new(options.output_dir.clone());
        Self::with_storage(options, storage)
    }
}

impl<S: Storage> Generator<S> {
    pub fn with_storage(options: Options, storage: S) -> Self {
        Self {
            options,
            storage,
            state: State::Unopened,
        }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Validate options and open the first part.
    pub fn open(&mut self) -> Result<(), GeneratorError> {
        if !matches!(self.state, State::Unopened) {
            return Err(self.invalid("open"));
        }
        self.options.validate()?;
        let budget = Budget::from_options(&self.options)?;

        self.state = State::Aborted;
        let run = GenerationRun::start(&self.storage, &self.options, budget)?;
        self.state = State::Open(run);
        Ok(())
    }

    /// Append one entry, rotating to a new part when the current one is full.
    pub fn add(&mut self, entry: &UrlEntry) -> Result<(), GeneratorError> {
        let run = self.take_run("add")?;
        let run = run.push(&self.storage, &self.options, entry)?;
        self.state = State::Open(run);
        Ok(())
    }

    /// Seal the last part and produce the final file layout.
    pub fn close(&mut self) -> Result<GenerationSummary, GeneratorError> {
        let run = self.take_run("close")?;
        let parts = run.finish(&self.storage)?;
        let summary = index::finalize(&self.storage, &self.options, parts)
            .map_err(GeneratorError::Finalize)?;
        self.state = State::Closed;
        Ok(summary)
    }

    /// Whether a fragment of `len` bytes fits the current part without rotating.
    ///
    /// Always false when the generator is not open.
    pub fn can_fit(&self, len: usize) -> bool {
        match &self.state {
            State::Open(run) => run.budget.can_fit(run.current.usage(), len),
            _ => false,
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, State::Open(_))
    }

    /// Move the run out of `self`, leaving `Aborted` behind until it is put back.
    fn take_run(
        &mut self,
        operation: &'static str,
    ) -> Result<GenerationRun<S::Sink>, GeneratorError> {
        match mem::replace(&mut self.state, State::Aborted) {
            State::Open(run) => Ok(run),
            other => {
                self.state = other;
                Err(self.invalid(operation))
            }
        }
    }

    fn invalid(&self, operation: &'static str) -> GeneratorError {
        GeneratorError::InvalidState {
            operation,
            state: self.state.name(),
        }
    }
}

/// Write all entries with filesystem storage at `options.output_dir`.
pub fn write_sitemaps<'a>(
    options: Options,
    entries: impl IntoIterator<Item = &'a UrlEntry>,
) -> Result<GenerationSummary, GeneratorError> {
    let storage = FsStorage::new(options.output_dir.clone());
    write_sitemaps_with_storage(storage, options, entries)
}

/// Write all entries through a specific storage (allows dry runs in memory).
pub fn write_sitemaps_with_storage<'a, S: Storage>(
    storage: S,
    options: Options,
    entries: impl IntoIterator<Item = &'a UrlEntry>,
) -> Result<GenerationSummary, GeneratorError> {
    let mut generator = Generator::with_storage(options, storage);
    generator.open()?;
    for entry in entries {
        generator.add(entry)?;
    }
    generator.close()
}
