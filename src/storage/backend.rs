//! Storage trait and shared error type.
//!
//! The [`Storage`] trait is the only thing the generator knows about where
//! bytes end up. It models a conventional filesystem reduced to the four
//! operations the writer needs: create a sink, close it, rename a closed
//! file, and read one back.
//!
//! The production implementation is [`FsStorage`](super::FsStorage).
//! [`MemoryStorage`](super::MemoryStorage) keeps everything in memory for dry
//! runs and tests.

use std::io::Write;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("File not found: {0}")]
    NotFound(String),
}

/// A place to write named files sequentially.
///
/// Names are plain file names relative to the storage root. A sink is
/// written with [`std::io::Write`] and must be handed back to
/// [`close`](Storage::close) before the file is considered complete.
pub trait Storage {
    type Sink: Write;

    /// Create (or truncate) a file and return a sink positioned at its start.
    fn create(&self, name: &str) -> Result<Self::Sink, StorageError>;

    /// Flush and close a sink. The file is immutable afterwards.
    fn close(&self, sink: Self::Sink) -> Result<(), StorageError>;

    /// Rename a closed file. An existing destination is replaced.
    fn rename(&self, from: &str, to: &str) -> Result<(), StorageError>;

    /// Read a closed file back as UTF-8.
    fn read_to_string(&self, name: &str) -> Result<String, StorageError>;
}
