//! Where sitemap files are written.
//!
//! - **Backend**: [`Storage`] trait + [`StorageError`]
//! - **Filesystem**: [`FsStorage`], rooted at the configured output directory
//! - **Memory**: [`MemoryStorage`], used by `check` dry runs and tests

pub mod backend;
mod fs_backend;
mod memory;

pub use backend::{Storage, StorageError};
pub use fs_backend::FsStorage;
pub use memory::{MemorySink, MemoryStorage};
