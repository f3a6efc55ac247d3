//! Filesystem storage rooted at the configured output directory.

use super::backend::{Storage, StorageError};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Writes files into a single directory, creating it on first use.
#[derive(Debug, Clone)]
pub struct FsStorage {
    root: PathBuf,
}

impl FsStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }
}

impl Storage for FsStorage {
    type Sink = BufWriter<File>;

    fn create(&self, name: &str) -> Result<Self::Sink, StorageError> {
        fs::create_dir_all(&self.root)?;
        let file = File::create(self.path(name))?;
        Ok(BufWriter::new(file))
    }

    fn close(&self, mut sink: Self::Sink) -> Result<(), StorageError> {
        sink.flush()?;
        let file = sink.into_inner().map_err(|e| e.into_error())?;
        file.sync_all()?;
        Ok(())
    }

    fn rename(&self, from: &str, to: &str) -> Result<(), StorageError> {
        let source = self.path(from);
        if !source.exists() {
            return Err(StorageError::NotFound(source.display().to_string()));
        }
        fs::rename(source, self.path(to))?;
        Ok(())
    }

    fn read_to_string(&self, name: &str) -> Result<String, StorageError> {
        let path = self.path(name);
        if !path.exists() {
            return Err(StorageError::NotFound(path.display().to_string()));
        }
        Ok(fs::read_to_string(path)?)
    }
}
