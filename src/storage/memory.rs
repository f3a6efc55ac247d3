//! In-memory storage for dry runs.
//!
//! Cloning a [`MemoryStorage`] yields another handle to the same files, so a
//! caller can hand one clone to a generator and inspect the result through
//! the other. Handles are single-threaded, like the generator itself.

use super::backend::{Storage, StorageError};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::io::{self, Write};
use std::rc::Rc;

#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    files: Rc<RefCell<BTreeMap<String, Vec<u8>>>>,
}

/// Buffered sink; its bytes become visible under the file name on close.
#[derive(Debug)]
pub struct MemorySink {
    name: String,
    buffer: Vec<u8>,
}

impl Write for MemorySink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// File names in lexical order.
    pub fn file_names(&self) -> Vec<String> {
        self.files.borrow().keys().cloned().collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.files.borrow().contains_key(name)
    }

    /// Size in bytes of a file, if present.
    pub fn len_of(&self, name: &str) -> Option<usize> {
        self.files.borrow().get(name).map(Vec::len)
    }
}

impl Storage for MemoryStorage {
    type Sink = MemorySink;

    fn create(&self, name: &str) -> Result<Self::Sink, StorageError> {
        self.files.borrow_mut().insert(name.to_string(), Vec::new());
        Ok(MemorySink {
            name: name.to_string(),
            buffer: Vec::new(),
        })
    }

    fn close(&self, sink: Self::Sink) -> Result<(), StorageError> {
        self.files.borrow_mut().insert(sink.name, sink.buffer);
        Ok(())
    }

    fn rename(&self, from: &str, to: &str) -> Result<(), StorageError> {
        let mut files = self.files.borrow_mut();
        let bytes = files
            .remove(from)
            .ok_or_else(|| StorageError::NotFound(from.to_string()))?;
        files.insert(to.to_string(), bytes);
        Ok(())
    }

    fn read_to_string(&self, name: &str) -> Result<String, StorageError> {
        let files = self.files.borrow();
        let bytes = files
            .get(name)
            .ok_or_else(|| StorageError::NotFound(name.to_string()))?;
        String::from_utf8(bytes.clone())
            .map_err(|e| StorageError::Io(io::Error::new(io::ErrorKind::InvalidData, e)))
    }
}
