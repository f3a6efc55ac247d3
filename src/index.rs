//! Final naming of parts and the sitemap index.
//!
//! Parts are written under temporary names (`{base}-{k}.xml.part`) while the
//! run is in progress, because until the last entry is added nobody knows
//! whether there will be one file or many. Finalization only renames files
//! and writes the small index document; the bytes of a sealed part never
//! change.
//!
//! | Parts | Result |
//! |-------|--------|
//! | 1 | `{base}-1.xml.part` → `{base}.xml` |
//! | N > 1 | `{base}-k.xml.part` → `{base}-k.xml`, plus `{base}.xml` indexing them in order |
//!
//! The index is itself written to `{base}.xml.part` and renamed into place
//! once sealed. A failure leaves already sealed parts under whatever name
//! they had at that moment.

use crate::config::Options;
use crate::document::{self, DocumentWriter, Root, SealedDocument};
use crate::node;
use crate::storage::{Storage, StorageError};
use std::collections::BTreeMap;

const TEMP_SUFFIX: &str = ".part";

/// Temporary name of part `sequence` while the run is open.
pub fn temp_part_name(base_filename: &str, sequence: usize) -> String {
    format!("{}{TEMP_SUFFIX}", part_name(base_filename, sequence))
}

/// Final name of part `sequence` when output is split.
pub fn part_name(base_filename: &str, sequence: usize) -> String {
    format!("{base_filename}-{sequence}.xml")
}

/// Name of the entry point: the single document or the index.
pub fn entry_point_name(base_filename: &str) -> String {
    format!("{base_filename}.xml")
}

/// Absolute URL of a generated file.
pub fn file_url(base_url: &str, name: &str) -> String {
    format!("{base_url}{name}")
}

/// A sealed part still under its temporary name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SealedPart {
    /// 1-based position in the run.
    pub sequence: usize,
    pub document: SealedDocument,
}

/// One file produced by a run, under its final name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFile {
    pub name: String,
    pub url: String,
    /// URL entries for a document, part references for an index.
    pub entries: usize,
    pub bytes: usize,
}

/// What a finished run wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationSummary {
    /// The index, when output was split.
    pub index: Option<OutputFile>,
    /// Documents holding URL entries, in sequence order.
    pub documents: Vec<OutputFile>,
}

impl GenerationSummary {
    /// The file a crawler should be pointed at.
    pub fn entry_point(&self) -> &OutputFile {
        self.index.as_ref().unwrap_or(&self.documents[0])
    }

    pub fn total_entries(&self) -> usize {
        self.documents.iter().map(|d| d.entries).sum()
    }

    pub fn is_split(&self) -> bool {
        self.index.is_some()
    }
}

/// Give sealed parts their final names and write the index if needed.
pub fn finalize<S: Storage>(
    storage: &S,
    options: &Options,
    parts: Vec<SealedPart>,
) -> Result<GenerationSummary, StorageError> {
    let entry_point = entry_point_name(&options.base_filename);

    if let [only] = parts.as_slice() {
        storage.rename(&only.document.name, &entry_point)?;
        tracing::info!(
            file = %entry_point,
            entries = only.document.entries,
            "wrote single sitemap"
        );
        return Ok(GenerationSummary {
            index: None,
            documents: vec![output_file(options, entry_point, &only.document)],
        });
    }

    let mut documents = Vec::with_capacity(parts.len());
    for part in &parts {
        let name = part_name(&options.base_filename, part.sequence);
        storage.rename(&part.document.name, &name)?;
        documents.push(output_file(options, name, &part.document));
    }

    let index = write_index(storage, options, &documents)?;
    tracing::info!(
        file = %index.name,
        parts = documents.len(),
        "wrote sitemap index"
    );
    Ok(GenerationSummary {
        index: Some(index),
        documents,
    })
}

fn output_file(options: &Options, name: String, document: &SealedDocument) -> OutputFile {
    OutputFile {
        url: file_url(&options.base_url, &name),
        name,
        entries: document.entries,
        bytes: document.bytes,
    }
}

fn write_index<S: Storage>(
    storage: &S,
    options: &Options,
    documents: &[OutputFile],
) -> Result<OutputFile, StorageError> {
    let name = entry_point_name(&options.base_filename);
    let temp_name = format!("{name}{TEMP_SUFFIX}");
    let header = document::header(Root::SitemapIndex, &BTreeMap::new());

    let mut writer = DocumentWriter::open(storage, &temp_name, Root::SitemapIndex, &header)?;
    for doc in documents {
        writer.append(&node::format_index_entry(&doc.url))?;
    }
    let sealed = writer.seal(storage)?;
    storage.rename(&sealed.name, &name)?;
    Ok(output_file(options, name, &sealed))
}
