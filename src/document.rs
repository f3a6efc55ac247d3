//! Sitemap documents: fixed header/footer text and the part writer.
//!
//! Every file starts with the XML declaration followed by the root open tag
//! and ends with the root close tag. The root of a document part is
//! `<urlset>`; the root of the index is `<sitemapindex>`. Only the urlset
//! root carries the configured extension namespaces.
//!
//! ```text
//! <?xml version="1.0" encoding="UTF-8"?><urlset xmlns="…" xmlns:image="…">
//! <url>…</url><url>…</url>
//! </urlset>
//! ```
//!
//! (Shown on three lines for readability; the bytes contain no newlines.)

use crate::budget::PartUsage;
use crate::node::escape;
use crate::storage::{Storage, StorageError};
use std::collections::BTreeMap;
use std::io::Write;

pub const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;
pub const SITEMAP_NAMESPACE: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";
pub const IMAGE_NAMESPACE: &str = "http://www.google.com/schemas/sitemap-image/1.1";
pub const XHTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";

/// Root element of a sitemap file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Root {
    UrlSet,
    SitemapIndex,
}

impl Root {
    pub fn tag(self) -> &'static str {
        match self {
            Self::UrlSet => "urlset",
            Self::SitemapIndex => "sitemapindex",
        }
    }

    pub fn footer(self) -> &'static str {
        match self {
            Self::UrlSet => "</urlset>",
            Self::SitemapIndex => "</sitemapindex>",
        }
    }
}

/// Prefix declared by a namespace key, with any leading `xmlns:` removed.
pub fn namespace_prefix(key: &str) -> &str {
    key.strip_prefix("xmlns:").unwrap_or(key)
}

/// Attribute name for a namespace key: `image` and `xmlns:image` both become `xmlns:image`.
pub fn namespace_attribute(key: &str) -> String {
    format!("xmlns:{}", namespace_prefix(key))
}

/// Render the XML declaration and root open tag.
pub fn header(root: Root, extra_namespaces: &BTreeMap<String, String>) -> String {
    let mut out = String::with_capacity(128);
    out.push_str(XML_DECLARATION);
    out.push('<');
    out.push_str(root.tag());
    out.push_str(r#" xmlns=""#);
    out.push_str(SITEMAP_NAMESPACE);
    out.push('"');
    if root == Root::UrlSet {
        for (key, uri) in extra_namespaces {
            out.push(' ');
            out.push_str(&namespace_attribute(key));
            out.push_str(r#"=""#);
            out.push_str(&escape(uri));
            out.push('"');
        }
    }
    out.push('>');
    out
}

/// Byte size of a urlset document with no entries.
pub fn empty_document_len(extra_namespaces: &BTreeMap<String, String>) -> usize {
    header(Root::UrlSet, extra_namespaces).len() + Root::UrlSet.footer().len()
}

/// A file that has been sealed and closed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SealedDocument {
    pub name: String,
    pub bytes: usize,
    pub entries: usize,
}

/// Owns the one open sink of a document and counts what went into it.
///
/// The byte count includes the header, so [`usage`](Self::usage) is the
/// exact size the file would have before its footer.
pub struct DocumentWriter<W: Write> {
    name: String,
    root: Root,
    sink: W,
    bytes: usize,
    entries: usize,
}

impl<W: Write> DocumentWriter<W> {
    /// Create the file and write its header.
    pub fn open<S>(storage: &S, name: &str, root: Root, header: &str) -> Result<Self, StorageError>
    where
        S: Storage<Sink = W>,
    {
        let mut sink = storage.create(name)?;
        sink.write_all(header.as_bytes())?;
        tracing::debug!(file = name, root = root.tag(), "opened document");
        Ok(Self {
            name: name.to_string(),
            root,
            sink,
            bytes: header.len(),
            entries: 0,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn usage(&self) -> PartUsage {
        PartUsage {
            bytes: self.bytes,
            entries: self.entries,
        }
    }

    /// Write one entry fragment.
    pub fn append(&mut self, fragment: &str) -> Result<(), StorageError> {
        self.sink.write_all(fragment.as_bytes())?;
        self.bytes += fragment.len();
        self.entries += 1;
        Ok(())
    }

    /// Write the footer and close the sink.
    pub fn seal<S>(mut self, storage: &S) -> Result<SealedDocument, StorageError>
    where
        S: Storage<Sink = W>,
    {
        let footer = self.root.footer();
        self.sink.write_all(footer.as_bytes())?;
        self.bytes += footer.len();
        storage.close(self.sink)?;
        tracing::debug!(
            file = %self.name,
            bytes = self.bytes,
            entries = self.entries,
            "sealed document"
        );
        Ok(SealedDocument {
            name: self.name,
            bytes: self.bytes,
            entries: self.entries,
        })
    }
}
