//! Shared test utilities for inspecting generated sitemap files.
//!
//! Generated files are read back with `quick_xml`, so every helper that
//! extracts content also fails the test when a file is not well-formed:
//! mismatched or unclosed tags, duplicate or broken attributes, or a second
//! root element.

use crate::storage::{MemoryStorage, Storage};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use std::path::Path;

/// A generated file read back through the XML parser.
#[derive(Debug, Default)]
pub struct ParsedSitemap {
    /// Qualified name of the root element.
    pub root: String,
    /// Attributes of the root element, in document order.
    pub root_attributes: Vec<(String, String)>,
    /// `<loc>` values of `<url>` or `<sitemap>` children, in document order.
    /// Image locations (`<image:loc>`) are not included.
    pub locations: Vec<String>,
}

impl ParsedSitemap {
    /// Value of a root attribute such as `xmlns:image`.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.root_attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Checked attributes of an element; duplicates and malformed pairs are errors.
fn attributes(element: &BytesStart) -> Result<Vec<(String, String)>, String> {
    let mut out = Vec::new();
    for attr in element.attributes() {
        let attr = attr.map_err(|e| format!("bad attribute: {e}"))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).to_string();
        let value = attr
            .unescape_value()
            .map_err(|e| format!("bad attribute value: {e}"))?;
        out.push((key, value.into_owned()));
    }
    Ok(out)
}

/// Parse a sitemap or sitemap index, rejecting anything that is not well-formed.
pub fn parse_sitemap(xml: &str) -> Result<ParsedSitemap, String> {
    let mut reader = Reader::from_str(xml);
    let mut buf = Vec::new();
    let mut parsed = ParsedSitemap::default();
    let mut open: Vec<String> = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                let attrs = attributes(&e)?;
                if open.is_empty() {
                    if !parsed.root.is_empty() {
                        return Err(format!("second root element <{name}>"));
                    }
                    parsed.root = name.clone();
                    parsed.root_attributes = attrs;
                }
                open.push(name);
            }
            Ok(Event::Empty(e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                attributes(&e)?;
                if open.is_empty() {
                    return Err(format!("empty root element <{name}/>"));
                }
            }
            Ok(Event::End(_)) => {
                open.pop();
            }
            Ok(Event::Text(e)) => {
                let in_loc = matches!(
                    open.as_slice(),
                    [.., parent, loc] if loc == "loc" && (parent == "url" || parent == "sitemap")
                );
                if in_loc {
                    let text = e.unescape().map_err(|e| format!("bad text: {e}"))?;
                    parsed.locations.push(text.into_owned());
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(format!("XML parse error: {e}")),
            _ => {}
        }
        buf.clear();
    }

    if parsed.root.is_empty() {
        return Err("no root element".into());
    }
    if let Some(name) = open.last() {
        return Err(format!("unclosed element <{name}>"));
    }
    Ok(parsed)
}

/// Parse a file, panicking with its content when it is not well-formed.
pub fn parse_or_panic(xml: &str) -> ParsedSitemap {
    parse_sitemap(xml).unwrap_or_else(|e| panic!("{e} in: {xml}"))
}

/// Every `<loc>` of a `<urlset>` document, in document order.
pub fn locations(xml: &str) -> Vec<String> {
    let parsed = parse_or_panic(xml);
    assert_eq!(parsed.root, "urlset");
    parsed.locations
}

/// Every part URL referenced by an index document, in order.
pub fn index_locations(xml: &str) -> Vec<String> {
    let parsed = parse_or_panic(xml);
    assert_eq!(parsed.root, "sitemapindex");
    parsed.locations
}

/// Parse every file in memory storage; all of them must be well-formed.
pub fn parse_all(storage: &MemoryStorage) -> Vec<(String, ParsedSitemap)> {
    storage
        .file_names()
        .into_iter()
        .map(|name| {
            let xml = storage.read_to_string(&name).unwrap();
            let parsed = parse_sitemap(&xml).unwrap_or_else(|e| panic!("{name}: {e}"));
            (name, parsed)
        })
        .collect()
}

/// Sorted names of regular files in a directory.
pub fn dir_file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap_or_else(|e| panic!("cannot read {}: {e}", dir.display()))
        .map(|entry| entry.unwrap())
        .filter(|entry| entry.path().is_file())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locations_skip_image_locs() {
        let xml = "<urlset><url><loc>a</loc><image:image><image:loc>i</image:loc></image:image></url>\
                   <url><loc>b&amp;c</loc></url></urlset>";
        assert_eq!(locations(xml), vec!["a", "b&c"]);
    }

    #[test]
    fn root_attributes_are_collected() {
        let xml = r#"<?xml version="1.0"?><urlset xmlns="x" xmlns:image="i"><url/></urlset>"#;
        let parsed = parse_or_panic(xml);
        assert_eq!(parsed.root, "urlset");
        assert_eq!(parsed.attribute("xmlns"), Some("x"));
        assert_eq!(parsed.attribute("xmlns:image"), Some("i"));
        assert_eq!(parsed.attribute("xmlns:xhtml"), None);
    }

    #[test]
    fn duplicate_root_attribute_is_rejected() {
        let xml = r#"<urlset xmlns:image="a" xmlns:image="b"></urlset>"#;
        assert!(parse_sitemap(xml).is_err());
    }

    #[test]
    fn broken_markup_is_rejected() {
        assert!(parse_sitemap(r#"<urlset xmlns:a"b><x="y"></urlset>"#).is_err());
        assert!(parse_sitemap("<urlset><url></urlset>").is_err());
        assert!(parse_sitemap("<urlset>").is_err());
        assert!(parse_sitemap("<a></a><b></b>").is_err());
    }
}
