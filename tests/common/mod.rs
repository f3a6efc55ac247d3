//! Reading generated files back through an XML parser.

#![allow(dead_code)]

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

/// Root element, root attributes, and `<loc>` values of `<url>`/`<sitemap>` children.
#[derive(Debug, Default)]
pub struct Sitemap {
    pub root: String,
    pub root_attributes: Vec<(String, String)>,
    pub locations: Vec<String>,
}

impl Sitemap {
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.root_attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

fn attributes(element: &BytesStart) -> Vec<(String, String)> {
    element
        .attributes()
        .map(|attr| {
            let attr = attr.unwrap_or_else(|e| panic!("bad attribute: {e}"));
            let key = String::from_utf8_lossy(attr.key.as_ref()).to_string();
            let value = attr.unescape_value().unwrap().into_owned();
            (key, value)
        })
        .collect()
}

/// Parse a generated file. Panics unless it is a single well-formed element tree.
pub fn parse(xml: &str) -> Sitemap {
    let mut reader = Reader::from_str(xml);
    let mut buf = Vec::new();
    let mut sitemap = Sitemap::default();
    let mut open: Vec<String> = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                let attrs = attributes(&e);
                if open.is_empty() {
                    assert!(sitemap.root.is_empty(), "second root <{name}> in: {xml}");
                    sitemap.root = name.clone();
                    sitemap.root_attributes = attrs;
                }
                open.push(name);
            }
            Ok(Event::Empty(e)) => {
                attributes(&e);
            }
            Ok(Event::End(_)) => {
                open.pop();
            }
            Ok(Event::Text(e)) => {
                if let [.., parent, loc] = open.as_slice() {
                    if loc == "loc" && (parent == "url" || parent == "sitemap") {
                        sitemap.locations.push(e.unescape().unwrap().into_owned());
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => panic!("XML parse error: {e} in: {xml}"),
            _ => {}
        }
        buf.clear();
    }

    assert!(!sitemap.root.is_empty(), "no root element in: {xml}");
    assert!(open.is_empty(), "unclosed {open:?} in: {xml}");
    sitemap
}
