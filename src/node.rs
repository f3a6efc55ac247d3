//! Rendering of `<url>` entries into XML fragments.
//!
//! Formatting is pure: the same entry always produces the same bytes, and the
//! byte length of the returned string is exactly what the budget tracker
//! charges against the current part. Fragments are written without
//! whitespace between elements so that length is predictable.
//!
//! Field order inside `<url>` is fixed:
//!
//! ```text
//! <url>
//!   <loc/> <changefreq/> <lastmod/> <priority/>
//!   <image:image/>*              loc, caption, geo_location, title, license
//!   <xhtml:link rel="alternate"/>*
//! </url>
//! ```
//!
//! The `image:` and `xhtml:` prefixes are emitted unconditionally. Declaring
//! the matching namespaces on the root element is the header's job, see
//! [`crate::document`].

use crate::types::{AlternateLink, ImageEntry, UrlEntry};
use std::borrow::Cow;

/// Escape the five XML-reserved characters (`& < > " '`).
///
/// Borrows the input when nothing needs escaping, which is the common case
/// for plain URLs.
pub fn escape(value: &str) -> Cow<'_, str> {
    quick_xml::escape::escape(value)
}

/// Render a URL entry as a `<url>` fragment.
pub fn format_url(entry: &UrlEntry) -> String {
    let mut out = String::with_capacity(64 + entry.location.len());
    out.push_str("<url>");
    push_element(&mut out, "loc", &entry.location);
    if let Some(frequency) = entry.change_frequency {
        push_element(&mut out, "changefreq", frequency.as_str());
    }
    push_optional(&mut out, "lastmod", entry.last_modified.as_deref());
    push_optional(&mut out, "priority", entry.priority.as_deref());
    for image in &entry.images {
        push_image(&mut out, image);
    }
    for link in &entry.alternate_links {
        push_alternate(&mut out, link);
    }
    out.push_str("</url>");
    out
}

/// Render a `<sitemap>` reference for the index document.
pub fn format_index_entry(location: &str) -> String {
    let mut out = String::with_capacity(32 + location.len());
    out.push_str("<sitemap>");
    push_element(&mut out, "loc", location);
    out.push_str("</sitemap>");
    out
}

fn push_element(out: &mut String, tag: &str, value: &str) {
    out.push('<');
    out.push_str(tag);
    out.push('>');
    out.push_str(&escape(value));
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

fn push_optional(out: &mut String, tag: &str, value: Option<&str>) {
    if let Some(value) = value.filter(|v| !v.is_empty()) {
        push_element(out, tag, value);
    }
}

fn push_image(out: &mut String, image: &ImageEntry) {
    out.push_str("<image:image>");
    push_optional(out, "image:loc", Some(image.location.as_str()));
    push_optional(out, "image:caption", image.caption.as_deref());
    push_optional(out, "image:geo_location", image.geo_location.as_deref());
    push_optional(out, "image:title", image.title.as_deref());
    push_optional(out, "image:license", image.license.as_deref());
    out.push_str("</image:image>");
}

fn push_alternate(out: &mut String, link: &AlternateLink) {
    out.push_str(r#"<xhtml:link rel="alternate" hreflang=""#);
    out.push_str(&escape(&link.language_code));
    out.push_str(r#"" href=""#);
    out.push_str(&escape(&link.url));
    out.push_str(r#""/>"#);
}
