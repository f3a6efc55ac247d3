//! CLI output formatting for generation results.
//!
//! # Output Format
//!
//! ## Single file
//!
//! ```text
//! 001 sitemap.xml (3 URLs, 412 bytes)
//!     https://example.com/sitemap.xml
//!
//! Wrote 3 URLs in 1 file → out/
//! ```
//!
//! ## Split output
//!
//! ```text
//! Index sitemap.xml (2 parts)
//!     https://example.com/sitemap.xml
//! 001 sitemap-1.xml (50000 URLs, 4211873 bytes)
//!     https://example.com/sitemap-1.xml
//! 002 sitemap-2.xml (17 URLs, 1508 bytes)
//!     https://example.com/sitemap-2.xml
//!
//! Wrote 50017 URLs in 2 files + index → out/
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions do no I/O.

use crate::index::{GenerationSummary, OutputFile};
use std::path::Path;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn plural(n: usize, one: &str, many: &str) -> String {
    if n == 1 {
        format!("{n} {one}")
    } else {
        format!("{n} {many}")
    }
}

fn document_lines(pos: usize, file: &OutputFile) -> [String; 2] {
    [
        format!(
            "{} {} ({}, {})",
            format_index(pos),
            file.name,
            plural(file.entries, "URL", "URLs"),
            plural(file.bytes, "byte", "bytes"),
        ),
        format!("{}{}", indent(1), file.url),
    ]
}

fn summary_lines(summary: &GenerationSummary) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(index) = &summary.index {
        lines.push(format!(
            "Index {} ({})",
            index.name,
            plural(index.entries, "part", "parts")
        ));
        lines.push(format!("{}{}", indent(1), index.url));
    }
    for (i, doc) in summary.documents.iter().enumerate() {
        lines.extend(document_lines(i + 1, doc));
    }
    lines
}

fn totals(summary: &GenerationSummary) -> String {
    let files = plural(summary.documents.len(), "file", "files");
    let index = if summary.is_split() { " + index" } else { "" };
    format!(
        "{} in {files}{index}",
        plural(summary.total_entries(), "URL", "URLs")
    )
}

/// Lines describing a completed `generate` run.
pub fn format_generate_output(summary: &GenerationSummary, output_dir: &Path) -> Vec<String> {
    let mut lines = summary_lines(summary);
    lines.push(String::new());
    lines.push(format!(
        "Wrote {} → {}",
        totals(summary),
        output_dir.display()
    ));
    lines
}

/// Lines describing a `check` dry run.
pub fn format_check_output(summary: &GenerationSummary) -> Vec<String> {
    let mut lines = summary_lines(summary);
    lines.push(String::new());
    lines.push(format!("Would write {} (nothing written)", totals(summary)));
    lines
}

pub fn print_generate_output(summary: &GenerationSummary, output_dir: &Path) {
    for line in format_generate_output(summary, output_dir) {
        println!("{}", line);
    }
}

pub fn print_check_output(summary: &GenerationSummary) {
    for line in format_check_output(summary) {
        println!("{}", line);
    }
}
