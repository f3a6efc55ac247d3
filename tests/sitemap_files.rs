//! End-to-end runs against the filesystem.

mod common;

use sitemapper::{
    ChangeFrequency, Generator, IMAGE_NAMESPACE, ImageEntry, Options, UrlEntry, XHTML_NAMESPACE,
    input,
};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn options(dir: &Path, filename: &str) -> Options {
    Options {
        base_url: "http://example.com/".into(),
        output_dir: dir.to_path_buf(),
        base_filename: filename.into(),
        max_entries_per_file: 2,
        max_bytes_per_file: 0,
        ..Options::default()
    }
}

fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

fn run(options: Options, locations: &[&str]) {
    let mut generator = Generator::new(options);
    generator.open().unwrap();
    for loc in locations {
        generator.add(&UrlEntry::new(*loc)).unwrap();
    }
    generator.close().unwrap();
}

#[test]
fn single_and_split_runs_share_a_directory() {
    let tmp = TempDir::new().unwrap();
    run(options(tmp.path(), "a"), &["test1", "test2"]);
    run(
        options(tmp.path(), "b"),
        &["test1", "test2", "test3", "test4", "test5"],
    );

    assert_eq!(
        file_names(tmp.path()),
        vec!["a.xml", "b-1.xml", "b-2.xml", "b-3.xml", "b.xml"]
    );

    let read = |name: &str| common::parse(&fs::read_to_string(tmp.path().join(name)).unwrap());

    let a = read("a.xml");
    assert_eq!(a.root, "urlset");
    assert_eq!(a.locations, vec!["test1", "test2"]);

    let index = read("b.xml");
    assert_eq!(index.root, "sitemapindex");
    assert_eq!(
        index.locations,
        vec![
            "http://example.com/b-1.xml",
            "http://example.com/b-2.xml",
            "http://example.com/b-3.xml",
        ]
    );

    assert_eq!(read("b-1.xml").locations, vec!["test1", "test2"]);
    assert_eq!(read("b-2.xml").locations, vec!["test3", "test4"]);
    assert_eq!(read("b-3.xml").locations, vec!["test5"]);
}

#[test]
fn extension_namespaces_and_entries() {
    let tmp = TempDir::new().unwrap();
    let options = Options {
        max_entries_per_file: 0,
        ..options(tmp.path(), "c")
    }
    .with_namespace("xhtml", XHTML_NAMESPACE)
    .with_namespace("image", IMAGE_NAMESPACE);

    let entry = UrlEntry::new("https://example.com/en/")
        .with_change_frequency(ChangeFrequency::Weekly)
        .with_last_modified("2024-05-01")
        .with_image(ImageEntry {
            caption: Some("Harbour & lights".into()),
            ..ImageEntry::new("https://example.com/img/harbour.jpg")
        })
        .with_alternate(sitemapper::AlternateLink::new(
            "https://example.com/fr/",
            "fr",
        ));

    let mut generator = Generator::new(options);
    generator.open().unwrap();
    generator.add(&entry).unwrap();
    let summary = generator.close().unwrap();

    assert!(!summary.is_split());
    let xml = fs::read_to_string(tmp.path().join("c.xml")).unwrap();
    assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?><urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9" xmlns:image="http://www.google.com/schemas/sitemap-image/1.1" xmlns:xhtml="http://www.w3.org/1999/xhtml">"#));
    assert!(xml.contains("<image:caption>Harbour &amp; lights</image:caption>"));
    assert!(xml.contains(
        r#"<xhtml:link rel="alternate" hreflang="fr" href="https://example.com/fr/"/>"#
    ));
    assert_eq!(summary.documents[0].bytes, xml.len());

    let parsed = common::parse(&xml);
    assert_eq!(parsed.attribute("xmlns:image"), Some(IMAGE_NAMESPACE));
    assert_eq!(parsed.attribute("xmlns:xhtml"), Some(XHTML_NAMESPACE));
    assert_eq!(parsed.locations, vec!["https://example.com/en/"]);
}

#[test]
fn colliding_namespace_keys_are_rejected_before_writing() {
    let tmp = TempDir::new().unwrap();
    let out = tmp.path().join("out");
    let options = options(&out, "n")
        .with_namespace("image", IMAGE_NAMESPACE)
        .with_namespace("xmlns:image", "http://other.example/");
    let result = sitemapper::write_sitemaps(options, &[UrlEntry::new("a")]);
    assert!(matches!(
        result,
        Err(sitemapper::GeneratorError::Config(_))
    ));
    assert!(!out.exists());
}

#[test]
fn json_input_generates_sitemap() {
    let tmp = TempDir::new().unwrap();
    let input_path = tmp.path().join("urls.json");
    fs::write(
        &input_path,
        r#"[
            {"loc": "https://example.com/", "changefreq": "daily", "priority": "1.0"},
            {"loc": "https://example.com/blog", "lastmod": "2024-06-30"}
        ]"#,
    )
    .unwrap();

    let entries = input::load_entries(&input_path).unwrap();
    let out = tmp.path().join("public");
    let summary = sitemapper::write_sitemaps(
        Options {
            max_entries_per_file: 0,
            ..options(&out, "sitemap")
        },
        &entries,
    )
    .unwrap();

    assert_eq!(summary.total_entries(), 2);
    assert_eq!(file_names(&out), vec!["sitemap.xml"]);
    let xml = fs::read_to_string(out.join("sitemap.xml")).unwrap();
    assert!(xml.contains(
        "<url><loc>https://example.com/</loc><changefreq>daily</changefreq><priority>1.0</priority></url>"
    ));
    assert!(xml.contains("<lastmod>2024-06-30</lastmod>"));
    assert_eq!(
        common::parse(&xml).locations,
        vec!["https://example.com/", "https://example.com/blog"]
    );
}

#[test]
fn rejected_configuration_creates_no_files() {
    let tmp = TempDir::new().unwrap();
    let out = tmp.path().join("out");
    let mut generator = Generator::new(Options {
        max_bytes_per_file: 10,
        ..options(&out, "x")
    });
    assert!(generator.open().is_err());
    assert!(!out.exists());
}
