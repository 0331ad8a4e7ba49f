//! Sitemap output.
//!
//! Writes the harvested URL records to disk:
//!
//! - **Sitemap**: one `urlset` document per chunk (`sitemap.xml`, or
//!   `sitemap-1.xml`, `sitemap-2.xml`, ... when split)
//! - **Index**: a `sitemapindex` document (`sitemap-index.xml`) listing the
//!   chunk files, only written when the records needed more than one file
//!
//! ```text
//! 3 records       → sitemap.xml
//! 100000 records  → sitemap-1.xml (49000) sitemap-2.xml (49000)
//!                   sitemap-3.xml (2000)  sitemap-index.xml
//! ```

pub mod index;
pub mod sitemap;

pub use sitemap::{ChangeFreq, SITEMAP_MAX_URLS, SITEMAP_PROTOCOL_LIMIT, UrlRecord};

use crate::{
    config::SitemapConfig,
    log,
    utils::{date::today_utc, plural::plural_count},
};
use anyhow::{Context, Result, ensure};
use std::{
    borrow::Cow,
    fs,
    path::{Path, PathBuf},
};

/// Namespace shared by `urlset` and `sitemapindex` documents.
pub const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

const XML_DECL: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";

/// Filenames written by one run, in write order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteReport {
    /// Every file written, chunk documents first, then the index if any.
    pub written: Vec<String>,
    /// The index filename, or `None` when everything fit in `sitemap.xml`.
    pub index: Option<String>,
}

/// Writes sitemap documents into one output directory.
#[derive(Debug, Clone)]
pub struct SitemapWriter {
    output_dir: PathBuf,
    base_url: Option<String>,
    max_urls: usize,
    minify: bool,
}

impl SitemapWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            base_url: None,
            max_urls: SITEMAP_MAX_URLS,
            minify: false,
        }
    }

    pub fn from_config(config: &SitemapConfig) -> Self {
        Self::new(&config.output)
            .base_url(config.base_url.clone())
            .max_urls(config.max_urls)
            .minify(config.minify)
    }

    pub fn base_url(mut self, base_url: Option<String>) -> Self {
        self.base_url = base_url;
        self
    }

    pub fn max_urls(mut self, max_urls: usize) -> Self {
        self.max_urls = max_urls;
        self
    }

    pub fn minify(mut self, minify: bool) -> Self {
        self.minify = minify;
        self
    }

    /// Write all records, splitting into an index when needed.
    pub fn write(&self, records: &[UrlRecord]) -> Result<WriteReport> {
        self.write_dated(records, &today_utc())
    }

    /// Like [`SitemapWriter::write`], with an explicit index `lastmod`.
    pub fn write_dated(&self, records: &[UrlRecord], today: &str) -> Result<WriteReport> {
        ensure!(self.max_urls > 0, "max URLs per sitemap must be at least 1");

        let output_dir = self.output_dir();
        fs::create_dir_all(output_dir).with_context(|| {
            format!("Failed to create output directory {}", output_dir.display())
        })?;

        let chunks = sitemap::chunk_records(records, self.max_urls);

        if let [only] = chunks.as_slice() {
            self.write_urlset(sitemap::SINGLE_FILE, only)?;
            return Ok(WriteReport {
                written: vec![sitemap::SINGLE_FILE.to_string()],
                index: None,
            });
        }

        let mut written = Vec::with_capacity(chunks.len() + 1);
        for (idx, chunk) in chunks.iter().enumerate() {
            let filename = sitemap::part_filename(idx + 1);
            self.write_urlset(&filename, chunk)?;
            written.push(filename);
        }

        let xml = index::into_xml(&written, self.base_url.as_deref(), today);
        self.write_document(index::INDEX_FILE, &xml)?;
        log!("index"; "{} ({})", index::INDEX_FILE, plural_count(written.len(), "sitemap"));

        written.push(index::INDEX_FILE.to_string());
        Ok(WriteReport {
            written,
            index: Some(index::INDEX_FILE.to_string()),
        })
    }

    fn write_urlset(&self, filename: &str, records: &[UrlRecord]) -> Result<()> {
        let xml = sitemap::into_xml(records);
        self.write_document(filename, &xml)?;
        log!("sitemap"; "{} ({})", filename, plural_count(records.len(), "url"));
        Ok(())
    }

    fn write_document(&self, filename: &str, xml: &str) -> Result<()> {
        let path = self.output_dir.join(filename);
        let xml = minify_xml(xml, self.minify);
        fs::write(&path, xml.as_bytes())
            .with_context(|| format!("Failed to write {}", path.display()))
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}

/// Minify XML content if enabled.
///
/// Drops whitespace-only runs between tags. Text inside elements is kept
/// byte for byte; `<` and `>` never occur in it since it is escaped.
pub fn minify_xml(content: &str, enabled: bool) -> Cow<'_, str> {
    if !enabled {
        return Cow::Borrowed(content);
    }

    let mut minified = String::with_capacity(content.len());
    let mut rest = content;
    while let Some(open) = rest.find('<') {
        let (text, tail) = rest.split_at(open);
        if !text.trim().is_empty() {
            minified.push_str(text);
        }
        let close = tail.find('>').map_or(tail.len(), |i| i + 1);
        minified.push_str(&tail[..close]);
        rest = &tail[close..];
    }
    if !rest.trim().is_empty() {
        minified.push_str(rest);
    }
    Cow::Owned(minified)
}

/// Escape special XML characters.
pub fn escape_xml(s: &str) -> Cow<'_, str> {
    // Fast path: check if escaping is needed
    if !s.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(s);
    }

    Cow::Owned(
        s.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace('"', "&quot;")
            .replace('\'', "&apos;"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn records(n: usize) -> Vec<UrlRecord> {
        (0..n)
            .map(|i| UrlRecord::new(format!("https://blog.example/p/{i}.html")).lastmod("2024-03-01"))
            .collect()
    }

    fn read(dir: &TempDir, name: &str) -> String {
        fs::read_to_string(dir.path().join(name)).unwrap()
    }

    #[test]
    fn test_minify_xml_basic() {
        let xml = "<?xml version=\"1.0\"?>\n<root>\n  <item>Hello</item>\n</root>";
        assert_eq!(
            minify_xml(xml, true),
            "<?xml version=\"1.0\"?><root><item>Hello</item></root>"
        );
        assert_eq!(minify_xml(xml, false), xml);
    }

    #[test]
    fn test_minify_xml_removes_empty_lines() {
        assert_eq!(minify_xml("<root>\n\n  <item/>\n\n</root>", true), "<root><item/></root>");
    }

    #[test]
    fn test_minify_xml_keeps_text_content() {
        let xml = "<urlset>\n  <url>\n    <loc>https://blog.example/a\n  b.html</loc>\n  </url>\n</urlset>\n";
        assert_eq!(
            minify_xml(xml, true),
            "<urlset><url><loc>https://blog.example/a\n  b.html</loc></url></urlset>"
        );
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("hello"), "hello");
        assert_eq!(escape_xml("<test>"), "&lt;test&gt;");
        assert_eq!(escape_xml("a & b"), "a &amp; b");
        assert_eq!(escape_xml(r#"say "hi""#), "say &quot;hi&quot;");
        assert_eq!(escape_xml("it's"), "it&apos;s");
    }

    #[test]
    fn test_single_file_no_index() {
        let dir = TempDir::new().unwrap();
        let report = SitemapWriter::new(dir.path()).write(&records(4)).unwrap();

        assert_eq!(report.written, vec!["sitemap.xml"]);
        assert_eq!(report.index, None);
        assert_eq!(read(&dir, "sitemap.xml").matches("<url>").count(), 4);
        assert!(!dir.path().join("sitemap-index.xml").exists());
        assert!(!dir.path().join("sitemap-1.xml").exists());
    }

    #[test]
    fn test_empty_records_write_empty_sitemap() {
        let dir = TempDir::new().unwrap();
        let report = SitemapWriter::new(dir.path()).write(&[]).unwrap();

        assert_eq!(report.written, vec!["sitemap.xml"]);
        assert_eq!(report.index, None);
        let xml = read(&dir, "sitemap.xml");
        assert!(xml.contains("<urlset"));
        assert!(!xml.contains("<url>"));
    }

    #[test]
    fn test_exactly_max_is_single_file() {
        let dir = TempDir::new().unwrap();
        let report = SitemapWriter::new(dir.path())
            .max_urls(5)
            .write(&records(5))
            .unwrap();
        assert_eq!(report.written, vec!["sitemap.xml"]);
    }

    #[test]
    fn test_split_writes_parts_and_index() {
        let dir = TempDir::new().unwrap();
        let report = SitemapWriter::new(dir.path())
            .max_urls(2)
            .write_dated(&records(5), "2025-06-30")
            .unwrap();

        assert_eq!(
            report.written,
            vec![
                "sitemap-1.xml",
                "sitemap-2.xml",
                "sitemap-3.xml",
                "sitemap-index.xml"
            ]
        );
        assert_eq!(report.index.as_deref(), Some("sitemap-index.xml"));
        assert!(!dir.path().join("sitemap.xml").exists());

        assert_eq!(read(&dir, "sitemap-1.xml").matches("<url>").count(), 2);
        assert_eq!(read(&dir, "sitemap-3.xml").matches("<url>").count(), 1);

        let index = read(&dir, "sitemap-index.xml");
        assert_eq!(index.matches("<sitemap>").count(), 3);
        assert!(index.contains("<loc>sitemap-1.xml</loc>"));
        assert!(index.find("sitemap-1.xml").unwrap() < index.find("sitemap-3.xml").unwrap());
        assert_eq!(index.matches("<lastmod>2025-06-30</lastmod>").count(), 3);
        assert!(!index.contains("2024-03-01"));
    }

    #[test]
    fn test_index_uses_base_url() {
        let dir = TempDir::new().unwrap();
        SitemapWriter::new(dir.path())
            .max_urls(3)
            .base_url(Some("https://example.com".into()))
            .write(&records(6))
            .unwrap();

        let index = read(&dir, "sitemap-index.xml");
        assert!(index.contains("<loc>https://example.com/sitemap-1.xml</loc>"));
        assert!(index.contains("<loc>https://example.com/sitemap-2.xml</loc>"));
        assert_eq!(index.matches("<sitemap>").count(), 2);
        assert!(index.contains(&format!("<lastmod>{}</lastmod>", today_utc())));
    }

    #[test]
    fn test_hundred_thousand_records() {
        let dir = TempDir::new().unwrap();
        let report = SitemapWriter::new(dir.path())
            .write_dated(&records(100_000), "2025-01-01")
            .unwrap();

        assert_eq!(report.written.len(), 4);
        assert_eq!(report.index.as_deref(), Some("sitemap-index.xml"));

        let counts: Vec<usize> = ["sitemap-1.xml", "sitemap-2.xml", "sitemap-3.xml"]
            .iter()
            .map(|f| read(&dir, f).matches("<url>").count())
            .collect();
        assert_eq!(counts, vec![49_000, 49_000, 2_000]);

        let index = read(&dir, "sitemap-index.xml");
        assert_eq!(index.matches("<sitemap>").count(), 3);
        assert_eq!(index.matches("<lastmod>2025-01-01</lastmod>").count(), 3);
    }

    #[test]
    fn test_creates_nested_output_dir() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("public").join("seo");
        let writer = SitemapWriter::new(&out);

        writer.write(&records(1)).unwrap();
        // Second run into the existing directory
        writer.write(&records(1)).unwrap();

        assert!(out.join("sitemap.xml").is_file());
        assert_eq!(writer.output_dir(), out.as_path());
    }

    #[test]
    fn test_minified_output() {
        let dir = TempDir::new().unwrap();
        SitemapWriter::new(dir.path())
            .minify(true)
            .write(&records(2))
            .unwrap();

        let xml = read(&dir, "sitemap.xml");
        assert!(!xml.contains('\n'));
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?><urlset"));
    }

    #[test]
    fn test_minified_output_preserves_loc() {
        let dir = TempDir::new().unwrap();
        SitemapWriter::new(dir.path())
            .minify(true)
            .write(&[UrlRecord::new("https://blog.example/a\n  b.html").lastmod("2024-03-01")])
            .unwrap();

        let xml = read(&dir, "sitemap.xml");
        assert!(xml.contains("<loc>https://blog.example/a\n  b.html</loc><lastmod>2024-03-01</lastmod>"));
        assert!(xml.ends_with("</urlset>"));
    }

    #[test]
    fn test_from_config() {
        let config = SitemapConfig {
            output: "public".into(),
            base_url: Some("https://example.com".into()),
            max_urls: 10,
            minify: true,
        };
        let writer = SitemapWriter::from_config(&config);

        assert_eq!(writer.output_dir(), Path::new("public"));
        assert_eq!(writer.base_url.as_deref(), Some("https://example.com"));
        assert_eq!(writer.max_urls, 10);
        assert!(writer.minify);
    }
}
