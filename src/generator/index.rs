//! Sitemap index (`sitemapindex`) documents.
//!
//! # Index Format
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <sitemapindex xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//!   <sitemap>
//!     <loc>https://example.com/sitemap-1.xml</loc>
//!     <lastmod>2025-01-01</lastmod>
//!   </sitemap>
//! </sitemapindex>
//! ```
//!
//! Every entry carries the same `lastmod`: the date the index was generated.

use super::{SITEMAP_NS, XML_DECL, escape_xml};

/// Filename of the index document.
pub const INDEX_FILE: &str = "sitemap-index.xml";

/// Public location of a sitemap file.
///
/// `{base_url}/{filename}` when a base URL is configured, otherwise the bare
/// filename (relative to wherever the index is served from).
pub fn resolve_location(base_url: Option<&str>, filename: &str) -> String {
    match base_url.map(|url| url.trim_end_matches('/')) {
        Some(base) if !base.is_empty() => format!("{base}/{filename}"),
        _ => filename.to_string(),
    }
}

/// Serialize an index over `files` with a shared `lastmod`.
pub fn into_xml(files: &[String], base_url: Option<&str>, lastmod: &str) -> String {
    let mut xml = String::with_capacity(128 + files.len() * 128);

    xml.push_str(XML_DECL);
    xml.push_str("<sitemapindex xmlns=\"");
    xml.push_str(SITEMAP_NS);
    xml.push_str("\">\n");

    for file in files {
        xml.push_str("  <sitemap>\n    <loc>");
        xml.push_str(&escape_xml(&resolve_location(base_url, file)));
        xml.push_str("</loc>\n    <lastmod>");
        xml.push_str(&escape_xml(lastmod));
        xml.push_str("</lastmod>\n  </sitemap>\n");
    }

    xml.push_str("</sitemapindex>\n");
    xml
}
