//! Sitemap (`urlset`) documents.
//!
//! # Sitemap Format
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//!   <url>
//!     <loc>https://example.com/</loc>
//!     <lastmod>2025-01-01</lastmod>
//!   </url>
//! </urlset>
//! ```

use super::{SITEMAP_NS, XML_DECL, escape_xml};
use crate::feed::Entry;

/// URLs per sitemap file, kept below the protocol limit with margin.
pub const SITEMAP_MAX_URLS: usize = 49_000;

/// Hard limit of the sitemap protocol.
pub const SITEMAP_PROTOCOL_LIMIT: usize = 50_000;

/// Filename used when all records fit in one document.
pub const SINGLE_FILE: &str = "sitemap.xml";

/// `sitemap-{n}.xml`, 1-based.
pub fn part_filename(n: usize) -> String {
    format!("sitemap-{n}.xml")
}

/// How often a page is expected to change.
#[allow(dead_code)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeFreq {
    Always,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Never,
}

impl ChangeFreq {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Always => "always",
            Self::Hourly => "hourly",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
            Self::Never => "never",
        }
    }
}

/// One `<url>` of a sitemap.
///
/// `changefreq` and `priority` are never set by the feed pipeline and are
/// only written when present.
#[derive(Debug, Clone, PartialEq)]
pub struct UrlRecord {
    pub loc: String,
    pub lastmod: Option<String>,
    pub changefreq: Option<ChangeFreq>,
    pub priority: Option<f32>,
}

impl UrlRecord {
    pub fn new(loc: impl Into<String>) -> Self {
        Self {
            loc: loc.into(),
            lastmod: None,
            changefreq: None,
            priority: None,
        }
    }

    /// Set `lastmod`; an empty date leaves it unset.
    pub fn lastmod(mut self, date: impl Into<String>) -> Self {
        let date = date.into();
        self.lastmod = (!date.is_empty()).then_some(date);
        self
    }

    #[allow(dead_code)]
    pub fn changefreq(mut self, changefreq: ChangeFreq) -> Self {
        self.changefreq = Some(changefreq);
        self
    }

    #[allow(dead_code)]
    pub fn priority(mut self, priority: f32) -> Self {
        self.priority = Some(priority);
        self
    }
}

impl From<Entry> for UrlRecord {
    fn from(entry: Entry) -> Self {
        Self::new(entry.location).lastmod(entry.last_modified)
    }
}

/// Split records into consecutive chunks of at most `max` records.
///
/// Always returns at least one chunk; an empty input yields one empty chunk.
pub fn chunk_records(records: &[UrlRecord], max: usize) -> Vec<&[UrlRecord]> {
    if records.is_empty() {
        return vec![records];
    }
    records.chunks(max).collect()
}

/// Serialize records as a `urlset` document.
pub fn into_xml(records: &[UrlRecord]) -> String {
    let mut xml = String::with_capacity(64 + records.len() * 96);

    xml.push_str(XML_DECL);
    xml.push_str("<urlset xmlns=\"");
    xml.push_str(SITEMAP_NS);
    xml.push_str("\">\n");

    for record in records {
        xml.push_str("  <url>\n    <loc>");
        xml.push_str(&escape_xml(&record.loc));
        xml.push_str("</loc>\n");
        if let Some(lastmod) = &record.lastmod {
            xml.push_str("    <lastmod>");
            xml.push_str(&escape_xml(lastmod));
            xml.push_str("</lastmod>\n");
        }
        if let Some(changefreq) = record.changefreq {
            xml.push_str("    <changefreq>");
            xml.push_str(changefreq.as_str());
            xml.push_str("</changefreq>\n");
        }
        if let Some(priority) = record.priority {
            xml.push_str(&format!("    <priority>{priority:.1}</priority>\n"));
        }
        xml.push_str("  </url>\n");
    }

    xml.push_str("</urlset>\n");
    xml
}
