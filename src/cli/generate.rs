//! Sitemap generation orchestration.
//!
//! Pipeline phases:
//! - **Harvest** - Walk every feed page and collect post permalinks
//! - **Assemble** - Homepage first, then posts in feed order
//! - **Write** - Split into sitemap files, plus an index when split

use crate::{
    config::Config,
    feed::{self, Entry, FeedClient, HttpFeedClient},
    generator::{SitemapWriter, UrlRecord, WriteReport},
    log,
    utils::{date::today_utc, plural::plural_count},
};
use anyhow::Result;
use std::fmt;

/// Outcome of one run, printed to stdout on success.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Homepage plus harvested entries.
    pub total_urls: usize,
    pub report: WriteReport,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total URLs: {}", self.total_urls)?;
        write!(f, "Written files: {}", self.report.written.join(", "))?;
        if let Some(index) = &self.report.index {
            write!(f, "\nSitemap index: {index}")?;
        }
        Ok(())
    }
}

/// Harvest the configured feed over HTTP and write the sitemap.
pub fn generate_sitemap(config: &Config) -> Result<RunSummary> {
    let client = HttpFeedClient::new(&config.feed)?;
    generate_with(&client, config)
}

/// Run the pipeline against any feed source.
pub fn generate_with<C: FeedClient + ?Sized>(client: &C, config: &Config) -> Result<RunSummary> {
    log!("feed"; "harvesting {}", config.feed.base);
    let entries = feed::harvest(client, config.feed.page_size)?;
    log!("feed"; "{} with permalinks", plural_count(entries.len(), "entry"));

    let records = assemble_records(&config.feed.homepage(), &today_utc(), entries);
    let report = SitemapWriter::from_config(&config.sitemap).write(&records)?;

    Ok(RunSummary {
        total_urls: records.len(),
        report,
    })
}

/// Homepage dated `today`, followed by every entry in order.
pub fn assemble_records(homepage: &str, today: &str, entries: Vec<Entry>) -> Vec<UrlRecord> {
    let mut records = Vec::with_capacity(entries.len() + 1);
    records.push(UrlRecord::new(homepage).lastmod(today));
    records.extend(entries.into_iter().map(UrlRecord::from));
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{cell::Cell, fs};
    use tempfile::TempDir;

    struct StaticFeed {
        pages: Vec<String>,
        next: Cell<usize>,
    }

    impl FeedClient for StaticFeed {
        fn fetch_page(&self, _start_index: usize, _max_results: usize) -> Result<String> {
            let idx = self.next.replace(self.next.get() + 1);
            self.pages
                .get(idx)
                .cloned()
                .ok_or_else(|| anyhow::anyhow!("unexpected request for page {idx}"))
        }
    }

    fn feed_of(count: usize) -> String {
        let entries: String = (1..=count)
            .map(|n| {
                format!(
                    r#"<entry><updated>2023-05-0{n}T12:00:00Z</updated><link rel="alternate" type="text/html" href="https://blog.example/{n}.html"/></entry>"#
                )
            })
            .collect();
        format!(r#"<feed xmlns="http://www.w3.org/2005/Atom">{entries}</feed>"#)
    }

    fn config_for(dir: &TempDir) -> Config {
        let mut config = Config::default();
        config.feed.base = "https://blog.example".into();
        config.sitemap.output = dir.path().to_path_buf();
        config
    }

    #[test]
    fn test_three_entries_single_sitemap() {
        let dir = TempDir::new().unwrap();
        let client = StaticFeed {
            pages: vec![feed_of(3)],
            next: Cell::new(0),
        };

        let summary = generate_with(&client, &config_for(&dir)).unwrap();

        assert_eq!(summary.total_urls, 4);
        assert_eq!(summary.report.written, vec!["sitemap.xml"]);
        assert_eq!(summary.report.index, None);

        let xml = fs::read_to_string(dir.path().join("sitemap.xml")).unwrap();
        assert_eq!(xml.matches("<url>").count(), 4);
        let home = xml.find("<loc>https://blog.example/</loc>").unwrap();
        let first = xml.find("<loc>https://blog.example/1.html</loc>").unwrap();
        assert!(home < first);
        assert!(xml.contains("<lastmod>2023-05-03</lastmod>"));
        assert!(!dir.path().join("sitemap-index.xml").exists());
    }

    #[test]
    fn test_split_run_reports_index() {
        let dir = TempDir::new().unwrap();
        let mut config = config_for(&dir);
        config.sitemap.max_urls = 2;
        config.sitemap.base_url = Some("https://example.com".into());
        let client = StaticFeed {
            pages: vec![feed_of(3)],
            next: Cell::new(0),
        };

        let summary = generate_with(&client, &config).unwrap();

        assert_eq!(summary.total_urls, 4);
        assert_eq!(
            summary.report.written,
            vec!["sitemap-1.xml", "sitemap-2.xml", "sitemap-index.xml"]
        );
        let index = fs::read_to_string(dir.path().join("sitemap-index.xml")).unwrap();
        assert!(index.contains("<loc>https://example.com/sitemap-1.xml</loc>"));
        assert!(index.contains("<loc>https://example.com/sitemap-2.xml</loc>"));
    }

    #[test]
    fn test_fetch_failure_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let client = StaticFeed {
            pages: vec![],
            next: Cell::new(0),
        };

        assert!(generate_with(&client, &config_for(&dir)).is_err());
        assert!(!dir.path().join("sitemap.xml").exists());
    }

    #[test]
    fn test_assemble_records_homepage_first() {
        let entries = vec![
            Entry {
                location: "https://blog.example/a.html".into(),
                last_modified: "2023-05-01".into(),
            },
            Entry {
                location: "https://blog.example/b.html".into(),
                last_modified: String::new(),
            },
        ];
        let records = assemble_records("https://blog.example/", "2025-01-01", entries);

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].loc, "https://blog.example/");
        assert_eq!(records[0].lastmod.as_deref(), Some("2025-01-01"));
        assert_eq!(records[1].loc, "https://blog.example/a.html");
        assert_eq!(records[2].lastmod, None);
    }

    #[test]
    fn test_summary_display() {
        let single = RunSummary {
            total_urls: 4,
            report: WriteReport {
                written: vec!["sitemap.xml".into()],
                index: None,
            },
        };
        assert_eq!(single.to_string(), "Total URLs: 4\nWritten files: sitemap.xml");

        let split = RunSummary {
            total_urls: 100_000,
            report: WriteReport {
                written: vec![
                    "sitemap-1.xml".into(),
                    "sitemap-2.xml".into(),
                    "sitemap-index.xml".into(),
                ],
                index: Some("sitemap-index.xml".into()),
            },
        };
        assert_eq!(
            split.to_string(),
            "Total URLs: 100000\nWritten files: sitemap-1.xml, sitemap-2.xml, sitemap-index.xml\nSitemap index: sitemap-index.xml"
        );
    }
}
