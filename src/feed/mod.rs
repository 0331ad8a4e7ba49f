//! Feed harvesting.
//!
//! Walks a paginated Atom feed page by page and collects one [`Entry`] per
//! post that has an HTML permalink:
//!
//! ```text
//! atom.xml?start-index=1&max-results=500    → 500 records → continue
//! atom.xml?start-index=501&max-results=500  → 500 records → continue
//! atom.xml?start-index=1001&max-results=500 → 137 records → stop
//! ```
//!
//! A page is the last one when it returns fewer records than requested.
//! Records are counted before filtering, so a full page whose posts are all
//! skipped still moves on to the next page.

mod client;
mod parse;

pub use client::{FeedClient, HttpFeedClient};
pub use parse::{FeedPage, parse_page};

use crate::{debug, logger::StatusLine, utils::plural::plural_count};
use anyhow::{Context, Result, ensure};
use thiserror::Error;

/// One blog post, reduced to what a sitemap needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// HTML permalink of the post.
    pub location: String,
    /// `YYYY-MM-DD`, or empty when the feed carried no timestamp.
    pub last_modified: String,
}

/// Feed-level failures. Both abort the run.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("feed request `{url}` failed with status {status}")]
    Status { url: String, status: u16 },

    #[error("malformed feed document: {0}")]
    Malformed(String),
}

/// Fetch every page of the feed and return all entries in feed order.
pub fn harvest<C: FeedClient + ?Sized>(client: &C, page_size: usize) -> Result<Vec<Entry>> {
    ensure!(page_size > 0, "page size must be at least 1");

    let mut entries = Vec::new();
    let mut start_index = 1;
    let mut page_no = 1;
    let mut status = StatusLine::new("feed");

    loop {
        let body = client
            .fetch_page(start_index, page_size)
            .with_context(|| format!("failed to fetch feed page at start-index {start_index}"))?;
        let page = parse_page(&body)
            .with_context(|| format!("failed to parse feed page at start-index {start_index}"))?;

        debug!(
            "feed";
            "start-index {}: {}, {} kept, {} skipped",
            start_index,
            plural_count(page.record_count, "record"),
            page.entries.len(),
            page.skipped
        );

        let record_count = page.record_count;
        entries.extend(page.entries);
        status.update(format!(
            "page {page_no}, {}",
            plural_count(entries.len(), "entry")
        ));

        if record_count < page_size {
            break;
        }
        start_index += page_size;
        page_no += 1;
    }

    status.finish();
    Ok(entries)
}
