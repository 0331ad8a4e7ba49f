//! Feed page transport.

use super::FeedError;
use crate::{config::FeedConfig, debug};
use anyhow::{Context, Result};
use reqwest::blocking::Client;
use std::time::Duration;

/// Source of raw feed pages.
pub trait FeedClient {
    /// Fetch the page of at most `max_results` records starting at the
    /// 1-based `start_index`, returning the response body.
    fn fetch_page(&self, start_index: usize, max_results: usize) -> Result<String>;
}

/// Blocking HTTP client for Blogger-style `atom.xml` endpoints.
pub struct HttpFeedClient {
    client: Client,
    feed_url: String,
}

impl HttpFeedClient {
    pub fn new(config: &FeedConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout))
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            client,
            feed_url: format!("{}/atom.xml", config.base.trim_end_matches('/')),
        })
    }

    /// Page URL with platform redirects disabled.
    pub fn page_url(&self, start_index: usize, max_results: usize) -> String {
        format!(
            "{}?redirect=false&start-index={start_index}&max-results={max_results}",
            self.feed_url
        )
    }
}

impl FeedClient for HttpFeedClient {
    fn fetch_page(&self, start_index: usize, max_results: usize) -> Result<String> {
        let url = self.page_url(start_index, max_results);
        debug!("feed"; "GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .with_context(|| format!("request to `{url}` failed"))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status {
                url,
                status: status.as_u16(),
            }
            .into());
        }

        response
            .text()
            .with_context(|| format!("failed to read response body from `{url}`"))
    }
}
