//! `[feed]` section configuration.

use crate::config::{ConfigDiagnostics, FieldPath, util::check_http_url};
use serde::{Deserialize, Serialize};

/// Blog whose feed is harvested when nothing else is configured.
pub const DEFAULT_BLOG: &str = "https://weirdwildly.blogspot.com";

/// Where and how the Atom feed is fetched.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// Blog address; `/atom.xml` is appended to build page requests.
    pub base: String,
    /// Records requested per page (`max-results`).
    pub page_size: usize,
    /// Per-request timeout in seconds.
    pub timeout: u64,
    /// User-Agent header sent with every request.
    pub user_agent: String,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            base: DEFAULT_BLOG.into(),
            page_size: 500,
            timeout: 30,
            user_agent: concat!("blogmap/", env!("CARGO_PKG_VERSION")).into(),
        }
    }
}

impl FeedConfig {
    pub const BASE: FieldPath = FieldPath::new("feed.base");
    pub const PAGE_SIZE: FieldPath = FieldPath::new("feed.page_size");
    pub const TIMEOUT: FieldPath = FieldPath::new("feed.timeout");

    /// Site homepage, always with a trailing slash.
    pub fn homepage(&self) -> String {
        if self.base.ends_with('/') {
            self.base.clone()
        } else {
            format!("{}/", self.base)
        }
    }

    /// Validate feed configuration.
    ///
    /// # Checks
    /// - `base` must be an http(s) URL
    /// - `page_size` and `timeout` must be non-zero
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        check_http_url(Self::BASE, &self.base, diag);

        if self.page_size == 0 {
            diag.error(Self::PAGE_SIZE, "must be at least 1");
        }
        if self.timeout == 0 {
            diag.error_with_hint(
                Self::TIMEOUT,
                "must be at least 1 second",
                "requests always carry a timeout, e.g.: timeout = 30",
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FeedConfig::default();
        assert_eq!(config.base, DEFAULT_BLOG);
        assert_eq!(config.page_size, 500);
        assert_eq!(config.timeout, 30);
        assert!(config.user_agent.starts_with("blogmap/"));
    }

    #[test]
    fn test_homepage_trailing_slash() {
        let mut config = FeedConfig::default();
        assert_eq!(config.homepage(), "https://weirdwildly.blogspot.com/");

        config.base = "https://blog.example/".into();
        assert_eq!(config.homepage(), "https://blog.example/");
    }

    #[test]
    fn test_validate_reports_each_problem() {
        let config = FeedConfig {
            base: "blog.example".into(),
            page_size: 0,
            timeout: 0,
            ..FeedConfig::default()
        };
        let mut diag = ConfigDiagnostics::new();
        config.validate(&mut diag);

        let fields: Vec<_> = diag.errors().iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec![FeedConfig::BASE, FeedConfig::PAGE_SIZE, FeedConfig::TIMEOUT]
        );
    }
}
