//! `[sitemap]` section configuration.

use crate::config::{ConfigDiagnostics, FieldPath};
use crate::generator::{SITEMAP_MAX_URLS, SITEMAP_PROTOCOL_LIMIT};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where sitemap files go and how they are split.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SitemapConfig {
    /// Output directory, created if missing.
    pub output: PathBuf,
    /// Prefix joined to each filename in the index, taken as given (a full
    /// URL or a path like `/seo`). Index entries are bare filenames when unset.
    pub base_url: Option<String>,
    /// Maximum URLs per sitemap file.
    pub max_urls: usize,
    /// Strip whitespace between elements.
    pub minify: bool,
}

impl Default for SitemapConfig {
    fn default() -> Self {
        Self {
            output: ".".into(),
            base_url: None,
            max_urls: SITEMAP_MAX_URLS,
            minify: false,
        }
    }
}

impl SitemapConfig {
    pub const OUTPUT: FieldPath = FieldPath::new("sitemap.output");
    pub const MAX_URLS: FieldPath = FieldPath::new("sitemap.max_urls");

    /// Validate sitemap configuration.
    ///
    /// # Checks
    /// - `output` must not be empty
    /// - `max_urls` must be within the sitemap protocol limit
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.output.as_os_str().is_empty() {
            diag.error_with_hint(
                Self::OUTPUT,
                "must not be empty",
                "use \".\" for the current directory",
            );
        }

        if !(1..=SITEMAP_PROTOCOL_LIMIT).contains(&self.max_urls) {
            diag.error_with_hint(
                Self::MAX_URLS,
                format!(
                    "{} is out of range, must be between 1 and {SITEMAP_PROTOCOL_LIMIT}",
                    self.max_urls
                ),
                format!("the default is {SITEMAP_MAX_URLS}"),
            );
        }
    }
}
