//! Run configuration.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # [feed] and [sitemap]
//! ├── types/         # ConfigError, ConfigDiagnostics, FieldPath
//! ├── util.rs        # Shared validation helpers
//! └── mod.rs         # Config (this file)
//! ```
//!
//! # Layers
//!
//! Later layers override earlier ones:
//!
//! | Layer                 | Example                                   |
//! |-----------------------|-------------------------------------------|
//! | Built-in defaults     | `page_size = 500`                         |
//! | `blogmap.toml`        | `[sitemap] base_url = "https://x.dev"`    |
//! | Environment           | `BLOG_BASE`, `PAGES_BASE_URL`             |
//! | Command line          | `--output public`                         |
//!
//! Environment variables and flags are merged by `clap` before they reach
//! this module, so the CLI struct already carries the winning value.

pub mod section;
pub mod types;
mod util;

pub use section::{FeedConfig, SitemapConfig};
pub use types::{ConfigDiagnostics, ConfigError, FieldPath};

use crate::{cli::Cli, debug, log};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use util::non_blank;

/// Config file picked up from the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "blogmap.toml";

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing blogmap.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Config file the values were read from, if any (internal use only)
    #[serde(skip)]
    pub config_path: Option<PathBuf>,

    /// Feed source settings
    #[serde(default)]
    pub feed: FeedConfig,

    /// Sitemap output settings
    #[serde(default)]
    pub sitemap: SitemapConfig,
}

impl Config {
    /// Load configuration from CLI arguments.
    ///
    /// An explicitly named config file must exist; the default one is
    /// optional.
    pub fn load(cli: &Cli) -> Result<Self> {
        let mut config = match &cli.config {
            Some(path) => Self::from_path(path)?,
            None => {
                let path = Path::new(DEFAULT_CONFIG_FILE);
                if path.is_file() {
                    Self::from_path(path)?
                } else {
                    Self::default()
                }
            }
        };

        config.apply_cli(cli);
        if let Some(path) = &config.config_path {
            debug!("config"; "loaded {}", path.display());
        }
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (mut config, ignored) = Self::parse_with_ignored(&content)?;
        if !ignored.is_empty() {
            log!("config"; "ignoring unknown fields in {}: {}", path.display(), ignored.join(", "));
        }

        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>)> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })
        .map_err(ConfigError::from)?;
        Ok((config, ignored))
    }

    // ========================================================================
    // cli configuration updates
    // ========================================================================

    /// Apply command-line (and environment) overrides.
    fn apply_cli(&mut self, cli: &Cli) {
        crate::logger::set_verbose(cli.verbose);

        if let Some(blog) = non_blank(cli.blog.clone()) {
            self.feed.base = blog;
        }
        Self::update_option(&mut self.feed.page_size, cli.page_size.as_ref());
        Self::update_option(&mut self.feed.timeout, cli.timeout.as_ref());
        Self::update_option(&mut self.sitemap.output, cli.output.as_ref());
        Self::update_option(&mut self.sitemap.max_urls, cli.max_urls.as_ref());
        Self::update_option(&mut self.sitemap.minify, cli.minify.as_ref());

        if cli.base_url.is_some() {
            self.sitemap.base_url = cli.base_url.clone();
        }

        self.feed.base = self.feed.base.trim().to_string();
        self.sitemap.base_url = non_blank(self.sitemap.base_url.take());
    }

    /// Update config option if CLI value is provided.
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate every section, reporting all problems at once.
    pub fn validate(&self) -> Result<()> {
        let mut diag = ConfigDiagnostics::new();

        self.feed.validate(&mut diag);
        self.sitemap.validate(&mut diag);

        diag.into_result()
            .map_err(|e| ConfigError::Diagnostics(e).into())
    }
}

// ============================================================================
// tests
// ============================================================================
