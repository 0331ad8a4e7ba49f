//! Command-line interface definitions.

use clap::{ColorChoice, Parser};
use std::path::PathBuf;

/// Generate sitemap.xml (or a sitemap index) from a blog's paginated Atom feed
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: blogmap.toml, if present)
    #[arg(short = 'C', long, value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Blog address whose atom.xml is harvested
    #[arg(short, long, env = "BLOG_BASE", value_hint = clap::ValueHint::Url)]
    pub blog: Option<String>,

    /// Public URL the sitemap files are served from (used in the sitemap index)
    #[arg(short = 'u', long, env = "PAGES_BASE_URL", value_hint = clap::ValueHint::Url)]
    pub base_url: Option<String>,

    /// Output directory for sitemap files
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub output: Option<PathBuf>,

    /// Records requested per feed page
    #[arg(long)]
    pub page_size: Option<usize>,

    /// Per-request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Maximum URLs per sitemap file before splitting
    #[arg(long)]
    pub max_urls: Option<usize>,

    /// Minify the XML output
    #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub minify: Option<bool>,

    /// Enable verbose output for debugging
    #[arg(short, long)]
    pub verbose: bool,
}
