//! Config field path used to point diagnostics at a TOML key.

use owo_colors::OwoColorize;
use std::fmt;

/// Dotted path of a config field, e.g. `sitemap.max_urls`.
///
/// Sections expose their fields as associated constants:
///
/// ```ignore
/// diag.error(SitemapConfig::MAX_URLS, "must be at least 1");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldPath(pub &'static str);

impl FieldPath {
    #[inline]
    pub const fn new(path: &'static str) -> Self {
        Self(path)
    }

    #[inline]
    pub const fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format_args!("`{}`", self.0).bright_blue())
    }
}

impl AsRef<str> for FieldPath {
    fn as_ref(&self) -> &str {
        self.0
    }
}
