//! Date helpers for sitemap `lastmod` values.
//!
//! Sitemaps only carry calendar dates (`YYYY-MM-DD`). Feed timestamps are
//! reduced to the date in their own offset, and anything unparseable falls
//! back to the first 10 characters of the raw string.
//!
//! # Examples
//!
//! ```ignore
//! assert_eq!(normalize_lastmod("2023-05-01T12:00:00Z"), "2023-05-01");
//! assert_eq!(normalize_lastmod("2023-05-01T23:30:00.000-07:00"), "2023-05-01");
//! assert_eq!(normalize_lastmod("garbled-data-xyz"), "garbled-da");
//! ```

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Number of characters kept when a timestamp cannot be parsed.
const FALLBACK_LEN: usize = 10;

/// Today's date in UTC, formatted as `YYYY-MM-DD`.
pub fn today_utc() -> String {
    Utc::now().date_naive().format(DATE_FORMAT).to_string()
}

/// Reduce a feed timestamp to a sitemap date.
///
/// Empty input stays empty.
pub fn normalize_lastmod(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }
    match parse_date(raw) {
        Some(date) => date.format(DATE_FORMAT).to_string(),
        None => raw.chars().take(FALLBACK_LEN).collect(),
    }
}

/// Parse an ISO-8601 timestamp into its calendar date.
///
/// Accepts RFC 3339 (`Z` or numeric offset, optional fraction), naive
/// date-times and bare dates. The date is taken in the timestamp's own
/// offset, not converted to UTC.
fn parse_date(s: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.date());
    }
    NaiveDate::parse_from_str(s, DATE_FORMAT).ok()
}
