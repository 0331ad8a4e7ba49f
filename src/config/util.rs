//! Configuration utility functions.

use super::{ConfigDiagnostics, FieldPath};

/// Check that `value` is an absolute `http`/`https` URL with a host.
///
/// Uses `url` crate for strict parsing, so port numbers, auth info and
/// paths are all accepted as long as the scheme and host are valid.
pub fn check_http_url(field: FieldPath, value: &str, diag: &mut ConfigDiagnostics) {
    const HINT: &str = "use format like https://example.com";

    match url::Url::parse(value) {
        Ok(parsed) => {
            if !matches!(parsed.scheme(), "http" | "https") {
                diag.error_with_hint(
                    field,
                    format!(
                        "scheme '{}' not supported, must be http or https",
                        parsed.scheme()
                    ),
                    HINT,
                );
            }
            if parsed.host_str().is_none() {
                diag.error_with_hint(field, "URL must have a valid host", HINT);
            }
        }
        Err(e) => {
            diag.error_with_hint(field, format!("invalid URL: {e}"), HINT);
        }
    }
}

/// Treat blank strings as absent (an exported-but-empty env var).
pub fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

// ============================================================================
// tests
// ============================================================================
