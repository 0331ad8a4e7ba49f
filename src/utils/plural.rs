//! Pluralization utilities.

/// Return the plural form of `noun` for `n` items.
///
/// # Examples
///
/// - `plural(1, "file")` -> `"file"`
/// - `plural(5, "file")` -> `"files"`
/// - `plural(2, "entry")` -> `"entries"`
#[inline]
pub fn plural(n: usize, noun: &str) -> String {
    if n == 1 {
        noun.to_string()
    } else if let Some(stem) = noun.strip_suffix('y')
        && !stem.ends_with(['a', 'e', 'i', 'o', 'u'])
    {
        format!("{stem}ies")
    } else {
        format!("{noun}s")
    }
}

/// Format count with noun, handling pluralization
///
/// # Examples
///
/// - `plural_count(0, "url")` -> `"0 urls"`
/// - `plural_count(1, "url")` -> `"1 url"`
/// - `plural_count(3, "entry")` -> `"3 entries"`
#[inline]
pub fn plural_count(count: usize, noun: &str) -> String {
    format!("{} {}", count, plural(count, noun))
}
