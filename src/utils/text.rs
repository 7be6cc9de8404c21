//! UTF-8-safe truncation helpers
//!
//! Snippets and extracted page text are full of multi-byte characters
//! (Japanese result pages, emoji), so all truncation happens on char
//! boundaries.

/// Truncate to at most `max_chars` characters (not bytes).
///
/// ```
/// # use browser_search::utils::truncate_chars;
/// assert_eq!(truncate_chars("Hello, World!", 5), "Hello");
/// assert_eq!(truncate_chars("最新情報", 2), "最新");
/// assert_eq!(truncate_chars("Hi", 100), "Hi");
/// ```
#[inline]
pub fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        None => s,
        Some((byte_idx, _)) => &s[..byte_idx],
    }
}

/// Truncate for display, appending `...` when anything was cut.
#[must_use]
pub fn ellipsize(s: &str, max_chars: usize) -> String {
    let truncated = truncate_chars(s, max_chars);
    if truncated.len() < s.len() {
        format!("{truncated}...")
    } else {
        truncated.to_string()
    }
}
