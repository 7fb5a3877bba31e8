//! Per-result display helpers.
//!
//! A result URL that fails to parse never breaks rendering: helpers fall
//! back to the raw string instead of propagating an error.

use url::Url;

/// Longest path rendered before truncation.
const MAX_PATH_CHARS: usize = 20;

/// Favicon URL for a result, via Google's favicon service.
///
/// Returns `None` when the result URL has no parseable hostname; the
/// caller simply renders no icon.
pub fn favicon_url(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let host = parsed.host_str()?;
    Some(format!(
        "https://www.google.com/s2/favicons?domain={}&sz=32",
        host
    ))
}

/// Compact `host + path` rendering of a result URL, truncating long
/// paths. A URL that fails to parse is rendered as-is.
pub fn shorten_url(url: &str) -> String {
    match Url::parse(url) {
        Ok(parsed) => {
            let host = parsed.host_str().unwrap_or_default();
            let path = parsed.path();
            if path.chars().count() > MAX_PATH_CHARS {
                let truncated: String = path.chars().take(MAX_PATH_CHARS).collect();
                format!("{}{}...", host, truncated)
            } else {
                format!("{}{}", host, path)
            }
        }
        Err(_) => url.to_string(),
    }
}
