//! Logging utilities
//!
//! Helpers that keep secrets and oversized payloads out of the logs

use reqwest::Url;

/// Query parameters whose values must never reach the logs
const SECRET_QUERY_PARAMS: &[&str] = &["apiKey", "api_key"];

/// Truncate a string to at most `max_len` bytes with a note about what was cut
pub fn truncate_content(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        return s.to_string();
    }

    let mut end = max_len;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}... ({} bytes truncated)", &s[..end], s.len() - end)
}

/// Render a URL with secret query values replaced
pub fn redact_url(url: &Url) -> String {
    if url.query().is_none() {
        return url.to_string();
    }

    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let value = if SECRET_QUERY_PARAMS.iter().any(|name| *name == k) {
                "REDACTED".to_string()
            } else {
                v.into_owned()
            };
            (k.into_owned(), value)
        })
        .collect();

    let mut redacted = url.clone();
    redacted.query_pairs_mut().clear().extend_pairs(pairs);
    redacted.to_string()
}
