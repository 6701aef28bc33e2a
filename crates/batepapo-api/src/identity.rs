use axum::http::HeaderMap;

use crate::sanitize::sanitize;

/// Header carrying the caller's participant name.
pub const USER_HEADER: &str = "user";

/// The sanitized caller name, or an empty string when the header is absent or
/// not valid UTF-8. An empty name matches no participant.
pub fn requesting_user(headers: &HeaderMap) -> String {
    // `HeaderValue::to_str` only accepts ASCII; names registered through the
    // JSON body may carry accents.
    headers
        .get(USER_HEADER)
        .and_then(|v| std::str::from_utf8(v.as_bytes()).ok())
        .map(sanitize)
        .unwrap_or_default()
}
