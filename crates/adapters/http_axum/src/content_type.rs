//! Content-Type guard run at the top of every account handler.

use axum::http::HeaderMap;
use axum::http::header::CONTENT_TYPE;

use crate::error::UnsupportedMediaType;

/// Media type required by the account endpoints.
pub const APPLICATION_JSON: &str = "application/json";

/// Ensure the request declares exactly `media_type` as its `Content-Type`.
///
/// Parameters such as `; charset=utf-8` are not tolerated.
///
/// # Errors
///
/// Returns [`UnsupportedMediaType`] when the header is missing, not valid
/// UTF-8, or different from `media_type`.
pub fn check_content_type(
    headers: &HeaderMap,
    media_type: &'static str,
) -> Result<(), UnsupportedMediaType> {
    let content_type = headers.get(CONTENT_TYPE).map(|value| value.to_str());
    if matches!(content_type, Some(Ok(value)) if value == media_type) {
        return Ok(());
    }

    tracing::error!(content_type = ?content_type, "Invalid Content-Type");
    Err(UnsupportedMediaType {
        expected: media_type,
    })
}
