//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use accounts_domain::error::AccountsError;

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    status: u16,
    error: &'static str,
    message: String,
}

/// The request declared a media type the endpoint does not accept.
#[derive(Debug, thiserror::Error)]
#[error("Content-Type must be {expected}")]
pub struct UnsupportedMediaType {
    /// The media type the endpoint requires.
    pub expected: &'static str,
}

/// Every failure a handler can return, mapped to a status code on response.
#[derive(Debug)]
pub enum ApiError {
    /// Validation, lookup, or storage failure from the application layer.
    Domain(AccountsError),
    /// Rejected by the Content-Type guard.
    UnsupportedMediaType(UnsupportedMediaType),
}

impl From<AccountsError> for ApiError {
    fn from(err: AccountsError) -> Self {
        Self::Domain(err)
    }
}

impl From<UnsupportedMediaType> for ApiError {
    fn from(err: UnsupportedMediaType) -> Self {
        Self::UnsupportedMediaType(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::Domain(AccountsError::Validation(err)) => {
                (StatusCode::BAD_REQUEST, err.to_string())
            }
            Self::Domain(AccountsError::NotFound(err)) => (StatusCode::NOT_FOUND, err.to_string()),
            Self::Domain(AccountsError::Storage(err)) => {
                tracing::error!(error = %err, "storage error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
            Self::UnsupportedMediaType(err) => {
                (StatusCode::UNSUPPORTED_MEDIA_TYPE, err.to_string())
            }
        };

        let body = ErrorBody {
            status: status.as_u16(),
            error: status.canonical_reason().unwrap_or("Unknown"),
            message,
        };
        (status, Json(body)).into_response()
    }
}
