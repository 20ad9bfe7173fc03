//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into [`AccountsError`]
//! via `#[from]`. Adapters wrap their IO failures in [`AccountsError::Storage`].

/// Top-level error returned by domain and application operations.
#[derive(Debug, thiserror::Error)]
pub enum AccountsError {
    /// Input failed schema or invariant checks.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The requested record does not exist.
    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    /// The persistence layer failed.
    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Reasons an account payload can be rejected.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    /// A required field was absent from the payload.
    #[error("Invalid Account: missing {0}")]
    MissingField(&'static str),

    /// A required field was present but blank.
    #[error("Invalid Account: {0} must not be empty")]
    EmptyField(&'static str),

    /// The body was not valid JSON or did not match the account schema.
    #[error("Invalid Account: body contained bad or no data")]
    InvalidJson(#[source] serde_json::Error),
}

/// Lookup of a record by id found nothing.
#[derive(Debug, thiserror::Error)]
#[error("{entity} with ID {id} not found")]
pub struct NotFoundError {
    /// Kind of record that was looked up (e.g. `"Account"`).
    pub entity: &'static str,
    /// The id as the caller supplied it.
    pub id: String,
}
