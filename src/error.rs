/// Unified error types for player identity resolution
use thiserror::Error;

/// Errors raised by the resolver's collaborators
///
/// The resolver itself never returns these to its callers: remote failures are
/// logged and degrade to an absent result.
#[derive(Error, Debug)]
pub enum IdentityError {
    /// Remote identity service answered with an error or an unusable payload
    #[error("Remote lookup failed: {0}")]
    RemoteLookup(String),

    /// Transport-level HTTP errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration / input validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Persisted mapping store errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// JSON encoding/decoding errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for identity operations
pub type IdentityResult<T> = Result<T, IdentityError>;
