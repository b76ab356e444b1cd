//! Error types for the evtjson extraction engine.
//!
//! Uses `thiserror` for ergonomic error definitions. None of these errors
//! ever escape the extraction path: the dispatcher folds every one of them
//! into an absent field and only keeps the description for diagnostics.

use thiserror::Error;

/// The top-level error type for evtjson operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Extraction error: {0}")]
    Extract(#[from] ExtractError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

/// Why a single field request came back absent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    /// The payload failed the first-byte sniff or did not parse as JSON.
    #[error("payload is not valid JSON: {0}")]
    NotJson(String),

    #[error("path not found: {0}")]
    PathNotFound(String),

    /// The path resolved, but not to a string (or a segment hit a non-object).
    #[error("type mismatch at '{path}': found {found}")]
    TypeMismatch { path: String, found: &'static str },

    #[error("unknown field: {0}")]
    UnknownField(String),

    #[error("malformed argument for {0}")]
    MalformedArgument(String),

    /// The pretty-printer could not re-serialize the payload.
    #[error("cannot format payload: {0}")]
    Format(String),

    #[error("payload of {size} bytes exceeds the configured limit of {limit} bytes")]
    PayloadTooLarge { size: usize, limit: usize },
}

impl ExtractError {
    /// Whether this error came from the JSON parser rather than from resolution.
    pub fn is_parse_failure(&self) -> bool {
        matches!(self, ExtractError::NotJson(_))
    }
}

impl From<serde_json::Error> for ExtractError {
    fn from(err: serde_json::Error) -> Self {
        ExtractError::NotJson(err.to_string())
    }
}
