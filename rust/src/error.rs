//! Error type shared by the schema compiler and the generator.

use thiserror::Error;

/// Errors that can occur while compiling schemas or generating IDs.
#[derive(Error, Debug)]
pub enum IdError {
    #[error("Invalid fragment {index}: {reason}")]
    SchemaValidation { index: usize, reason: String },
    #[error("Invalid ID length: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
    #[error("Invalid value for numeric fragment: {0:?}")]
    InvalidFragmentValue(String),
    #[error("Invalid charset: {0}")]
    InvalidCharset(String),
    #[error("Schema has no fragments and cannot generate IDs")]
    NotCompiled,
    #[error("ID does not match schema: {0}")]
    InvalidFormat(String),
    #[error("Pattern error: {0}")]
    Pattern(#[from] regex::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl IdError {
    pub(crate) fn invalid_fragment(index: usize, reason: impl Into<String>) -> Self {
        Self::SchemaValidation {
            index,
            reason: reason.into(),
        }
    }
}
