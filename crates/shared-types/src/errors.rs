//! # Error Types
//!
//! Defines error types used across subsystems.

use thiserror::Error;

/// Errors raised while decoding catalog records.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RecordError {
    /// The document is not valid JSON or does not have the catalog shape.
    #[error("Malformed catalog document: {0}")]
    Malformed(String),
}

impl From<serde_json::Error> for RecordError {
    fn from(e: serde_json::Error) -> Self {
        RecordError::Malformed(e.to_string())
    }
}
