//! # Error Types
//!
//! Errors shared by every crate in the workspace. All errors use `thiserror`
//! for derive-based `Display` and `Error` implementations.

use thiserror::Error;

/// Top-level error type for the workflow engine core.
#[derive(Error, Debug)]
pub enum LpaError {
    /// Canonicalization failed.
    #[error("canonicalization error: {0}")]
    Canonicalization(#[from] CanonicalizationError),

    /// A value could not be parsed from its textual form.
    #[error("invalid {kind}: {value:?}")]
    Parse {
        /// What was being parsed.
        kind: &'static str,
        /// The rejected input.
        value: String,
    },
}

/// Error during canonical serialization.
#[derive(Error, Debug)]
pub enum CanonicalizationError {
    /// A field scope was applied to something that is not a JSON object.
    #[error("field scoping requires a JSON object, got {0}")]
    NotAnObject(&'static str),

    /// JSON serialization failed.
    #[error("serialization failed: {0}")]
    SerializationFailed(#[from] serde_json::Error),
}
