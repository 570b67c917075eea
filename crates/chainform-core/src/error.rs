//! Error types for the form → argument pipeline.

use thiserror::Error;

/// Errors raised while validating type strings or rebuilding method arguments.
///
/// The lenient matchers never produce these; they answer "no match" with
/// `None` instead.
#[derive(Debug, Error)]
pub enum FormError {
    #[error("Invalid form path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    #[error("Index {index} in form path '{path}' exceeds the limit of {max}")]
    IndexOutOfRange { path: String, index: usize, max: usize },

    #[error("Form path '{path}' conflicts with a previously assigned field")]
    PathConflict { path: String },

    #[error("Form data is keyed by name, not by argument position")]
    NotPositional,

    #[error("Invalid bit width '{width}' in type '{ty}': expected a multiple of 8 in 8..=256")]
    InvalidBitWidth { ty: String, width: String },

    #[error("Invalid byte length '{size}' in type '{ty}': expected 1..=32")]
    InvalidBytesSize { ty: String, size: String },

    #[error("Invalid form config: {reason}")]
    InvalidConfig { reason: String },

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}
