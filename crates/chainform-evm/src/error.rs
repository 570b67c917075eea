//! Error types for argument coercion.

use chainform_core::FormError;
use thiserror::Error;

/// Errors raised while turning rebuilt form arguments into ABI values.
///
/// `path` fields use the form key syntax, e.g. `"1:0"`.
#[derive(Debug, Error)]
pub enum CoerceError {
    #[error("Invalid ABI JSON: {0}")]
    InvalidAbi(#[from] serde_json::Error),

    #[error("Function '{name}' not found in ABI")]
    FunctionNotFound { name: String },

    #[error("Argument count mismatch: ABI has {expected}, got {got}")]
    ArgumentCount { expected: usize, got: usize },

    #[error("Cannot resolve type '{ty}' at '{path}': {reason}")]
    TypeResolve { path: String, ty: String, reason: String },

    #[error("Type mismatch at '{path}': expected {expected}, got {got}")]
    TypeMismatch { path: String, expected: String, got: String },

    #[error("Value {value} at '{path}' is outside [{min}, {max}]")]
    ValueOutOfRange { path: String, value: String, min: String, max: String },

    #[error("Length mismatch at '{path}': expected {expected}, got {got}")]
    Length { path: String, expected: usize, got: usize },

    #[error("Missing tuple member '{field}' at '{path}'")]
    MissingField { path: String, field: String },

    #[error("Cannot coerce '{value}' at '{path}' to {ty}: {reason}")]
    Coerce { path: String, value: String, ty: String, reason: String },

    #[error("Form error: {0}")]
    Form(#[from] FormError),
}
