//! Board consultation errors.

use thiserror::Error;

/// Errors from the routing and consultation workflow.
///
/// A routing failure is a hard failure for the whole query; generation
/// failures are normally absorbed into per-persona failure markers, so
/// `GenerationFailed` only surfaces when the request never got as far as a
/// fan-out.
#[derive(Debug, Clone, Error)]
pub enum BoardError {
    /// Malformed input from the caller.
    #[error("Field '{field}' is invalid: {reason}")]
    Validation { field: String, reason: String },

    /// The router model call failed.
    #[error("routing failed: {0}")]
    RoutingFailed(String),

    /// The consultation could not be dispatched.
    #[error("generation failed: {0}")]
    GenerationFailed(String),
}

impl BoardError {
    /// Creates a validation error.
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Creates a routing failure.
    pub fn routing_failed(message: impl Into<String>) -> Self {
        Self::RoutingFailed(message.into())
    }

    /// Creates a generation failure.
    pub fn generation_failed(message: impl Into<String>) -> Self {
        Self::GenerationFailed(message.into())
    }
}
