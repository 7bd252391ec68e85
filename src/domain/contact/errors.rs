//! Contact capture errors.

use thiserror::Error;

use crate::domain::foundation::ValidationError;

/// Errors from the email capture workflow.
#[derive(Debug, Clone, Error)]
pub enum ContactError {
    /// The submitted address failed syntactic validation. No persistence was
    /// attempted.
    #[error("invalid email address: {0}")]
    InvalidEmail(#[source] ValidationError),

    /// The backing store rejected the operation.
    #[error("email store failure: {0}")]
    Store(String),
}

impl ContactError {
    /// Creates a store failure.
    pub fn store(message: impl Into<String>) -> Self {
        Self::Store(message.into())
    }
}

impl From<ValidationError> for ContactError {
    fn from(err: ValidationError) -> Self {
        Self::InvalidEmail(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_email_wraps_validation_error() {
        let err: ContactError = ValidationError::invalid_format("email", "missing '@'").into();
        assert!(matches!(err, ContactError::InvalidEmail(_)));
        assert!(err.to_string().starts_with("invalid email address"));
    }
}
