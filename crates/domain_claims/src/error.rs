//! Claims domain errors

use core_kernel::PortError;
use thiserror::Error;

/// Errors that can occur in the claims domain
#[derive(Debug, Error)]
pub enum ClaimError {
    #[error("Invalid {field}: {message}")]
    Validation { field: String, message: String },

    #[error("Claim not found: {0}")]
    ClaimNotFound(String),

    #[error("Unknown claim status: {0}")]
    UnknownStatus(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl ClaimError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        ClaimError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl From<PortError> for ClaimError {
    fn from(err: PortError) -> Self {
        match err {
            PortError::NotFound { id, .. } => ClaimError::ClaimNotFound(id),
            other => ClaimError::Storage(other.to_string()),
        }
    }
}
