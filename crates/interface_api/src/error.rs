//! API error handling

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::ValidationErrors;

use domain_claims::ClaimError;

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Validation error: {message}")]
    Validation { message: String, details: Vec<String> },

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<String>>,
}

impl ApiError {
    pub fn validation(message: impl Into<String>, details: Vec<String>) -> Self {
        ApiError::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Database(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let (error_type, message, details) = match self {
            ApiError::NotFound(msg) => ("not_found", msg, None),
            ApiError::BadRequest(msg) => ("bad_request", msg, None),
            ApiError::Validation { message, details } => {
                ("validation_error", message, Some(details))
            }
            // storage details stay in the logs
            ApiError::Database(_) => ("database_error", "Could not process claim".to_string(), None),
            ApiError::Internal(_) => ("internal_error", "Internal server error".to_string(), None),
        };

        let body = ErrorResponse {
            error: error_type.to_string(),
            message,
            details,
        };

        (status, Json(body)).into_response()
    }
}

impl From<ClaimError> for ApiError {
    fn from(err: ClaimError) -> Self {
        match err {
            ClaimError::Validation { field, message } => ApiError::validation(
                "Invalid claim submission",
                vec![format!("{}: {}", field, message)],
            ),
            ClaimError::ClaimNotFound(id) => ApiError::NotFound(format!("Claim {} not found", id)),
            ClaimError::Storage(msg) => ApiError::Database(msg),
            ClaimError::UnknownStatus(status) => {
                ApiError::Internal(format!("stored claim has unknown status {}", status))
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            // well-formed JSON that does not fit the request schema
            JsonRejection::JsonDataError(err) => {
                ApiError::validation("Invalid claim submission", vec![err.body_text()])
            }
            other => ApiError::BadRequest(other.body_text()),
        }
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        let mut details: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, field_errors)| {
                field_errors.iter().map(move |e| {
                    let message = e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string());
                    format!("{}: {}", field, message)
                })
            })
            .collect();
        details.sort();

        ApiError::validation("Invalid claim submission", details)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(ApiError::NotFound("x".into()).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::BadRequest("x".into()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::validation("x", vec![]).status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ApiError::Database("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_claim_not_found_message() {
        let err: ApiError = ClaimError::ClaimNotFound("CLM-1".into()).into();
        match err {
            ApiError::NotFound(msg) => assert_eq!(msg, "Claim CLM-1 not found"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_domain_validation_keeps_field() {
        let err: ApiError = ClaimError::validation("claim_amount", "must be greater than 0").into();
        match err {
            ApiError::Validation { details, .. } => {
                assert_eq!(details, vec!["claim_amount: must be greater than 0".to_string()])
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
