//! Error types for web handlers.
//!
//! [`AppError`] bridges [`DomainError`] and HTTP responses, implementing
//! Axum's `IntoResponse` trait.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use seatwise_core::error::DomainError;
use serde::Serialize;
use std::fmt;

/// Application error type for web handlers.
///
/// Wraps domain errors and provides HTTP-friendly error responses with a
/// stable machine-readable code alongside the human-readable message.
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    message: String,
    code: String,
    source: Option<anyhow::Error>,
}

impl AppError {
    /// Create a new application error.
    #[must_use]
    pub const fn new(status: StatusCode, message: String, code: String) -> Self {
        Self {
            status,
            message,
            code,
            source: None,
        }
    }

    /// Attach the underlying error for server-side logging.
    #[must_use]
    pub fn with_source(mut self, source: anyhow::Error) -> Self {
        self.source = Some(source);
        self
    }

    /// Create a 404 Not Found error.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::NOT_FOUND,
            message.into(),
            "NOT_FOUND".to_string(),
        )
    }

    /// Create a 409 Conflict error.
    #[must_use]
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, message.into(), "CONFLICT".to_string())
    }

    /// Create a 422 Unprocessable Entity error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::UNPROCESSABLE_ENTITY,
            message.into(),
            "VALIDATION_ERROR".to_string(),
        )
    }

    /// Create a 500 Internal Server Error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            message.into(),
            "INTERNAL_SERVER_ERROR".to_string(),
        )
    }

    /// Create a 503 Service Unavailable error.
    #[must_use]
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::SERVICE_UNAVAILABLE,
            message.into(),
            "SERVICE_UNAVAILABLE".to_string(),
        )
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        let message = err.to_string();
        match err {
            DomainError::EventNotFound(_) | DomainError::AttendeeNotFound(_) => {
                Self::not_found(message)
            }
            DomainError::CapacityExhausted(_) | DomainError::DuplicateEmail(_) => {
                Self::conflict(message)
            }
            DomainError::InvalidCapacity => Self::validation(message),
            // A conflict that survived the internal retries: the caller can
            // try again, nothing is wrong with the request itself.
            DomainError::ConcurrencyConflict(_) => Self::unavailable(message),
            DomainError::Storage(_) => {
                Self::internal("storage failure").with_source(anyhow::Error::new(err))
            }
        }
    }
}

/// Error response body (JSON).
#[derive(Debug, Serialize)]
struct ErrorResponse {
    code: String,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(
                status = %self.status,
                code = %self.code,
                message = %self.message,
                "request failed"
            );
        }

        let body = ErrorResponse {
            code: self.code,
            message: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use seatwise_core::model::EventId;

    #[test]
    fn display_includes_code_and_message() {
        let err = AppError::validation("capacity must be positive");
        assert_eq!(err.to_string(), "[VALIDATION_ERROR] capacity must be positive");
    }

    #[test]
    fn capacity_exhausted_maps_to_conflict() {
        let err = AppError::from(DomainError::CapacityExhausted(EventId::new()));
        assert_eq!(err.status, StatusCode::CONFLICT);
    }

    #[test]
    fn not_found_maps_to_404() {
        let err = AppError::from(DomainError::EventNotFound(EventId::new()));
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn invalid_capacity_maps_to_422() {
        let err = AppError::from(DomainError::InvalidCapacity);
        assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn duplicate_email_maps_to_conflict() {
        let err = AppError::from(DomainError::DuplicateEmail("a@b.c".to_string()));
        assert_eq!(err.status, StatusCode::CONFLICT);
    }

    #[test]
    fn exhausted_conflict_maps_to_503() {
        let err = AppError::from(DomainError::ConcurrencyConflict(EventId::new()));
        assert_eq!(err.status, StatusCode::SERVICE_UNAVAILABLE);
    }
}
