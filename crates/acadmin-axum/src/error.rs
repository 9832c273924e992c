//! Axum-specific error types and mappings.
//!
//! Maps `CoreError` onto HTTP status codes and the JSON error body
//! `{ "error": <message>, "status": <code> }`.

use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use acadmin_core::{CoreError, RepositoryError};
use serde::Serialize;
use thiserror::Error;

/// Message returned for every 500; details only go to the log.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Axum-specific error type.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Bad request (invalid input or dangling reference).
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Missing or rejected credentials.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Authenticated but not allowed.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// Conflict (unique key already taken).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Service unavailable (identity service down).
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// JSON error response body.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
    status: u16,
}

impl HttpError {
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            Self::Internal(detail) => {
                tracing::error!(error = %detail, "request failed with internal error");
                INTERNAL_ERROR_MESSAGE.to_string()
            }
            Self::BadRequest(msg)
            | Self::Unauthorized(msg)
            | Self::Forbidden(msg)
            | Self::NotFound(msg)
            | Self::Conflict(msg)
            | Self::ServiceUnavailable(msg) => msg,
        };

        let body = ErrorBody {
            error: message,
            status: status.as_u16(),
        };
        let mut response = (status, axum::Json(body)).into_response();
        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}

impl From<CoreError> for HttpError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Repository(repo_err) => repo_err.into(),
            CoreError::Validation(msg) => Self::BadRequest(msg),
            CoreError::Conflict(msg) => Self::Conflict(msg),
            CoreError::NotFound(msg) => Self::NotFound(msg),
            CoreError::Unauthorized(msg) => Self::Unauthorized(msg),
            CoreError::Forbidden(msg) => Self::Forbidden(msg),
            CoreError::ExternalService(msg) => Self::ServiceUnavailable(msg),
            CoreError::Internal(msg) => Self::Internal(msg),
        }
    }
}

impl From<RepositoryError> for HttpError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(msg) => Self::NotFound(msg),
            RepositoryError::AlreadyExists(msg) => Self::Conflict(msg),
            RepositoryError::Constraint(msg) => Self::BadRequest(msg),
            RepositoryError::Storage(msg) => Self::Internal(format!("Storage: {msg}")),
            RepositoryError::Serialization(msg) => Self::Internal(format!("Serialization: {msg}")),
        }
    }
}
