//! Error types for the fitlog API service.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use fitlog_auth_core::AuthError;
use fitlog_axum::error_response;
use fitlog_db::DbError;
use fitlog_types::{field_errors, FieldError};
use validator::ValidationErrors;

/// API error type
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Request validation failed")]
    Validation(Vec<FieldError>),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Database error")]
    Database(#[from] DbError),

    #[error("Auth error")]
    Auth(#[from] AuthError),
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Auth(err) => StatusCode::from_u16(err.status_code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_FAILED",
            Self::BadRequest(_) => "BAD_REQUEST",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::Database(_) => "INTERNAL_ERROR",
            Self::Auth(err) => err.error_code(),
        }
    }

    fn is_internal(&self) -> bool {
        self.status_code().is_server_error()
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(field_errors(&errors))
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.error_code();

        // Internal details are logged, never returned
        if self.is_internal() {
            tracing::error!(error = ?self, "Internal API error");
            return error_response(status, code, "internal server error", None);
        }

        match self {
            Self::Validation(details) => {
                error_response(status, code, "request validation failed", Some(details))
            }
            Self::Auth(AuthError::Validation(errors)) => error_response(
                status,
                code,
                "request validation failed",
                Some(field_errors(&errors)),
            ),
            Self::Auth(err) => error_response(status, code, err.public_message(), None),
            other => error_response(status, code, other.to_string(), None),
        }
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
