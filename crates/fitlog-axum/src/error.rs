//! Error types for auth middleware and extractors, plus the JSON error
//! envelope shared by every fitlog endpoint.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use fitlog_types::FieldError;
use serde::Serialize;

/// `{"error": {...}}` response body.
#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    pub error: ErrorDetail,
}

/// Machine-readable code plus a client-safe message.
#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,
}

/// Build a JSON error response.
pub fn error_response(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
    details: Option<Vec<FieldError>>,
) -> Response {
    let body = ErrorEnvelope {
        error: ErrorDetail {
            code,
            message: message.into(),
            details,
        },
    };
    (status, Json(body)).into_response()
}

/// Why a protected request was turned away.
#[derive(Debug, thiserror::Error)]
pub enum AuthRejection {
    /// No usable `Authorization: Bearer` header.
    #[error("authentication required")]
    MissingToken,

    /// Bad signature, malformed, expired, or unknown subject.
    #[error("invalid or expired token")]
    InvalidToken,

    /// Identity could not be resolved.
    #[error("internal auth error: {0}")]
    Internal(String),
}

impl AuthRejection {
    /// Label used for the rejection counter.
    #[must_use]
    pub fn reason(&self) -> &'static str {
        match self {
            Self::MissingToken => "missing_token",
            Self::InvalidToken => "invalid_token",
            Self::Internal(_) => "internal",
        }
    }
}

impl From<fitlog_auth_core::AuthError> for AuthRejection {
    fn from(err: fitlog_auth_core::AuthError) -> Self {
        use fitlog_auth_core::AuthError;

        match err {
            AuthError::InvalidToken | AuthError::TokenExpired => Self::InvalidToken,
            other => Self::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match &self {
            Self::MissingToken => error_response(
                StatusCode::UNAUTHORIZED,
                "MISSING_TOKEN",
                self.to_string(),
                None,
            ),
            Self::InvalidToken => error_response(
                StatusCode::UNAUTHORIZED,
                "INVALID_TOKEN",
                self.to_string(),
                None,
            ),
            Self::Internal(detail) => {
                tracing::error!(error = %detail, "Authentication failed internally");
                error_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "internal server error",
                    None,
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fitlog_auth_core::AuthError;

    #[test]
    fn test_expired_and_invalid_collapse() {
        assert!(matches!(
            AuthRejection::from(AuthError::TokenExpired),
            AuthRejection::InvalidToken
        ));
        assert!(matches!(
            AuthRejection::from(AuthError::InvalidToken),
            AuthRejection::InvalidToken
        ));
    }

    #[test]
    fn test_store_failure_is_internal() {
        let rejection = AuthRejection::from(AuthError::Database("timeout".to_string()));
        assert_eq!(rejection.reason(), "internal");
        assert_eq!(
            rejection.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_statuses() {
        assert_eq!(
            AuthRejection::MissingToken.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AuthRejection::InvalidToken.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
    }
}
