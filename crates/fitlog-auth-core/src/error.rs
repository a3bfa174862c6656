//! Auth errors

use fitlog_db::DbError;
use thiserror::Error;
use validator::ValidationErrors;

/// Authentication errors
#[derive(Error, Debug)]
pub enum AuthError {
    /// Signup input failed field validation
    #[error("validation failed")]
    Validation(#[from] ValidationErrors),

    /// An account with this email already exists
    #[error("email already registered")]
    EmailTaken,

    /// Unknown email or wrong password
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Invalid token (malformed, bad signature, unknown subject)
    #[error("invalid token")]
    InvalidToken,

    /// Token has expired
    #[error("token expired")]
    TokenExpired,

    /// User not found
    #[error("user not found")]
    UserNotFound,

    /// Database error
    #[error("database error: {0}")]
    Database(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::InvalidCredentials | Self::InvalidToken | Self::TokenExpired => 401,
            Self::UserNotFound => 404,
            Self::EmailTaken => 409,
            Self::Database(_) | Self::Configuration(_) | Self::Internal(_) => 500,
        }
    }

    /// Get error code for API responses
    ///
    /// Expired and invalid tokens share a code so clients cannot tell them apart.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_FAILED",
            Self::EmailTaken => "EMAIL_TAKEN",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::InvalidToken | Self::TokenExpired => "INVALID_TOKEN",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::Database(_) | Self::Configuration(_) | Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Message safe to return to clients
    pub fn public_message(&self) -> &'static str {
        match self {
            Self::Validation(_) => "request validation failed",
            Self::EmailTaken => "email already registered",
            Self::InvalidCredentials => "invalid email or password",
            Self::InvalidToken | Self::TokenExpired => "invalid or expired token",
            Self::UserNotFound => "user not found",
            Self::Database(_) | Self::Configuration(_) | Self::Internal(_) => {
                "internal server error"
            }
        }
    }
}

impl From<DbError> for AuthError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::Conflict(constraint) => {
                tracing::debug!(%constraint, "Unique constraint rejected insert");
                Self::EmailTaken
            }
            other => Self::Database(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_failures_are_indistinguishable() {
        let expired = AuthError::TokenExpired;
        let invalid = AuthError::InvalidToken;
        assert_eq!(expired.status_code(), invalid.status_code());
        assert_eq!(expired.error_code(), invalid.error_code());
        assert_eq!(expired.public_message(), invalid.public_message());
    }

    #[test]
    fn test_unique_violation_maps_to_email_taken() {
        let err = AuthError::from(DbError::Conflict("users_email_key".to_string()));
        assert!(matches!(err, AuthError::EmailTaken));
        assert_eq!(err.status_code(), 409);
    }

    #[test]
    fn test_store_failures_hide_details() {
        let err = AuthError::from(DbError::Unavailable("connection refused".to_string()));
        assert_eq!(err.status_code(), 500);
        assert_eq!(err.error_code(), "INTERNAL_ERROR");
        assert!(!err.public_message().contains("connection"));
    }
}
