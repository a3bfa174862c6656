//! Database errors

use std::time::Duration;

use thiserror::Error;

/// Database errors
#[derive(Error, Debug)]
pub enum DbError {
    /// SQLx error
    #[error("database error: {0}")]
    Sqlx(sqlx::Error),

    /// Unique constraint violated
    #[error("unique constraint violated: {0}")]
    Conflict(String),

    /// Store operation exceeded its time bound
    #[error("store operation timed out after {0:?}")]
    Timeout(Duration),

    /// Store unreachable (non-SQL backends)
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        if let Some(db_err) = err.as_database_error() {
            if db_err.is_unique_violation() {
                let constraint = db_err.constraint().unwrap_or("unknown").to_string();
                return Self::Conflict(constraint);
            }
        }
        Self::Sqlx(err)
    }
}

/// Result alias for repository operations
pub type DbResult<T> = Result<T, DbError>;
