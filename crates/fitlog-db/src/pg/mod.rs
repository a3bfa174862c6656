//! PostgreSQL repository implementations

mod exercise;
mod food;
mod user;

pub use exercise::PgExerciseRepository;
pub use food::PgFoodRepository;
pub use user::PgUserRepository;

use std::future::Future;
use std::time::Duration;

use crate::error::{DbError, DbResult};
use crate::DbPool;

/// All repositories bundled together
#[derive(Clone)]
pub struct Repositories {
    pub users: PgUserRepository,
    pub exercises: PgExerciseRepository,
    pub foods: PgFoodRepository,
}

impl Repositories {
    /// Create all repositories from a database pool
    pub fn new(pool: DbPool, store_timeout: Duration) -> Self {
        Self {
            users: PgUserRepository::new(pool.clone(), store_timeout),
            exercises: PgExerciseRepository::new(pool.clone(), store_timeout),
            foods: PgFoodRepository::new(pool, store_timeout),
        }
    }
}

/// Run a query under the store time bound.
///
/// An elapsed bound surfaces as [`DbError::Timeout`]; the query future is
/// dropped, which returns its connection to the pool.
pub(crate) async fn bounded<T, F>(limit: Duration, query: F) -> DbResult<T>
where
    F: Future<Output = Result<T, sqlx::Error>>,
{
    match tokio::time::timeout(limit, query).await {
        Ok(result) => result.map_err(DbError::from),
        Err(_) => {
            tracing::warn!(timeout = ?limit, "Store operation timed out");
            Err(DbError::Timeout(limit))
        }
    }
}
