//! Database connection pool

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Database connection pool type alias
pub type DbPool = PgPool;

/// Pool sizing and store time bounds
#[derive(Debug, Clone)]
pub struct PoolOptions {
    /// Maximum open connections
    pub max_connections: u32,
    /// How long to wait for a free connection
    pub acquire_timeout: Duration,
    /// Upper bound for any single repository operation
    pub store_timeout: Duration,
}

impl Default for PoolOptions {
    fn default() -> Self {
        Self {
            max_connections: 10,
            acquire_timeout: Duration::from_secs(5),
            store_timeout: Duration::from_secs(10),
        }
    }
}

/// Create a new database connection pool
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    create_pool_with_options(database_url, &PoolOptions::default()).await
}

/// Create a new database connection pool with explicit options
pub async fn create_pool_with_options(
    database_url: &str,
    options: &PoolOptions,
) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(options.max_connections)
        .acquire_timeout(options.acquire_timeout)
        .connect(database_url)
        .await
}

/// Apply pending schema migrations
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
