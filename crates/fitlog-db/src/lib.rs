//! Fitlog DB - Database abstractions
//!
//! SQLx-based storage layer for fitlog services: the credential store for
//! user accounts plus the exercise and food record stores.
//!
//! # Example
//!
//! ```rust,ignore
//! use fitlog_db::{create_pool, Repositories, PoolOptions};
//!
//! let options = PoolOptions::default();
//! let pool = create_pool_with_options("postgres://localhost/fitlog", &options).await?;
//! let repos = Repositories::new(pool, options.store_timeout);
//!
//! let user = repos.users.find_by_email("user@example.com").await?;
//! ```

pub mod error;
#[cfg(feature = "test-util")]
pub mod memory;
pub mod models;
pub mod pg;
pub mod pool;
pub mod repo;

pub use error::{DbError, DbResult};
pub use models::*;
pub use pg::Repositories;
pub use pool::{create_pool, create_pool_with_options, run_migrations, DbPool, PoolOptions};
pub use repo::*;
