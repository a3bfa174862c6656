//! Application state

use std::sync::Arc;

use fitlog_auth_core::AccountService;
use fitlog_db::{DbPool, ExerciseRepository, FoodRepository};

use crate::config::Config;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Signup, login and identity resolution
    pub accounts: Arc<AccountService>,
    /// Exercise record store
    pub exercises: Arc<dyn ExerciseRepository>,
    /// Food record store
    pub foods: Arc<dyn FoodRepository>,
    /// Database pool for readiness checks; absent when running on in-memory stores
    pub pool: Option<DbPool>,
    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Create new application state
    pub fn new(
        accounts: AccountService,
        exercises: Arc<dyn ExerciseRepository>,
        foods: Arc<dyn FoodRepository>,
        config: Config,
    ) -> Self {
        Self {
            accounts: Arc::new(accounts),
            exercises,
            foods,
            pool: None,
            config: Arc::new(config),
        }
    }

    /// Attach the pool probed by `/ready`
    pub fn with_pool(mut self, pool: DbPool) -> Self {
        self.pool = Some(pool);
        self
    }

    /// Get request timeout from config
    pub fn request_timeout(&self) -> std::time::Duration {
        self.config.request_timeout
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
