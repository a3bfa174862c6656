//! Database row models
//!
//! These types map directly to database rows using SQLx's FromRow derive.

use chrono::{DateTime, Utc};
use fitlog_types::{Exercise, Food, User, UserId};
use sqlx::FromRow;
use uuid::Uuid;

/// User row from the database
///
/// The only type that carries the password hash. Convert with
/// [`UserRow::to_user`] before anything leaves the service.
#[derive(Clone, FromRow)]
pub struct UserRow {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Exercise row from the database
#[derive(Debug, Clone, FromRow)]
pub struct ExerciseRow {
    pub id: Uuid,
    pub name: String,
    pub exercise_type: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Food row from the database
#[derive(Debug, Clone, FromRow)]
pub struct FoodRow {
    pub id: Uuid,
    pub name: String,
    pub price: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserRow {
    /// Convert to domain UserId
    pub fn user_id(&self) -> UserId {
        UserId(self.id)
    }

    /// Public view without the password hash
    pub fn to_user(&self) -> User {
        User {
            id: self.user_id(),
            email: self.email.clone(),
        }
    }
}

impl std::fmt::Debug for UserRow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserRow")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("password_hash", &"<redacted>")
            .field("created_at", &self.created_at)
            .finish()
    }
}

impl From<ExerciseRow> for Exercise {
    fn from(row: ExerciseRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            exercise_type: row.exercise_type,
        }
    }
}

impl From<FoodRow> for Food {
    fn from(row: FoodRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            price: row.price,
        }
    }
}
