//! Repository traits
//!
//! Define async repository interfaces for database operations.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::DbResult;
use crate::models::*;

/// User repository trait (the credential store)
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by ID
    async fn find_by_id(&self, id: Uuid) -> DbResult<Option<UserRow>>;

    /// Find a user by email (exact, case-sensitive match)
    async fn find_by_email(&self, email: &str) -> DbResult<Option<UserRow>>;

    /// Create a new user
    ///
    /// Fails with [`DbError::Conflict`](crate::DbError::Conflict) when the
    /// email is already stored.
    async fn create(&self, user: CreateUser) -> DbResult<UserRow>;

    /// Delete a user, returning the number of rows removed
    async fn delete(&self, id: Uuid) -> DbResult<u64>;
}

/// Create user input
#[derive(Clone)]
pub struct CreateUser {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
}

impl std::fmt::Debug for CreateUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreateUser")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("password_hash", &"<redacted>")
            .finish()
    }
}

/// Exercise repository trait
#[async_trait]
pub trait ExerciseRepository: Send + Sync {
    /// List all exercises, oldest first
    async fn list(&self) -> DbResult<Vec<ExerciseRow>>;

    /// Find an exercise by ID
    async fn find_by_id(&self, id: Uuid) -> DbResult<Option<ExerciseRow>>;

    /// Create a new exercise
    async fn create(&self, exercise: CreateExercise) -> DbResult<ExerciseRow>;

    /// Replace an exercise's fields, returning whether a row matched
    async fn update(&self, id: Uuid, changes: UpdateExercise) -> DbResult<bool>;

    /// Delete an exercise, returning the number of rows removed
    async fn delete(&self, id: Uuid) -> DbResult<u64>;
}

/// Create exercise input
#[derive(Debug, Clone)]
pub struct CreateExercise {
    pub id: Uuid,
    pub name: String,
    pub exercise_type: String,
}

/// Update exercise input
#[derive(Debug, Clone)]
pub struct UpdateExercise {
    pub name: String,
    pub exercise_type: String,
}

/// Food repository trait
#[async_trait]
pub trait FoodRepository: Send + Sync {
    /// List all foods, oldest first
    async fn list(&self) -> DbResult<Vec<FoodRow>>;

    /// Find a food by ID
    async fn find_by_id(&self, id: Uuid) -> DbResult<Option<FoodRow>>;

    /// Create a new food
    async fn create(&self, food: CreateFood) -> DbResult<FoodRow>;

    /// Replace a food's fields, returning whether a row matched
    async fn update(&self, id: Uuid, changes: UpdateFood) -> DbResult<bool>;

    /// Delete a food, returning the number of rows removed
    async fn delete(&self, id: Uuid) -> DbResult<u64>;
}

/// Create food input
#[derive(Debug, Clone)]
pub struct CreateFood {
    pub id: Uuid,
    pub name: String,
    pub price: f64,
}

/// Update food input
#[derive(Debug, Clone)]
pub struct UpdateFood {
    pub name: String,
    pub price: f64,
}
