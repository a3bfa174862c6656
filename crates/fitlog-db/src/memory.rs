//! In-memory repositories for tests
//!
//! Behave like the Postgres implementations, including the unique email
//! constraint, and can be switched offline to simulate store outages.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use crate::models::{ExerciseRow, FoodRow, UserRow};
use crate::repo::{
    CreateExercise, CreateFood, CreateUser, ExerciseRepository, FoodRepository, UpdateExercise,
    UpdateFood, UserRepository,
};

/// Shared outage switch
#[derive(Default, Clone)]
struct Outage(Arc<AtomicBool>);

impl Outage {
    fn set(&self, offline: bool) {
        self.0.store(offline, Ordering::SeqCst);
    }

    fn check(&self) -> DbResult<()> {
        if self.0.load(Ordering::SeqCst) {
            return Err(DbError::Unavailable("store offline".to_string()));
        }
        Ok(())
    }
}

/// In-memory user repository
#[derive(Default, Clone)]
pub struct MemoryUserRepository {
    users: Arc<DashMap<Uuid, UserRow>>,
    by_email: Arc<DashMap<String, Uuid>>,
    outage: Outage,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users
    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Make every operation fail with [`DbError::Unavailable`]
    pub fn set_offline(&self, offline: bool) {
        self.outage.set(offline);
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> DbResult<Option<UserRow>> {
        self.outage.check()?;
        Ok(self.users.get(&id).map(|r| r.value().clone()))
    }

    async fn find_by_email(&self, email: &str) -> DbResult<Option<UserRow>> {
        self.outage.check()?;
        Ok(self
            .by_email
            .get(email)
            .and_then(|id| self.users.get(id.value()).map(|r| r.value().clone())))
    }

    async fn create(&self, user: CreateUser) -> DbResult<UserRow> {
        self.outage.check()?;
        match self.by_email.entry(user.email.clone()) {
            Entry::Occupied(_) => Err(DbError::Conflict("users_email_key".to_string())),
            Entry::Vacant(slot) => {
                let row = UserRow {
                    id: user.id,
                    email: user.email,
                    password_hash: user.password_hash,
                    created_at: Utc::now(),
                };
                slot.insert(row.id);
                self.users.insert(row.id, row.clone());
                Ok(row)
            }
        }
    }

    async fn delete(&self, id: Uuid) -> DbResult<u64> {
        self.outage.check()?;
        match self.users.remove(&id) {
            Some((_, user)) => {
                self.by_email.remove(&user.email);
                Ok(1)
            }
            None => Ok(0),
        }
    }
}

/// In-memory exercise repository
#[derive(Default, Clone)]
pub struct MemoryExerciseRepository {
    rows: Arc<DashMap<Uuid, ExerciseRow>>,
    outage: Outage,
}

impl MemoryExerciseRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_offline(&self, offline: bool) {
        self.outage.set(offline);
    }
}

#[async_trait]
impl ExerciseRepository for MemoryExerciseRepository {
    async fn list(&self) -> DbResult<Vec<ExerciseRow>> {
        self.outage.check()?;
        let mut rows: Vec<ExerciseRow> = self.rows.iter().map(|r| r.value().clone()).collect();
        rows.sort_by_key(|r| (r.created_at, r.id));
        Ok(rows)
    }

    async fn find_by_id(&self, id: Uuid) -> DbResult<Option<ExerciseRow>> {
        self.outage.check()?;
        Ok(self.rows.get(&id).map(|r| r.value().clone()))
    }

    async fn create(&self, exercise: CreateExercise) -> DbResult<ExerciseRow> {
        self.outage.check()?;
        let now = Utc::now();
        let row = ExerciseRow {
            id: exercise.id,
            name: exercise.name,
            exercise_type: exercise.exercise_type,
            created_at: now,
            updated_at: now,
        };
        self.rows.insert(row.id, row.clone());
        Ok(row)
    }

    async fn update(&self, id: Uuid, changes: UpdateExercise) -> DbResult<bool> {
        self.outage.check()?;
        match self.rows.get_mut(&id) {
            Some(mut row) => {
                row.name = changes.name;
                row.exercise_type = changes.exercise_type;
                row.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: Uuid) -> DbResult<u64> {
        self.outage.check()?;
        Ok(u64::from(self.rows.remove(&id).is_some()))
    }
}

/// In-memory food repository
#[derive(Default, Clone)]
pub struct MemoryFoodRepository {
    rows: Arc<DashMap<Uuid, FoodRow>>,
    outage: Outage,
}

impl MemoryFoodRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_offline(&self, offline: bool) {
        self.outage.set(offline);
    }
}

#[async_trait]
impl FoodRepository for MemoryFoodRepository {
    async fn list(&self) -> DbResult<Vec<FoodRow>> {
        self.outage.check()?;
        let mut rows: Vec<FoodRow> = self.rows.iter().map(|r| r.value().clone()).collect();
        rows.sort_by_key(|r| (r.created_at, r.id));
        Ok(rows)
    }

    async fn find_by_id(&self, id: Uuid) -> DbResult<Option<FoodRow>> {
        self.outage.check()?;
        Ok(self.rows.get(&id).map(|r| r.value().clone()))
    }

    async fn create(&self, food: CreateFood) -> DbResult<FoodRow> {
        self.outage.check()?;
        let now = Utc::now();
        let row = FoodRow {
            id: food.id,
            name: food.name,
            price: food.price,
            created_at: now,
            updated_at: now,
        };
        self.rows.insert(row.id, row.clone());
        Ok(row)
    }

    async fn update(&self, id: Uuid, changes: UpdateFood) -> DbResult<bool> {
        self.outage.check()?;
        match self.rows.get_mut(&id) {
            Some(mut row) => {
                row.name = changes.name;
                row.price = changes.price;
                row.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: Uuid) -> DbResult<u64> {
        self.outage.check()?;
        Ok(u64::from(self.rows.remove(&id).is_some()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(email: &str) -> CreateUser {
        CreateUser {
            id: Uuid::new_v4(),
            email: email.to_string(),
            password_hash: "$argon2id$stub".to_string(),
        }
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts() {
        let repo = MemoryUserRepository::new();
        repo.create(new_user("a@x.com")).await.unwrap();

        let err = repo.create(new_user("a@x.com")).await.unwrap_err();
        assert!(matches!(err, DbError::Conflict(_)));
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn test_delete_reports_rows_affected() {
        let repo = MemoryUserRepository::new();
        let row = repo.create(new_user("a@x.com")).await.unwrap();

        assert_eq!(repo.delete(row.id).await.unwrap(), 1);
        assert_eq!(repo.delete(row.id).await.unwrap(), 0);
        assert!(repo.find_by_email("a@x.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_offline_fails_every_call() {
        let repo = MemoryFoodRepository::new();
        repo.set_offline(true);
        assert!(matches!(repo.list().await, Err(DbError::Unavailable(_))));

        repo.set_offline(false);
        assert!(repo.list().await.unwrap().is_empty());
    }
}
