//! PostgreSQL user repository implementation

use std::time::Duration;

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::bounded;
use crate::error::DbResult;
use crate::models::UserRow;
use crate::repo::{CreateUser, UserRepository};

/// PostgreSQL user repository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
    timeout: Duration,
}

impl PgUserRepository {
    /// Create a new user repository
    pub fn new(pool: PgPool, timeout: Duration) -> Self {
        Self { pool, timeout }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_id(&self, id: Uuid) -> DbResult<Option<UserRow>> {
        let query = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, email, password_hash, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool);

        bounded(self.timeout, query).await
    }

    async fn find_by_email(&self, email: &str) -> DbResult<Option<UserRow>> {
        let query = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, email, password_hash, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool);

        bounded(self.timeout, query).await
    }

    async fn create(&self, user: CreateUser) -> DbResult<UserRow> {
        let query = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (id, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, email, password_hash, created_at
            "#,
        )
        .bind(user.id)
        .bind(&user.email)
        .bind(&user.password_hash)
        .fetch_one(&self.pool);

        bounded(self.timeout, query).await
    }

    async fn delete(&self, id: Uuid) -> DbResult<u64> {
        let query = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool);

        let result = bounded(self.timeout, query).await?;
        Ok(result.rows_affected())
    }
}
