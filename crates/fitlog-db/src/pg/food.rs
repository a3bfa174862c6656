//! PostgreSQL food repository implementation

use std::time::Duration;

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::bounded;
use crate::error::DbResult;
use crate::models::FoodRow;
use crate::repo::{CreateFood, FoodRepository, UpdateFood};

/// PostgreSQL food repository
#[derive(Clone)]
pub struct PgFoodRepository {
    pool: PgPool,
    timeout: Duration,
}

impl PgFoodRepository {
    /// Create a new food repository
    pub fn new(pool: PgPool, timeout: Duration) -> Self {
        Self { pool, timeout }
    }
}

#[async_trait]
impl FoodRepository for PgFoodRepository {
    async fn list(&self) -> DbResult<Vec<FoodRow>> {
        let query = sqlx::query_as::<_, FoodRow>(
            r#"
            SELECT id, name, price, created_at, updated_at
            FROM foods
            ORDER BY created_at, id
            "#,
        )
        .fetch_all(&self.pool);

        bounded(self.timeout, query).await
    }

    async fn find_by_id(&self, id: Uuid) -> DbResult<Option<FoodRow>> {
        let query = sqlx::query_as::<_, FoodRow>(
            r#"
            SELECT id, name, price, created_at, updated_at
            FROM foods
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool);

        bounded(self.timeout, query).await
    }

    async fn create(&self, food: CreateFood) -> DbResult<FoodRow> {
        let query = sqlx::query_as::<_, FoodRow>(
            r#"
            INSERT INTO foods (id, name, price)
            VALUES ($1, $2, $3)
            RETURNING id, name, price, created_at, updated_at
            "#,
        )
        .bind(food.id)
        .bind(&food.name)
        .bind(food.price)
        .fetch_one(&self.pool);

        bounded(self.timeout, query).await
    }

    async fn update(&self, id: Uuid, changes: UpdateFood) -> DbResult<bool> {
        let query = sqlx::query(
            r#"
            UPDATE foods
            SET name = $1, price = $2, updated_at = NOW()
            WHERE id = $3
            "#,
        )
        .bind(&changes.name)
        .bind(changes.price)
        .bind(id)
        .execute(&self.pool);

        let result = bounded(self.timeout, query).await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: Uuid) -> DbResult<u64> {
        let query = sqlx::query("DELETE FROM foods WHERE id = $1")
            .bind(id)
            .execute(&self.pool);

        let result = bounded(self.timeout, query).await?;
        Ok(result.rows_affected())
    }
}
