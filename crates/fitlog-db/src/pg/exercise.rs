//! PostgreSQL exercise repository implementation

use std::time::Duration;

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::bounded;
use crate::error::DbResult;
use crate::models::ExerciseRow;
use crate::repo::{CreateExercise, ExerciseRepository, UpdateExercise};

/// PostgreSQL exercise repository
#[derive(Clone)]
pub struct PgExerciseRepository {
    pool: PgPool,
    timeout: Duration,
}

impl PgExerciseRepository {
    /// Create a new exercise repository
    pub fn new(pool: PgPool, timeout: Duration) -> Self {
        Self { pool, timeout }
    }
}

#[async_trait]
impl ExerciseRepository for PgExerciseRepository {
    async fn list(&self) -> DbResult<Vec<ExerciseRow>> {
        let query = sqlx::query_as::<_, ExerciseRow>(
            r#"
            SELECT id, name, exercise_type, created_at, updated_at
            FROM exercises
            ORDER BY created_at, id
            "#,
        )
        .fetch_all(&self.pool);

        bounded(self.timeout, query).await
    }

    async fn find_by_id(&self, id: Uuid) -> DbResult<Option<ExerciseRow>> {
        let query = sqlx::query_as::<_, ExerciseRow>(
            r#"
            SELECT id, name, exercise_type, created_at, updated_at
            FROM exercises
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool);

        bounded(self.timeout, query).await
    }

    async fn create(&self, exercise: CreateExercise) -> DbResult<ExerciseRow> {
        let query = sqlx::query_as::<_, ExerciseRow>(
            r#"
            INSERT INTO exercises (id, name, exercise_type)
            VALUES ($1, $2, $3)
            RETURNING id, name, exercise_type, created_at, updated_at
            "#,
        )
        .bind(exercise.id)
        .bind(&exercise.name)
        .bind(&exercise.exercise_type)
        .fetch_one(&self.pool);

        bounded(self.timeout, query).await
    }

    async fn update(&self, id: Uuid, changes: UpdateExercise) -> DbResult<bool> {
        let query = sqlx::query(
            r#"
            UPDATE exercises
            SET name = $1, exercise_type = $2, updated_at = NOW()
            WHERE id = $3
            "#,
        )
        .bind(&changes.name)
        .bind(&changes.exercise_type)
        .bind(id)
        .execute(&self.pool);

        let result = bounded(self.timeout, query).await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: Uuid) -> DbResult<u64> {
        let query = sqlx::query("DELETE FROM exercises WHERE id = $1")
            .bind(id)
            .execute(&self.pool);

        let result = bounded(self.timeout, query).await?;
        Ok(result.rows_affected())
    }
}
