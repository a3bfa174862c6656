//! Exercise CRUD handlers

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use fitlog_db::{CreateExercise, UpdateExercise};
use fitlog_types::{Exercise, ExerciseDraft};

use super::MessageResponse;
use crate::error::{ApiError, ApiResult};
use crate::extractors::{RecordId, ValidJson};
use crate::state::AppState;

/// POST /exercise
pub async fn create_exercise(
    State(state): State<AppState>,
    ValidJson(draft): ValidJson<ExerciseDraft>,
) -> ApiResult<(StatusCode, Json<Exercise>)> {
    let exercise = draft.into_exercise();
    let row = state
        .exercises
        .create(CreateExercise {
            id: exercise.id,
            name: exercise.name,
            exercise_type: exercise.exercise_type,
        })
        .await?;

    tracing::debug!(exercise_id = %row.id, "Exercise created");
    Ok((StatusCode::CREATED, Json(row.into())))
}

/// GET /exercise
pub async fn list_exercises(State(state): State<AppState>) -> ApiResult<Json<Vec<Exercise>>> {
    let rows = state.exercises.list().await?;
    Ok(Json(rows.into_iter().map(Exercise::from).collect()))
}

/// GET /exercise/{id}
pub async fn get_exercise(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> ApiResult<Json<Exercise>> {
    state
        .exercises
        .find_by_id(id)
        .await?
        .map(|row| Json(row.into()))
        .ok_or(ApiError::NotFound("exercise"))
}

/// PUT /exercise/{id}
pub async fn update_exercise(
    State(state): State<AppState>,
    RecordId(id): RecordId,
    ValidJson(draft): ValidJson<ExerciseDraft>,
) -> ApiResult<Json<MessageResponse>> {
    let matched = state
        .exercises
        .update(
            id,
            UpdateExercise {
                name: draft.name,
                exercise_type: draft.exercise_type,
            },
        )
        .await?;

    if !matched {
        return Err(ApiError::NotFound("exercise"));
    }
    Ok(Json(MessageResponse::new("exercise updated")))
}

/// DELETE /exercise/{id}
pub async fn delete_exercise(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> ApiResult<Json<MessageResponse>> {
    if state.exercises.delete(id).await? == 0 {
        return Err(ApiError::NotFound("exercise"));
    }
    Ok(Json(MessageResponse::new("exercise deleted")))
}
