//! Food CRUD handlers

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use fitlog_db::{CreateFood, UpdateFood};
use fitlog_types::{Food, FoodDraft};

use super::MessageResponse;
use crate::error::{ApiError, ApiResult};
use crate::extractors::{RecordId, ValidJson};
use crate::state::AppState;

/// POST /foods
pub async fn create_food(
    State(state): State<AppState>,
    ValidJson(draft): ValidJson<FoodDraft>,
) -> ApiResult<(StatusCode, Json<Food>)> {
    let food = draft.into_food();
    let row = state
        .foods
        .create(CreateFood {
            id: food.id,
            name: food.name,
            price: food.price,
        })
        .await?;

    tracing::debug!(food_id = %row.id, "Food created");
    Ok((StatusCode::CREATED, Json(row.into())))
}

/// GET /foods
pub async fn list_foods(State(state): State<AppState>) -> ApiResult<Json<Vec<Food>>> {
    let rows = state.foods.list().await?;
    Ok(Json(rows.into_iter().map(Food::from).collect()))
}

/// GET /foods/{id}
pub async fn get_food(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> ApiResult<Json<Food>> {
    state
        .foods
        .find_by_id(id)
        .await?
        .map(|row| Json(row.into()))
        .ok_or(ApiError::NotFound("food"))
}

/// PUT /foods/{id}
pub async fn update_food(
    State(state): State<AppState>,
    RecordId(id): RecordId,
    ValidJson(draft): ValidJson<FoodDraft>,
) -> ApiResult<Json<MessageResponse>> {
    let matched = state
        .foods
        .update(
            id,
            UpdateFood {
                name: draft.name,
                price: draft.price,
            },
        )
        .await?;

    if !matched {
        return Err(ApiError::NotFound("food"));
    }
    Ok(Json(MessageResponse::new("food updated")))
}

/// DELETE /foods/{id}
pub async fn delete_food(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> ApiResult<Json<MessageResponse>> {
    if state.foods.delete(id).await? == 0 {
        return Err(ApiError::NotFound("food"));
    }
    Ok(Json(MessageResponse::new("food deleted")))
}
