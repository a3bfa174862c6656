//! Account handlers (signup, login, me, delete)

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use fitlog_auth_core::AuthError;
use fitlog_axum::RequireAuth;
use fitlog_types::{Credentials, User, UserId};
use serde::Serialize;

use super::MessageResponse;
use crate::error::{ApiError, ApiResult};
use crate::extractors::ApiJson;
use crate::state::AppState;

// ============================================================================
// Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct SignupResponse {
    pub message: &'static str,
    pub user: User,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub token_type: &'static str,
    pub expires_at: DateTime<Utc>,
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /user
pub async fn signup(
    State(state): State<AppState>,
    ApiJson(credentials): ApiJson<Credentials>,
) -> ApiResult<(StatusCode, Json<SignupResponse>)> {
    let user = state.accounts.signup(credentials).await?;
    metrics::counter!("fitlog_signups_total").increment(1);

    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            message: "user created",
            user,
        }),
    ))
}

/// GET /user and POST /user/login
pub async fn login(
    State(state): State<AppState>,
    ApiJson(credentials): ApiJson<Credentials>,
) -> ApiResult<Json<LoginResponse>> {
    match state.accounts.login(credentials).await {
        Ok(issued) => {
            metrics::counter!("fitlog_logins_total", "result" => "ok").increment(1);
            Ok(Json(LoginResponse {
                token: issued.token,
                token_type: "Bearer",
                expires_at: issued.expires_at,
            }))
        }
        Err(err) => {
            let result = if matches!(err, AuthError::InvalidCredentials) {
                "invalid_credentials"
            } else {
                "error"
            };
            metrics::counter!("fitlog_logins_total", "result" => result).increment(1);
            Err(err.into())
        }
    }
}

/// GET /user/me
pub async fn me(auth: RequireAuth) -> Json<User> {
    Json(auth.0.user)
}

/// DELETE /user
pub async fn delete_self(
    State(state): State<AppState>,
    auth: RequireAuth,
) -> ApiResult<Json<MessageResponse>> {
    state.accounts.delete_account(auth.user_id()).await?;
    Ok(Json(MessageResponse::new("user deleted")))
}

/// DELETE /user/{id}
///
/// Accounts can only delete themselves.
pub async fn delete_by_id(
    State(state): State<AppState>,
    auth: RequireAuth,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    let target = UserId::parse(&id).map_err(|_| ApiError::NotFound("user"))?;

    if target != auth.user_id() {
        tracing::warn!(
            user_id = %auth.user_id(),
            target = %target,
            "Attempt to delete another account"
        );
        return Err(ApiError::Forbidden(
            "accounts can only delete themselves".to_string(),
        ));
    }

    state.accounts.delete_account(target).await?;
    Ok(Json(MessageResponse::new("user deleted")))
}
