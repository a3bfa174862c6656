//! Health check handlers

use std::time::Instant;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ReadyResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub checks: ReadyChecks,
}

#[derive(Debug, Serialize)]
pub struct ReadyChecks {
    pub database: CheckResult,
}

#[derive(Debug, Serialize)]
pub struct CheckResult {
    pub status: &'static str,
    pub latency_ms: u64,
}

/// GET /health - Liveness probe (fast, no dependencies)
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "fitlog-api",
    })
}

/// GET /ready - Readiness probe (checks DB connectivity)
pub async fn ready(
    State(state): State<AppState>,
) -> Result<Json<ReadyResponse>, (StatusCode, Json<ReadyResponse>)> {
    let Some(pool) = state.pool.as_ref() else {
        // In-memory stores are always reachable
        return Ok(Json(ReadyResponse {
            status: "ready",
            service: "fitlog-api",
            checks: ReadyChecks {
                database: CheckResult {
                    status: "skipped",
                    latency_ms: 0,
                },
            },
        }));
    };

    let start = Instant::now();
    let probe = tokio::time::timeout(
        state.config.pool.store_timeout,
        sqlx::query("SELECT 1").execute(pool),
    )
    .await;
    let latency_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

    let healthy = matches!(probe, Ok(Ok(_)));
    if !healthy {
        tracing::warn!(latency_ms, "Readiness probe failed");
    }

    let response = ReadyResponse {
        status: if healthy { "ready" } else { "unavailable" },
        service: "fitlog-api",
        checks: ReadyChecks {
            database: CheckResult {
                status: if healthy { "ok" } else { "error" },
                latency_ms,
            },
        },
    };

    if healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}
