//! Fitlog API
//!
//! HTTP service for user accounts and exercise/food records.
//!
//! ## Account Endpoints
//!
//! - `POST /user` - Sign up
//! - `GET /user`, `POST /user/login` - Log in, returns a bearer token
//! - `GET /user/me` - Current user (auth)
//! - `DELETE /user`, `DELETE /user/{id}` - Delete own account (auth)
//!
//! ## Record Endpoints
//!
//! - `POST|GET /exercise`, `GET|PUT|DELETE /exercise/{id}`
//! - `POST|GET /foods`, `GET|PUT|DELETE /foods/{id}`
//!
//! ## Health Endpoints
//!
//! - `GET /health` - Liveness probe
//! - `GET /ready` - Readiness probe
//! - `GET /metrics` - Prometheus metrics

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod state;

use std::time::Instant;

use axum::extract::{MatchedPath, Request};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{delete, get, post};
use axum::Router;
use fitlog_axum::AuthLayer;
use metrics_exporter_prometheus::PrometheusHandle;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

pub use crate::config::{Config, ConfigError};
pub use crate::state::AppState;

/// Build the HTTP router with its middleware stack
pub fn build_router(state: AppState, metrics_handle: Option<PrometheusHandle>) -> Router {
    let request_timeout = state.request_timeout();

    // Account routes; mutations of an account need a bearer token
    let auth = AuthLayer::new(state.accounts.clone());
    let api = Router::new()
        .route(
            "/user",
            post(handlers::signup)
                .get(handlers::login)
                .merge(delete(handlers::delete_self).route_layer(auth.clone())),
        )
        .route("/user/login", post(handlers::login))
        .route("/user/me", get(handlers::me).route_layer(auth.clone()))
        .route(
            "/user/{id}",
            delete(handlers::delete_by_id).route_layer(auth),
        )
        .route(
            "/exercise",
            post(handlers::create_exercise).get(handlers::list_exercises),
        )
        .route(
            "/exercise/{id}",
            get(handlers::get_exercise)
                .put(handlers::update_exercise)
                .delete(handlers::delete_exercise),
        )
        .route(
            "/foods",
            post(handlers::create_food).get(handlers::list_foods),
        )
        .route(
            "/foods/{id}",
            get(handlers::get_food)
                .put(handlers::update_food)
                .delete(handlers::delete_food),
        );

    // Health routes (no timeout - must always respond quickly)
    let health_routes = Router::new()
        .route("/health", get(handlers::health))
        .route("/ready", get(handlers::ready));

    // Metrics route (no timeout)
    let metrics_route = if let Some(handle) = metrics_handle {
        Router::new().route("/metrics", get(move || async move { handle.render() }))
    } else {
        Router::new()
    };

    // Build middleware stack (order matters - outermost first)
    let middleware = ServiceBuilder::new()
        // Request ID propagation (outermost)
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        // Tracing with request details
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // CORS
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(middleware::from_fn(track_metrics))
        // Request timeout (innermost - closest to handler)
        .layer(TimeoutLayer::new(request_timeout));

    api.layer(middleware)
        .merge(health_routes)
        .merge(metrics_route)
        .with_state(state)
}

/// Record `http_request_duration_seconds` by method, route and status
async fn track_metrics(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| "unmatched".to_owned());
    let method = req.method().to_string();

    let response = next.run(req).await;

    metrics::histogram!(
        "http_request_duration_seconds",
        "method" => method,
        "path" => path,
        "status" => response.status().as_u16().to_string()
    )
    .record(start.elapsed().as_secs_f64());

    response
}
