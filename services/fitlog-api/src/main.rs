//! Fitlog API server binary

use std::net::SocketAddr;
use std::sync::Arc;

use fitlog_api::{build_router, AppState, Config};
use fitlog_auth_core::AccountService;
use fitlog_db::Repositories;
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use tokio::signal;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive("fitlog_api=debug".parse()?))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Fitlog API");

    // Load configuration
    let config = Config::from_env()?;
    tracing::info!(
        http_port = config.http_port,
        token_ttl = ?config.auth.token_ttl,
        store_timeout = ?config.pool.store_timeout,
        "Configuration loaded"
    );

    // Initialize metrics
    let metrics_handle = if config.metrics_enabled {
        Some(setup_metrics()?)
    } else {
        None
    };

    // Create database pool and bring the schema up to date
    let pool = fitlog_db::create_pool_with_options(&config.database_url, &config.pool).await?;
    fitlog_db::run_migrations(&pool).await?;
    tracing::info!("Database pool created, migrations applied");

    // Create repositories
    let repos = Repositories::new(pool.clone(), config.pool.store_timeout);

    // Create account service
    let accounts = AccountService::new(&config.auth, Arc::new(repos.users))?;

    // Create application state
    let state = AppState::new(
        accounts,
        Arc::new(repos.exercises),
        Arc::new(repos.foods),
        config.clone(),
    )
    .with_pool(pool);

    // Build HTTP router
    let app = build_router(state, metrics_handle);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.http_port));
    tracing::info!("HTTP server listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

fn setup_metrics() -> anyhow::Result<PrometheusHandle> {
    // Password verification dominates login latency
    let latency_buckets = &[0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.2, 0.5, 1.0, 2.5];

    let handle = PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full("http_request_duration_seconds".to_string()),
            latency_buckets,
        )?
        .install_recorder()?;

    // Register metrics with descriptions
    metrics::describe_counter!("fitlog_signups_total", "Total accounts created");
    metrics::describe_counter!("fitlog_logins_total", "Total login attempts by result");
    metrics::describe_counter!(
        "fitlog_auth_rejections_total",
        "Total protected requests rejected by reason"
    );
    metrics::describe_histogram!(
        "http_request_duration_seconds",
        "HTTP request latency in seconds"
    );

    Ok(handle)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
