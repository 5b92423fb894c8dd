mod config;

use anyhow::Context;
use axum::{http::StatusCode, routing::{get, post}, Json, Router};
use sentiment_batch::{handle_batch, BatchRequest, BatchResponse, HealthResponse};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use config::ApiConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cfg = ApiConfig::from_env()?;
    let addr = cfg.addr();

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed binding {addr}"))?;
    tracing::info!("listening on http://{addr}");
    axum::serve(listener, app())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;
    Ok(())
}

fn app() -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/v1/sentiment/batch", post(sentiment_batch))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("ctrl-c handler failed: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

async fn sentiment_batch(Json(req): Json<BatchRequest>) -> Result<Json<BatchResponse>, StatusCode> {
    let n = req.items.len();
    // scoring is CPU work on the rayon pool, keep it off the async workers
    let resp = tokio::task::spawn_blocking(move || handle_batch(&req))
        .await
        .map_err(|e| {
            tracing::error!("batch scoring panicked: {e}");
            StatusCode::INTERNAL_SERVER_ERROR
        })?;
    tracing::debug!(items = n, "batch scored");
    Ok(Json(resp))
}
