//! HTTP API: producer onboarding, profile reads and edits, buyer matching.

mod error;
mod handlers;
mod state;

use std::future::Future;

use axum::Router;
use axum::routing::{get, post};
use tokio::net::TcpListener;

pub use error::ApiError;
pub use state::{AppState, EnvReport};

/// Build the API router over `state`.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/process-producer", post(handlers::producers::process_producer))
        .route("/api/match-buyers", post(handlers::matching::match_buyers))
        .route(
            "/api/producers/{id}",
            get(handlers::producers::get_producer).patch(handlers::producers::update_producer),
        )
        .route("/api/test-db", get(handlers::health::test_db))
        .route("/api/_env-check", get(handlers::health::env_check))
        .with_state(state)
}

/// Serve the API on `listener` until `shutdown` resolves.
pub async fn serve(
    listener: TcpListener,
    state: AppState,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        tracing::info!(%addr, "naios API listening");
    }
    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown)
        .await
}
