use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tracing::error;

use crate::{AppState, EnvReport};

/// `GET /api/test-db`: probe the database tables.
pub(crate) async fn test_db(State(state): State<AppState>) -> Response {
    match state.store.reachable_tables().await {
        Ok(tables) => Json(json!({"ok": true, "tables": tables})).into_response(),
        Err(e) => {
            error!(error = %e, "database probe failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"ok": false, "error": e.to_string()})),
            )
                .into_response()
        }
    }
}

/// `GET /api/_env-check`.
pub(crate) async fn env_check(State(state): State<AppState>) -> Json<EnvReport> {
    Json(state.env.as_ref().clone())
}
