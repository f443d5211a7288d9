use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use naios_ai::match_producers;
use naios_core::{MatchRequest, ProducerMatch};
use serde::Serialize;
use tracing::info;

use super::producers::load_profiles;
use crate::{ApiError, AppState};

#[derive(Serialize)]
pub(crate) struct MatchesResponse {
    matches: Vec<ProducerMatch>,
}

/// `POST /api/match-buyers`: rank every stored producer for a buyer query.
pub(crate) async fn match_buyers(
    State(state): State<AppState>,
    body: Result<Json<MatchRequest>, JsonRejection>,
) -> Result<Json<MatchesResponse>, ApiError> {
    let Json(request) = body?;
    let query = request.validate()?;
    info!(query = %query.query, "buyer query");

    let rows = state
        .store
        .list_producers()
        .await
        .map_err(|e| ApiError::internal("Failed to fetch producers", e))?;
    info!(count = rows.len(), "found producers in database");

    let profiles = load_profiles(state.store.as_ref(), &rows).await;
    let matches = match_producers(state.model.as_ref(), &query, &profiles)
        .await
        .map_err(|e| ApiError::internal("Failed to match buyer with producers", e))?;
    info!(count = matches.len(), "found matches");

    Ok(Json(MatchesResponse { matches }))
}
