use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use chrono::Utc;
use futures::future::join_all;
use naios_ai::enrich_profile;
use naios_core::{ProducerPatch, ProducerSubmission, TranslatedProfile};
use naios_store::{
    NewProducer, ProducerRow, ProducerStore, ProducerUpdate, assemble_profile, translation_rows,
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{ApiError, AppState};

/// A stored profile together with its `producers.id`.
#[derive(Serialize)]
pub(crate) struct StoredProfile {
    #[serde(flatten)]
    profile: TranslatedProfile,
    producer_id: Uuid,
}

/// `POST /api/process-producer`: enrich a submission and store it.
pub(crate) async fn process_producer(
    State(state): State<AppState>,
    body: Result<Json<ProducerSubmission>, JsonRejection>,
) -> Result<Json<StoredProfile>, ApiError> {
    let Json(submission) = body?;
    let (data, user_id) = submission.validate()?;
    info!(
        name = %data.name,
        source_language = %data.source_language,
        "processing producer"
    );

    let profile = enrich_profile(state.model.as_ref(), data)
        .await
        .map_err(|e| ApiError::internal("Failed to process producer", e))?;
    info!("AI processing complete, saving to database");

    let row = state
        .store
        .insert_producer(&NewProducer::from_profile(&profile, user_id))
        .await
        .map_err(|e| ApiError::internal("Failed to save producer", e))?;
    info!(producer_id = %row.id, "producer saved");

    let rows = translation_rows(row.id, &profile);
    let results = join_all(rows.iter().map(|t| state.store.insert_translation(t))).await;
    let failed: Vec<String> = rows
        .iter()
        .zip(results)
        .filter_map(|(t, result)| result.err().map(|e| format!("{}: {e}", t.language)))
        .collect();
    if !failed.is_empty() {
        return Err(ApiError::internal(
            "Failed to save translations",
            format!("producer {} saved; {}", row.id, failed.join("; ")),
        ));
    }
    info!(producer_id = %row.id, count = rows.len(), "translations saved");

    Ok(Json(StoredProfile {
        profile,
        producer_id: row.id,
    }))
}

/// `GET /api/producers/{id}`.
pub(crate) async fn get_producer(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<StoredProfile>, ApiError> {
    let Path(id) = path?;
    let row = state
        .store
        .get_producer(id)
        .await
        .map_err(|e| ApiError::internal("Failed to fetch producer", e))?
        .ok_or(ApiError::NotFound("Producer not found"))?;
    stored_profile(state.store.as_ref(), row).await
}

/// `PATCH /api/producers/{id}`: edit the base profile fields.
///
/// Stored translations are not regenerated; the source-language entry of the
/// returned profile reflects the edited description.
pub(crate) async fn update_producer(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
    body: Result<Json<ProducerPatch>, JsonRejection>,
) -> Result<Json<StoredProfile>, ApiError> {
    let Path(id) = path?;
    let Json(patch) = body?;
    let changes = patch.validate()?;
    if changes.is_empty() {
        return Err(ApiError::BadRequest("No fields to update".to_string()));
    }

    let update = ProducerUpdate::from_changes(changes, Utc::now());
    let row = state
        .store
        .update_producer(id, &update)
        .await
        .map_err(|e| ApiError::internal("Failed to update producer", e))?
        .ok_or(ApiError::NotFound("Producer not found"))?;
    info!(producer_id = %row.id, "producer updated");
    stored_profile(state.store.as_ref(), row).await
}

async fn stored_profile(
    store: &dyn ProducerStore,
    row: ProducerRow,
) -> Result<Json<StoredProfile>, ApiError> {
    let translations = store
        .translations_for(row.id)
        .await
        .map_err(|e| ApiError::internal("Failed to fetch producer", e))?;
    Ok(Json(StoredProfile {
        profile: assemble_profile(&row, &translations),
        producer_id: row.id,
    }))
}

/// Assemble a profile per row, fetching translations concurrently.
///
/// A producer whose translations cannot be read is still returned, with
/// empty translation entries.
pub(crate) async fn load_profiles(
    store: &dyn ProducerStore,
    rows: &[ProducerRow],
) -> Vec<TranslatedProfile> {
    let fetches = rows.iter().map(|row| async move {
        let translations = match store.translations_for(row.id).await {
            Ok(translations) => translations,
            Err(e) => {
                warn!(producer_id = %row.id, error = %e, "failed to load translations");
                Vec::new()
            }
        };
        assemble_profile(row, &translations)
    });
    join_all(fetches).await
}
