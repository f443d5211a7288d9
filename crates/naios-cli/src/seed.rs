//! Sample producers for demos: five Greek producers, already enriched.

use anyhow::Context;
use futures::future::join_all;
use naios_core::TranslatedProfile;
use naios_store::{NewProducer, ProducerStore, translation_rows};
use tracing::{error, info, warn};

const SEED_PRODUCERS: &str = include_str!("../data/seed_producers.json");

#[derive(Debug, Default, PartialEq, Eq)]
pub struct SeedStats {
    pub inserted: usize,
    pub skipped: usize,
    pub translations: usize,
}

pub fn seed_profiles() -> anyhow::Result<Vec<TranslatedProfile>> {
    serde_json::from_str(SEED_PRODUCERS).context("parsing bundled seed producers")
}

/// Insert every sample producer with its translation rows.
///
/// A producer that fails to insert is logged and skipped.
pub async fn seed_producers(store: &dyn ProducerStore) -> anyhow::Result<SeedStats> {
    let profiles = seed_profiles()?;
    info!(count = profiles.len(), "starting database seed");

    let mut stats = SeedStats::default();
    for profile in &profiles {
        let name = &profile.original.name;
        let row = match store
            .insert_producer(&NewProducer::from_profile(profile, None))
            .await
        {
            Ok(row) => row,
            Err(e) => {
                error!(name = %name, error = %e, "failed to insert producer");
                stats.skipped += 1;
                continue;
            }
        };
        info!(name = %name, producer_id = %row.id, "inserted producer");

        let rows = translation_rows(row.id, profile);
        let results = join_all(rows.iter().map(|t| store.insert_translation(t))).await;
        for (t, result) in rows.iter().zip(results) {
            match result {
                Ok(()) => stats.translations += 1,
                Err(e) => warn!(name = %name, language = %t.language, error = %e, "failed to insert translation"),
            }
        }
        stats.inserted += 1;
    }

    info!(
        inserted = stats.inserted,
        skipped = stats.skipped,
        "database seeded"
    );
    Ok(stats)
}
