//! Process-local [`ProducerStore`], for development runs and tests.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::{
    NewProducer, ProducerRow, ProducerStore, ProducerUpdate, StoreError, TABLES, TranslationRow,
};

#[derive(Default)]
struct Tables {
    producers: Vec<ProducerRow>,
    translations: Vec<TranslationRow>,
}

/// Holds both tables in memory. Contents are lost when the store is dropped.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn producer_count(&self) -> usize {
        self.lock().map(|t| t.producers.len()).unwrap_or(0)
    }

    pub fn translation_count(&self) -> usize {
        self.lock().map(|t| t.translations.len()).unwrap_or(0)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Tables>, StoreError> {
        self.tables
            .lock()
            .map_err(|e| StoreError::Other(format!("mutex poisoned: {e}")))
    }
}

#[async_trait]
impl ProducerStore for MemoryStore {
    async fn insert_producer(&self, producer: &NewProducer) -> Result<ProducerRow, StoreError> {
        let row = ProducerRow::from_new(Uuid::new_v4(), producer, Utc::now());
        self.lock()?.producers.push(row.clone());
        Ok(row)
    }

    async fn insert_translation(&self, row: &TranslationRow) -> Result<(), StoreError> {
        let mut tables = self.lock()?;
        if !tables.producers.iter().any(|p| p.id == row.producer_id) {
            return Err(StoreError::Other(format!(
                "producer {} does not exist",
                row.producer_id
            )));
        }
        tables.translations.push(row.clone());
        Ok(())
    }

    async fn list_producers(&self) -> Result<Vec<ProducerRow>, StoreError> {
        Ok(self.lock()?.producers.clone())
    }

    async fn get_producer(&self, id: Uuid) -> Result<Option<ProducerRow>, StoreError> {
        Ok(self.lock()?.producers.iter().find(|p| p.id == id).cloned())
    }

    async fn translations_for(&self, producer_id: Uuid) -> Result<Vec<TranslationRow>, StoreError> {
        Ok(self
            .lock()?
            .translations
            .iter()
            .filter(|t| t.producer_id == producer_id)
            .cloned()
            .collect())
    }

    async fn update_producer(
        &self,
        id: Uuid,
        update: &ProducerUpdate,
    ) -> Result<Option<ProducerRow>, StoreError> {
        let mut tables = self.lock()?;
        let Some(row) = tables.producers.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        row.apply(update);
        Ok(Some(row.clone()))
    }

    async fn reachable_tables(&self) -> Result<Vec<String>, StoreError> {
        Ok(TABLES.iter().map(|t| t.to_string()).collect())
    }
}
