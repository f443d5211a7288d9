use async_trait::async_trait;
use uuid::Uuid;

use crate::{NewProducer, ProducerRow, ProducerUpdate, StoreError, TranslationRow};

/// Access to the `producers` and `producer_translations` tables.
///
/// Each call is independent; nothing spans the two tables transactionally.
#[async_trait]
pub trait ProducerStore: Send + Sync {
    /// Insert a producer and return the stored row, including its id.
    async fn insert_producer(&self, producer: &NewProducer) -> Result<ProducerRow, StoreError>;

    async fn insert_translation(&self, row: &TranslationRow) -> Result<(), StoreError>;

    async fn list_producers(&self) -> Result<Vec<ProducerRow>, StoreError>;

    async fn get_producer(&self, id: Uuid) -> Result<Option<ProducerRow>, StoreError>;

    async fn translations_for(&self, producer_id: Uuid) -> Result<Vec<TranslationRow>, StoreError>;

    /// Update a producer row. Returns `None` when no row has `id`.
    async fn update_producer(
        &self,
        id: Uuid,
        update: &ProducerUpdate,
    ) -> Result<Option<ProducerRow>, StoreError>;

    /// Names of the tables that answered a probe query.
    async fn reachable_tables(&self) -> Result<Vec<String>, StoreError>;
}
