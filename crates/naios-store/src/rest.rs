//! PostgREST client for the hosted database (Supabase-style `/rest/v1`).

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info};
use uuid::Uuid;

use crate::{
    NewProducer, ProducerRow, ProducerStore, ProducerUpdate, StoreError, TABLES, TranslationRow,
};

/// Connection settings for [`RestStore`].
#[derive(Debug, Clone)]
pub struct RestConfig {
    /// Project URL like `https://xyz.supabase.co` (no trailing slash needed).
    pub url: String,
    /// Service-role or anon key, sent as both `apikey` and bearer token.
    pub api_key: String,
}

pub struct RestStore {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl RestStore {
    pub fn new(config: RestConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: format!("{}/rest/v1", config.url.trim_end_matches('/')),
            api_key: config.api_key,
        }
    }

    fn request(&self, method: reqwest::Method, table: &str) -> reqwest::RequestBuilder {
        self.client
            .request(method, format!("{}/{table}", self.base_url))
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    async fn select<T: DeserializeOwned + Send>(
        &self,
        table: &str,
        filters: &[(&str, String)],
    ) -> Result<Vec<T>, StoreError> {
        let mut query = vec![("select", "*".to_string())];
        query.extend(filters.iter().map(|(k, v)| (*k, v.clone())));
        let resp = self
            .request(reqwest::Method::GET, table)
            .query(&query)
            .send()
            .await?;
        let resp = check(resp).await?;
        Ok(resp.json().await?)
    }

    async fn insert_returning<B: Serialize + Sync, T: DeserializeOwned + Send>(
        &self,
        table: &str,
        body: &B,
    ) -> Result<Vec<T>, StoreError> {
        let resp = self
            .request(reqwest::Method::POST, table)
            .header("Prefer", "return=representation")
            .json(body)
            .send()
            .await?;
        let resp = check(resp).await?;
        Ok(resp.json().await?)
    }
}

async fn check(resp: reqwest::Response) -> Result<reqwest::Response, StoreError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(StoreError::Server {
        status: status.as_u16(),
        body,
    })
}

fn eq(value: impl std::fmt::Display) -> String {
    format!("eq.{value}")
}

#[async_trait]
impl ProducerStore for RestStore {
    async fn insert_producer(&self, producer: &NewProducer) -> Result<ProducerRow, StoreError> {
        let rows: Vec<ProducerRow> = self.insert_returning("producers", producer).await?;
        let row = rows.into_iter().next().ok_or(StoreError::NoRows)?;
        info!(producer_id = %row.id, "producer row inserted");
        Ok(row)
    }

    async fn insert_translation(&self, row: &TranslationRow) -> Result<(), StoreError> {
        let resp = self
            .request(reqwest::Method::POST, "producer_translations")
            .header("Prefer", "return=minimal")
            .json(row)
            .send()
            .await?;
        check(resp).await?;
        debug!(producer_id = %row.producer_id, language = %row.language, "translation row inserted");
        Ok(())
    }

    async fn list_producers(&self) -> Result<Vec<ProducerRow>, StoreError> {
        self.select("producers", &[]).await
    }

    async fn get_producer(&self, id: Uuid) -> Result<Option<ProducerRow>, StoreError> {
        let rows: Vec<ProducerRow> = self.select("producers", &[("id", eq(id))]).await?;
        Ok(rows.into_iter().next())
    }

    async fn translations_for(&self, producer_id: Uuid) -> Result<Vec<TranslationRow>, StoreError> {
        self.select("producer_translations", &[("producer_id", eq(producer_id))])
            .await
    }

    async fn update_producer(
        &self,
        id: Uuid,
        update: &ProducerUpdate,
    ) -> Result<Option<ProducerRow>, StoreError> {
        let resp = self
            .request(reqwest::Method::PATCH, "producers")
            .query(&[("id", eq(id))])
            .header("Prefer", "return=representation")
            .json(update)
            .send()
            .await?;
        let rows: Vec<ProducerRow> = check(resp).await?.json().await?;
        Ok(rows.into_iter().next())
    }

    async fn reachable_tables(&self) -> Result<Vec<String>, StoreError> {
        let mut reachable = Vec::with_capacity(TABLES.len());
        for table in TABLES {
            let resp = self
                .request(reqwest::Method::GET, table)
                .query(&[("select", "*"), ("limit", "0")])
                .send()
                .await?;
            if resp.status().is_success() {
                reachable.push(table.to_string());
            } else {
                debug!(table, status = resp.status().as_u16(), "table probe failed");
            }
        }
        Ok(reachable)
    }
}
