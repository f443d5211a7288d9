//! Row shapes of the two hosted tables.

use chrono::{DateTime, Utc};
use naios_core::{Language, ProducerChanges, TranslatedProfile};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Tables this crate reads and writes.
pub const TABLES: [&str; 2] = ["producers", "producer_translations"];

/// Insert payload for the `producers` table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewProducer {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub business_name: String,
    pub location: String,
    pub product_type: String,
    pub source_language: Language,
    pub description_original: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    pub category: String,
    pub keywords: Vec<String>,
}

impl NewProducer {
    pub fn from_profile(profile: &TranslatedProfile, user_id: Option<String>) -> Self {
        let original = &profile.original;
        Self {
            user_id,
            business_name: original.name.clone(),
            location: original.location.clone(),
            product_type: original.product_type.clone(),
            source_language: original.source_language,
            description_original: original.description.clone(),
            photo_url: original.photo_url.clone(),
            category: profile.category.clone(),
            keywords: profile.keywords.clone(),
        }
    }
}

/// A row of the `producers` table.
///
/// Nullable columns are optional. `description_greek` is the column used by
/// rows written before producers could pick a source language.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProducerRow {
    pub id: Uuid,
    #[serde(default)]
    pub user_id: Option<String>,
    pub business_name: String,
    pub location: String,
    #[serde(default)]
    pub product_type: Option<String>,
    #[serde(default)]
    pub source_language: Option<String>,
    #[serde(default)]
    pub description_original: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_greek: Option<String>,
    #[serde(default)]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub keywords: Option<Vec<String>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl ProducerRow {
    /// Materialise an inserted row, as the database would return it.
    pub fn from_new(id: Uuid, new: &NewProducer, now: DateTime<Utc>) -> Self {
        Self {
            id,
            user_id: new.user_id.clone(),
            business_name: new.business_name.clone(),
            location: new.location.clone(),
            product_type: Some(new.product_type.clone()),
            source_language: Some(new.source_language.code().to_string()),
            description_original: Some(new.description_original.clone()),
            description_greek: None,
            photo_url: new.photo_url.clone(),
            category: Some(new.category.clone()),
            keywords: Some(new.keywords.clone()),
            created_at: Some(now),
            updated_at: Some(now),
        }
    }

    /// Apply an update in place, as `PATCH` would.
    pub fn apply(&mut self, update: &ProducerUpdate) {
        if let Some(name) = &update.business_name {
            self.business_name = name.clone();
        }
        if let Some(location) = &update.location {
            self.location = location.clone();
        }
        if let Some(product_type) = &update.product_type {
            self.product_type = Some(product_type.clone());
        }
        if let Some(lang) = update.source_language {
            self.source_language = Some(lang.code().to_string());
        }
        if let Some(description) = &update.description_original {
            self.description_original = Some(description.clone());
        }
        if let Some(photo_url) = &update.photo_url {
            self.photo_url = Some(photo_url.clone());
        }
        self.updated_at = Some(update.updated_at);
    }
}

/// A row of the `producer_translations` table: one per producer and language.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationRow {
    pub producer_id: Uuid,
    pub language: String,
    #[serde(default)]
    pub translation: String,
    #[serde(default)]
    pub storytelling: Option<String>,
}

/// Partial update of a `producers` row. `None` fields are not sent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProducerUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_language: Option<Language>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description_original: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl ProducerUpdate {
    pub fn from_changes(changes: ProducerChanges, now: DateTime<Utc>) -> Self {
        Self {
            business_name: changes.name,
            location: changes.location,
            product_type: changes.product_type,
            source_language: changes.source_language,
            description_original: changes.description,
            photo_url: changes.photo_url,
            updated_at: now,
        }
    }
}
