//! Conversion between enriched profiles and table rows.

use std::collections::BTreeMap;

use naios_core::{Language, ProducerData, STORYTELLING_LANGUAGES, TranslatedProfile};
use tracing::debug;
use uuid::Uuid;

use crate::{ProducerRow, TranslationRow};

/// One translation row per language in `profile`, with storytelling copy
/// attached where the profile has it.
pub fn translation_rows(producer_id: Uuid, profile: &TranslatedProfile) -> Vec<TranslationRow> {
    profile
        .translations
        .iter()
        .map(|(&lang, text)| TranslationRow {
            producer_id,
            language: lang.code().to_string(),
            translation: text.clone(),
            storytelling: profile.storytelling(lang).map(str::to_string),
        })
        .collect()
}

/// Rebuild a profile from its producer row and translation rows.
///
/// Every language gets a translation entry and every storytelling language a
/// storytelling entry; absent rows become empty strings. The source-language
/// entry is always the row's description. Rows without a `source_language`
/// are read as Greek, taking their text from `description_greek` when
/// `description_original` is empty.
pub fn assemble_profile(row: &ProducerRow, translations: &[TranslationRow]) -> TranslatedProfile {
    let source_language = row
        .source_language
        .as_deref()
        .and_then(Language::from_code)
        .unwrap_or(Language::El);
    let description = row
        .description_original
        .clone()
        .filter(|d| !d.is_empty())
        .or_else(|| row.description_greek.clone())
        .unwrap_or_default();

    let mut translation_map: BTreeMap<Language, String> =
        Language::ALL.iter().map(|&l| (l, String::new())).collect();
    let mut storytelling: BTreeMap<Language, String> = STORYTELLING_LANGUAGES
        .iter()
        .map(|&l| (l, String::new()))
        .collect();

    for t in translations {
        let Some(lang) = Language::from_code(&t.language) else {
            debug!(producer_id = %row.id, language = %t.language, "skipping unknown language row");
            continue;
        };
        translation_map.insert(lang, t.translation.clone());
        if let Some(story) = t.storytelling.as_ref().filter(|_| lang.has_storytelling()) {
            storytelling.insert(lang, story.clone());
        }
    }

    // The source entry always mirrors the producer row, which PATCH may have
    // edited after the translation rows were written.
    translation_map.insert(source_language, description.clone());

    TranslatedProfile {
        original: ProducerData {
            name: row.business_name.clone(),
            location: row.location.clone(),
            product_type: row.product_type.clone().unwrap_or_default(),
            source_language,
            description,
            photo_url: row.photo_url.clone(),
        },
        translations: translation_map,
        storytelling,
        keywords: row.keywords.clone().unwrap_or_default(),
        category: row.category.clone().unwrap_or_default(),
    }
}
