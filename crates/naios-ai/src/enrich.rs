//! Profile enrichment: translations, storytelling, keywords and a category.

use std::collections::{BTreeMap, HashMap};

use naios_core::{Language, ProducerData, TranslatedProfile, is_suggested_category};
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::prompt::{ENRICH_SYSTEM_PROMPT, enrichment_prompt};
use crate::{AiError, ChatModel, ChatRequest};

#[derive(Deserialize)]
struct EnrichmentReply {
    translations: HashMap<String, String>,
    #[serde(default)]
    storytelling: HashMap<String, String>,
    #[serde(default)]
    keywords: Vec<String>,
    #[serde(default)]
    category: String,
}

/// Enrich a producer profile with one model call.
///
/// The model is asked for the six non-source languages. The reply must carry
/// all six; the source-language entry is then filled with the caller's
/// description verbatim.
pub async fn enrich_profile(
    model: &dyn ChatModel,
    data: ProducerData,
) -> Result<TranslatedProfile, AiError> {
    let targets = data.source_language.targets();
    let request = ChatRequest {
        system_prompt: ENRICH_SYSTEM_PROMPT.to_string(),
        user_prompt: enrichment_prompt(&data, &targets),
        max_tokens: None,
    };

    let content = model.complete_json(&request).await?;
    let reply: EnrichmentReply = serde_json::from_str(&content)?;

    let mut translations = BTreeMap::new();
    for (code, text) in reply.translations {
        match Language::from_code(&code) {
            Some(lang) => {
                translations.insert(lang, text);
            }
            None => debug!(code = %code, "ignoring translation in unknown language"),
        }
    }
    if let Some(missing) = targets.iter().find(|lang| !translations.contains_key(lang)) {
        return Err(AiError::MissingTranslation(*missing));
    }
    translations.insert(data.source_language, data.description.clone());

    let storytelling: BTreeMap<Language, String> = reply
        .storytelling
        .into_iter()
        .filter_map(|(code, text)| Language::from_code(&code).map(|lang| (lang, text)))
        .filter(|(lang, _)| lang.has_storytelling())
        .collect();

    let keywords: Vec<String> = reply
        .keywords
        .into_iter()
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty())
        .collect();

    let category = reply.category.trim().to_string();
    if !is_suggested_category(&category) {
        warn!(category = %category, "model chose a category outside the suggested list");
    }

    info!(
        name = %data.name,
        translations = translations.len(),
        keywords = keywords.len(),
        category = %category,
        "profile enriched"
    );

    Ok(TranslatedProfile {
        original: data,
        translations,
        storytelling,
        keywords,
        category,
    })
}
