//! Prompt templates sent to the chat model.

use naios_core::{BuyerQuery, CATEGORY_SUGGESTIONS, Language, ProducerData, TranslatedProfile};

pub const ENRICH_SYSTEM_PROMPT: &str =
    "You are a cultural commerce AI assistant. You ONLY respond with valid JSON, no other text.";

pub const MATCH_SYSTEM_PROMPT: &str =
    "You are a B2B matching AI. You ONLY respond with valid JSON, no other text.";

/// Characters of description included per candidate in a matching prompt.
pub const SUMMARY_DESCRIPTION_CHARS: usize = 300;
/// Keywords included per candidate in a matching prompt.
pub const SUMMARY_KEYWORDS: usize = 8;

/// Build the enrichment prompt for one producer.
///
/// The JSON shape at the end lists one `translations` key per target
/// language, which is how the model learns which languages to produce.
pub fn enrichment_prompt(data: &ProducerData, targets: &[Language]) -> String {
    let source = data.source_language.name();
    let target_names = targets
        .iter()
        .map(|lang| lang.name())
        .collect::<Vec<_>>()
        .join(", ");
    let translation_keys = targets
        .iter()
        .map(|lang| format!("\"{}\": \"...\"", lang.code()))
        .collect::<Vec<_>>()
        .join(",\n    ");
    let categories = CATEGORY_SUGGESTIONS.join(", ");

    format!(
        "You are a cultural commerce expert helping artisan producers reach global markets.\n\
         \n\
         Producer Information:\n\
         - Name: {name}\n\
         - Location: {location}\n\
         - Product: {product}\n\
         - Description ({source}): {description}\n\
         \n\
         Your task:\n\
         1. Translate the {source} description into {target_names}\n   \
            - Preserve cultural nuance and emotional tone\n   \
            - Don't just translate words - capture the story and heritage\n   \
            - Make it compelling for international buyers\n\
         \n\
         2. Create enhanced \"storytelling\" versions in English, German, and French that:\n   \
            - Emphasize authenticity and tradition\n   \
            - Highlight unique selling points\n   \
            - Connect the product to place and heritage\n   \
            - Are 2-3 sentences longer than the translation\n\
         \n\
         3. Extract 5-8 relevant keywords (in English) for searchability\n\
         \n\
         4. Categorize the product (choose ONE): {categories}\n\
         \n\
         Return ONLY valid JSON in this exact format (no markdown, no code blocks):\n\
         {{\n  \
           \"translations\": {{\n    \
             {translation_keys}\n  \
           }},\n  \
           \"storytelling\": {{\n    \
             \"en\": \"...\",\n    \
             \"de\": \"...\",\n    \
             \"fr\": \"...\"\n  \
           }},\n  \
           \"keywords\": [\"keyword1\", \"keyword2\", ...],\n  \
           \"category\": \"Artisan Food\"\n\
         }}",
        name = data.name,
        location = data.location,
        product = data.product_type,
        description = data.description,
    )
}

/// Build the ranking prompt for a buyer query over `candidates`.
///
/// Candidates are labelled with their zero-based position, which the model
/// echoes back as `producerIndex`.
pub fn matching_prompt(query: &BuyerQuery, candidates: &[TranslatedProfile]) -> String {
    let context = candidates
        .iter()
        .enumerate()
        .map(|(idx, profile)| candidate_summary(idx, profile))
        .collect::<Vec<_>>()
        .join("\n---\n");

    let mut buyer = format!("Buyer Query: \"{}\"\n", query.query);
    if let Some(location) = &query.location {
        buyer.push_str(&format!("Buyer Location: {location}\n"));
    }
    if let Some(product) = &query.product_type {
        buyer.push_str(&format!("Preferred Product: {product}\n"));
    }

    format!(
        "You are a B2B matching expert for cultural commerce.\n\
         \n\
         {buyer}\
         \n\
         Available Producers:\n\
         {context}\n\
         \n\
         Your task:\n\
         1. Analyze the buyer's needs\n\
         2. Rank ALL producers by relevance (score 0-100)\n\
         3. For the top 3 matches, provide:\n   \
            - Overall match score\n   \
            - Breakdown: location fit, product fit, quality/authenticity fit (each 0-100)\n   \
            - Clear reasoning for why this is a good match (2-3 sentences)\n\
         \n\
         \"producerIndex\" is the number shown after \"Producer\" above.\n\
         \n\
         Return ONLY valid JSON in this exact format (no markdown, no code blocks):\n\
         {{\n  \
           \"matches\": [\n    \
             {{\n      \
               \"producerIndex\": 0,\n      \
               \"score\": 94,\n      \
               \"reasoning\": \"...\",\n      \
               \"locationFit\": 90,\n      \
               \"productFit\": 95,\n      \
               \"qualityFit\": 97\n    \
             }}\n  \
           ]\n\
         }}\n\
         \n\
         Return the top 3 matches only."
    )
}

fn candidate_summary(idx: usize, profile: &TranslatedProfile) -> String {
    let original = &profile.original;
    let keywords = profile
        .keywords
        .iter()
        .take(SUMMARY_KEYWORDS)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "Producer {idx}:\n\
         - Name: {name}\n\
         - Location: {location}\n\
         - Product: {product}\n\
         - Category: {category}\n\
         - Description: {description}\n\
         - Keywords: {keywords}",
        name = original.name,
        location = original.location,
        product = original.product_type,
        category = profile.category,
        description = truncate_chars(profile.english_description(), SUMMARY_DESCRIPTION_CHARS),
    )
}

fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}
