//! Buyer-to-producer ranking.

use std::collections::HashSet;

use naios_core::{BuyerQuery, FitAnalysis, MAX_MATCHES, ProducerMatch, Score, TranslatedProfile};
use serde::Deserialize;
use tracing::{info, warn};

use crate::prompt::{MATCH_SYSTEM_PROMPT, matching_prompt};
use crate::{AiError, ChatModel, ChatRequest};

#[derive(Deserialize)]
struct MatchReply {
    #[serde(default)]
    matches: Vec<RankedEntry>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RankedEntry {
    producer_index: i64,
    #[serde(default)]
    score: Score,
    #[serde(default)]
    reasoning: String,
    #[serde(default)]
    location_fit: Score,
    #[serde(default)]
    product_fit: Score,
    #[serde(default)]
    quality_fit: Score,
}

/// Rank `candidates` for `query` with one model call and return at most
/// [`MAX_MATCHES`] matches in the order the model gave them.
///
/// Indices outside `candidates` are dropped, as are repeats of an index
/// already matched. With no candidates the model is not called.
pub async fn match_producers(
    model: &dyn ChatModel,
    query: &BuyerQuery,
    candidates: &[TranslatedProfile],
) -> Result<Vec<ProducerMatch>, AiError> {
    if candidates.is_empty() {
        info!("no producers to match against");
        return Ok(Vec::new());
    }

    let request = ChatRequest {
        system_prompt: MATCH_SYSTEM_PROMPT.to_string(),
        user_prompt: matching_prompt(query, candidates),
        max_tokens: None,
    };
    let content = model.complete_json(&request).await?;
    let reply: MatchReply = serde_json::from_str(&content)?;

    let mut seen = HashSet::new();
    let mut matches = Vec::with_capacity(MAX_MATCHES);
    for entry in reply.matches {
        let Some((idx, profile)) = usize::try_from(entry.producer_index)
            .ok()
            .and_then(|idx| candidates.get(idx).map(|p| (idx, p)))
        else {
            warn!(
                index = entry.producer_index,
                candidates = candidates.len(),
                "model returned an out-of-range producer index"
            );
            continue;
        };
        if !seen.insert(idx) {
            warn!(index = idx, "duplicate producer index");
            continue;
        }
        matches.push(ProducerMatch {
            producer: profile.clone(),
            score: entry.score,
            reasoning: entry.reasoning,
            fit_analysis: FitAnalysis {
                location_fit: entry.location_fit,
                product_fit: entry.product_fit,
                quality_fit: entry.quality_fit,
            },
        });
        if matches.len() == MAX_MATCHES {
            break;
        }
    }

    info!(
        candidates = candidates.len(),
        matches = matches.len(),
        "buyer query ranked"
    );
    Ok(matches)
}
