//! Buyer queries and the ranked matches returned for them.

use serde::{Deserialize, Serialize};

use crate::{TranslatedProfile, ValidationError};

/// Most matches returned for a single buyer query.
pub const MAX_MATCHES: usize = 3;

/// A buyer's free-text purchasing need.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuyerQuery {
    pub query: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_type: Option<String>,
}

/// Raw body of a matching request: `{"query": {"query": "...", ...}}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MatchRequest {
    pub query: Option<QueryInput>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryInput {
    pub query: Option<String>,
    pub location: Option<String>,
    pub product_type: Option<String>,
}

impl MatchRequest {
    pub fn validate(self) -> Result<BuyerQuery, ValidationError> {
        let input = self.query.ok_or(ValidationError::MissingQuery)?;
        let query = input
            .query
            .filter(|q| !q.trim().is_empty())
            .ok_or(ValidationError::MissingQuery)?;
        Ok(BuyerQuery {
            query,
            location: input.location.filter(|l| !l.trim().is_empty()),
            product_type: input.product_type.filter(|p| !p.trim().is_empty()),
        })
    }
}

/// A 0–100 score. Anything outside the range is clamped on construction,
/// fractional values are rounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(from = "f64", into = "u8")]
pub struct Score(u8);

impl Score {
    pub const MAX: u8 = 100;

    pub fn clamped(value: f64) -> Self {
        if value.is_nan() {
            return Self(0);
        }
        Self(value.clamp(0.0, f64::from(Self::MAX)).round() as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl From<f64> for Score {
    fn from(value: f64) -> Self {
        Self::clamped(value)
    }
}

impl From<Score> for u8 {
    fn from(score: Score) -> Self {
        score.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FitAnalysis {
    pub location_fit: Score,
    pub product_fit: Score,
    pub quality_fit: Score,
}

/// One ranked producer for a buyer query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProducerMatch {
    pub producer: TranslatedProfile,
    pub score: Score,
    pub reasoning: String,
    pub fit_analysis: FitAnalysis,
}
