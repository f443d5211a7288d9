//! Shared Naios types: languages, producer profiles, buyer queries and matches.

pub mod error;
pub mod language;
pub mod matching;
pub mod producer;

pub use error::ValidationError;
pub use language::{Language, STORYTELLING_LANGUAGES};
pub use matching::{
    BuyerQuery, FitAnalysis, MAX_MATCHES, MatchRequest, ProducerMatch, QueryInput, Score,
};
pub use producer::{
    CATEGORY_SUGGESTIONS, MAX_DESCRIPTION_CHARS, ProducerChanges, ProducerData, ProducerPatch,
    ProducerSubmission, TranslatedProfile, is_suggested_category,
};
