//! AI layer: prompt construction and chat-completion calls for enrichment and matching.

mod client;
mod enrich;
mod error;
mod matcher;
pub mod prompt;
#[cfg(any(test, feature = "testing"))]
mod scripted;

pub use client::{AiConfig, ChatModel, ChatRequest, OpenAiClient};
pub use enrich::enrich_profile;
pub use error::AiError;
pub use matcher::match_producers;
#[cfg(any(test, feature = "testing"))]
pub use scripted::ScriptedModel;
