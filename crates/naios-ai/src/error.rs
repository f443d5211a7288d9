use naios_core::Language;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AiError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("model endpoint returned {status}: {body}")]
    Server { status: u16, body: String },
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("no response from AI")]
    EmptyResponse,
    #[error("model reply is missing the {} translation", .0.name())]
    MissingTranslation(Language),
}
