use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[cfg(feature = "rest")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("database returned {status}: {body}")]
    Server { status: u16, body: String },

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("write returned no rows")]
    NoRows,

    #[error("{0}")]
    Other(String),
}
