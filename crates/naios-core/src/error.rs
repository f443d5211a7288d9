use thiserror::Error;

/// Rejections raised while validating inbound submissions.
///
/// The `Display` text is returned verbatim to HTTP callers.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing required fields: name, location, description, sourceLanguage")]
    MissingProducerFields,

    #[error("Missing search query")]
    MissingQuery,

    #[error("Unsupported language code: {0}")]
    UnsupportedLanguage(String),

    #[error("Description exceeds {max} characters")]
    DescriptionTooLong { max: usize },

    #[error("Field {0} must not be empty")]
    EmptyField(&'static str),
}
