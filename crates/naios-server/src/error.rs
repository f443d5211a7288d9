use std::fmt::Display;

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use naios_core::ValidationError;
use serde_json::json;
use tracing::error;

/// Every failure a handler can return.
///
/// Bodies are `{"error": ...}` with an optional `"details"` carrying the
/// underlying error text.
#[derive(Debug)]
pub enum ApiError {
    Validation(ValidationError),
    BadRequest(String),
    NotFound(&'static str),
    Internal {
        error: &'static str,
        details: Option<String>,
    },
}

impl ApiError {
    /// A 500 with a fixed message, logging `cause`.
    pub fn internal(error: &'static str, cause: impl Display) -> Self {
        let details = cause.to_string();
        error!(details = %details, "{error}");
        Self::Internal {
            error,
            details: Some(details),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            Self::Validation(err) => json!({"error": err.to_string()}),
            Self::BadRequest(message) => json!({"error": message}),
            Self::NotFound(message) => json!({"error": message}),
            Self::Internal {
                error,
                details: Some(details),
            } => json!({"error": error, "details": details}),
            Self::Internal {
                error,
                details: None,
            } => json!({"error": error}),
        };
        (status, Json(body)).into_response()
    }
}
