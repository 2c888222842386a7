use axum::{
    extract::{multipart::MultipartRejection, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::{debug, error, warn};

use crate::extraction::ExtractionError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
/// Every response body is `{"detail": ..., "code": ...}`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Corrupt document: {0}")]
    CorruptDocument(String),

    #[error("Resume too short: {0}")]
    TooShort(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Not found")]
    NotFound,

    #[error("AI service is not configured")]
    NotConfigured,

    /// Carries the client-safe message only; the cause is logged where it is built.
    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidRequest(_)
            | AppError::UnsupportedFormat(_)
            | AppError::CorruptDocument(_)
            | AppError::TooShort(_) => StatusCode::BAD_REQUEST,
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::NotConfigured => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Upstream(_) => StatusCode::BAD_GATEWAY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::InvalidRequest(_) => "INVALID_REQUEST",
            AppError::UnsupportedFormat(_) => "UNSUPPORTED_FORMAT",
            AppError::CorruptDocument(_) => "CORRUPT_DOCUMENT",
            AppError::TooShort(_) => "TOO_SHORT",
            AppError::PayloadTooLarge(_) => "PAYLOAD_TOO_LARGE",
            AppError::NotFound => "NOT_FOUND",
            AppError::NotConfigured => "NOT_CONFIGURED",
            AppError::Upstream(_) => "UPSTREAM_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Whether the failure is logged when the response is built. Extraction
    /// and generation failures are logged where they happen, with the use case.
    pub fn logs_on_response(&self) -> bool {
        matches!(
            self,
            AppError::InvalidRequest(_)
                | AppError::PayloadTooLarge(_)
                | AppError::NotFound
                | AppError::Internal(_)
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let detail = match &self {
            AppError::InvalidRequest(msg) => msg.clone(),
            AppError::UnsupportedFormat(msg) | AppError::CorruptDocument(msg) => {
                format!("Failed to parse resume: {msg}")
            }
            AppError::TooShort(msg) | AppError::PayloadTooLarge(msg) => msg.clone(),
            AppError::NotFound => "Not Found".to_string(),
            AppError::NotConfigured => "AI service is not configured (missing API key)".to_string(),
            AppError::Upstream(msg) => msg.clone(),
            AppError::Internal(_) => "An internal server error occurred".to_string(),
        };

        if self.logs_on_response() {
            match &self {
                AppError::Internal(e) => error!("Internal error: {e:?}"),
                AppError::NotFound => debug!("No route matched the request"),
                _ => warn!(code = self.code(), "Request rejected: {detail}"),
            }
        }

        let body = Json(json!({
            "detail": detail,
            "code": self.code(),
        }));

        (self.status(), body).into_response()
    }
}

impl From<ExtractionError> for AppError {
    fn from(err: ExtractionError) -> Self {
        match err {
            ExtractionError::UnsupportedFormat(_) => AppError::UnsupportedFormat(err.to_string()),
            ExtractionError::CorruptDocument { .. } => AppError::CorruptDocument(err.to_string()),
            ExtractionError::Empty(_) => {
                AppError::TooShort("Resume content is too short or empty.".to_string())
            }
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return AppError::PayloadTooLarge("Request body exceeds the upload size limit".to_string());
        }
        AppError::InvalidRequest(rejection.body_text())
    }
}

impl From<MultipartRejection> for AppError {
    fn from(rejection: MultipartRejection) -> Self {
        AppError::InvalidRequest(rejection.body_text())
    }
}
