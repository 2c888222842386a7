//! Multipart upload handling and the extraction step of file-based endpoints.

use std::collections::HashMap;

use axum::{
    extract::{multipart::MultipartError, Multipart},
    http::StatusCode,
};
use tracing::{info, warn};

use crate::errors::AppError;
use crate::extraction::{self, UploadedDocument};
use crate::generation::request::UseCase;

const FILE_FIELD: &str = "file";

/// A parsed multipart form: at most one file plus plain text fields.
#[derive(Debug, Default)]
pub struct UploadForm {
    document: Option<UploadedDocument>,
    fields: HashMap<String, String>,
}

impl UploadForm {
    /// Reads every field. `max_bytes` is the body limit enforced by the router,
    /// quoted back when a request runs over it.
    pub async fn read(mut multipart: Multipart, max_bytes: usize) -> Result<Self, AppError> {
        let mut form = UploadForm::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| upload_error(e, max_bytes, "Malformed upload"))?
        {
            let name = field.name().unwrap_or_default().to_string();

            if name == FILE_FIELD {
                if form.document.is_some() {
                    return Err(AppError::InvalidRequest(
                        "Exactly one file may be uploaded".to_string(),
                    ));
                }
                let filename = field.file_name().map(str::to_owned);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| upload_error(e, max_bytes, "Failed to read uploaded file"))?;
                form.document = Some(UploadedDocument::new(bytes, filename));
            } else {
                let value = field.text().await.map_err(|e| {
                    upload_error(e, max_bytes, &format!("Failed to read field '{name}'"))
                })?;
                form.fields.insert(name, value);
            }
        }

        Ok(form)
    }

    pub fn take_document(&mut self) -> Result<UploadedDocument, AppError> {
        self.document
            .take()
            .ok_or_else(|| AppError::InvalidRequest("A resume file is required".to_string()))
    }

    /// A non-blank text field.
    pub fn text(&self, name: &str) -> Option<String> {
        self.fields
            .get(name)
            .filter(|v| !v.trim().is_empty())
            .cloned()
    }

    pub fn number(&self, name: &str, default: u32) -> Result<u32, AppError> {
        match self.text(name) {
            Some(raw) => raw.trim().parse::<u32>().map_err(|_| {
                AppError::InvalidRequest(format!("{name} must be a non-negative integer"))
            }),
            None => Ok(default),
        }
    }
}

fn upload_error(err: MultipartError, max_bytes: usize, context: &str) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return AppError::PayloadTooLarge(format!("Upload exceeds {max_bytes} bytes"));
    }
    AppError::InvalidRequest(format!("{context}: {}", err.body_text()))
}

/// Runs extraction on the blocking pool and applies the minimum-length policy.
pub async fn extract_resume(
    document: UploadedDocument,
    min_chars: usize,
    use_case: UseCase,
) -> Result<String, AppError> {
    let filename = document.filename.clone().unwrap_or_default();
    let size = document.bytes.len();

    let extracted =
        tokio::task::spawn_blocking(move || extraction::extract(&document.bytes, &document.extension))
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("extraction task failed: {e}")))?
            .map_err(|e| {
                warn!(%use_case, %filename, size, "Resume extraction failed: {e}");
                AppError::from(e)
            })?;

    let chars = extracted.char_count();
    if chars < min_chars {
        warn!(%use_case, %filename, chars, min_chars, "Extracted resume is too short");
        return Err(AppError::TooShort(
            "Resume content is too short or empty.".to_string(),
        ));
    }

    info!(%use_case, format = %extracted.format, chars, "Extracted resume text");
    Ok(extracted.text)
}
