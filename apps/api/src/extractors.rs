use axum::extract::FromRequest;

use crate::errors::AppError;

/// `axum::Json` whose rejections become `AppError::InvalidRequest` (400 with a
/// `{detail}` body) instead of axum's plain-text 415/422 responses.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);
