//! Request extractors.

use axum::extract::FromRequest;

use crate::error::AppError;

/// `axum::Json` with rejections mapped to a 400 [`AppError::BadRequest`]
/// instead of axum's default 422 plain-text body.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);
