pub mod accounts;
pub mod admin;
pub mod assignments;
pub mod checkout;
pub mod curriculum;
pub mod guild;
pub mod progress;
pub mod webhooks;

use serde::Deserialize;
use zavia_core::types::DbId;

use crate::error::{AppError, AppResult};

/// `?adminId=` on admin list endpoints.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminQuery {
    pub admin_id: Option<DbId>,
}

fn missing_fields() -> AppError {
    AppError::BadRequest("Missing required fields".into())
}

/// Unwrap a required request field.
pub(crate) fn required<T>(value: Option<T>) -> AppResult<T> {
    value.ok_or_else(missing_fields)
}

/// Unwrap a required text field; an empty string counts as missing.
pub(crate) fn required_text(value: Option<String>) -> AppResult<String> {
    value.filter(|v| !v.is_empty()).ok_or_else(missing_fields)
}
