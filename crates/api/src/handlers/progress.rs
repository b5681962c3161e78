//! Handlers for Canon progression.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use zavia_core::types::DbId;

use super::required;
use crate::engine::progression;
use crate::error::AppResult;
use crate::extract::AppJson;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteLessonRequest {
    pub module_number: Option<i64>,
    pub lesson_number: Option<i32>,
}

/// GET /api/v1/users/{id}/progress
pub async fn get_progress(
    State(state): State<AppState>,
    Path(user_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let view = progression::get_progress(state.store.as_ref(), user_id).await?;
    Ok(Json(DataResponse { data: view }))
}

/// POST /api/v1/users/{id}/lessons
///
/// Mark a lesson complete. Repeating the call is harmless.
pub async fn complete_lesson(
    State(state): State<AppState>,
    Path(user_id): Path<DbId>,
    AppJson(input): AppJson<CompleteLessonRequest>,
) -> AppResult<impl IntoResponse> {
    let module_number = required(input.module_number)?;
    let lesson_number = required(input.lesson_number)?;

    let view = progression::complete_lesson(
        state.store.as_ref(),
        user_id,
        module_number,
        lesson_number,
        Utc::now(),
    )
    .await?;
    Ok(Json(DataResponse { data: view }))
}
