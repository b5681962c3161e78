//! Handlers for assignment submission and review.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use zavia_core::types::DbId;

use super::{required, required_text, AdminQuery};
use crate::engine::assignments;
use crate::error::AppResult;
use crate::extract::AppJson;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitAssignmentRequest {
    pub user_id: Option<DbId>,
    pub module_number: Option<i64>,
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewAssignmentRequest {
    pub assignment_id: Option<DbId>,
    pub reviewer_id: Option<DbId>,
    /// `pass` or `not_yet`.
    pub status: Option<String>,
    pub feedback: Option<String>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/assignments/submit
pub async fn submit(
    State(state): State<AppState>,
    AppJson(input): AppJson<SubmitAssignmentRequest>,
) -> AppResult<impl IntoResponse> {
    let user_id = required(input.user_id)?;
    let module_number = required(input.module_number)?;
    let content = required_text(input.content)?;

    let assignment = assignments::submit(
        state.store.as_ref(),
        user_id,
        module_number,
        content,
        Utc::now(),
    )
    .await?;
    Ok(Json(DataResponse { data: assignment }))
}

/// POST /api/v1/admin/review
pub async fn review(
    State(state): State<AppState>,
    AppJson(input): AppJson<ReviewAssignmentRequest>,
) -> AppResult<impl IntoResponse> {
    let assignment_id = required(input.assignment_id)?;
    let reviewer_id = required(input.reviewer_id)?;
    let status = required_text(input.status)?;
    let feedback = required_text(input.feedback)?;

    let reviewed = assignments::review(
        state.store.as_ref(),
        reviewer_id,
        assignment_id,
        &status,
        &feedback,
        Utc::now(),
    )
    .await?;
    Ok(Json(DataResponse { data: reviewed }))
}

/// GET /api/v1/admin/assignments/pending?adminId=
///
/// Review queue, oldest submission first.
pub async fn list_pending(
    State(state): State<AppState>,
    Query(query): Query<AdminQuery>,
) -> AppResult<impl IntoResponse> {
    let admin_id = required(query.admin_id)?;
    let pending = assignments::list_pending(state.store.as_ref(), admin_id).await?;
    Ok(Json(DataResponse { data: pending }))
}

/// GET /api/v1/users/{id}/assignments
pub async fn list_for_user(
    State(state): State<AppState>,
    Path(user_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let list = assignments::list_for_user(state.store.as_ref(), user_id).await?;
    Ok(Json(DataResponse { data: list }))
}
