//! Admin dashboard and fellowship invite handlers.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use zavia_core::types::DbId;

use super::{required, required_text, AdminQuery};
use crate::engine::admin;
use crate::error::AppResult;
use crate::extract::AppJson;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateInviteRequest {
    pub admin_id: Option<DbId>,
    pub email: Option<String>,
}

/// GET /api/v1/admin/stats?adminId=
pub async fn stats(
    State(state): State<AppState>,
    Query(query): Query<AdminQuery>,
) -> AppResult<impl IntoResponse> {
    let admin_id = required(query.admin_id)?;
    let stats = admin::stats(state.store.as_ref(), admin_id, Utc::now()).await?;
    Ok(Json(DataResponse { data: stats }))
}

/// POST /api/v1/admin/fellowship/invites
pub async fn create_invite(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateInviteRequest>,
) -> AppResult<impl IntoResponse> {
    let admin_id = required(input.admin_id)?;
    let email = required_text(input.email)?;

    let invite = admin::create_invite(state.store.as_ref(), admin_id, &email, Utc::now()).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: invite })))
}
