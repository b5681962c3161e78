//! Handlers for guild cohorts and applications.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use zavia_core::access::Product;
use zavia_core::cohort::DEFAULT_MAX_STUDENTS;
use zavia_core::types::{DbId, Timestamp};

use super::{required, required_text, AdminQuery};
use crate::engine::guild::{self, ApplicationInput, CohortInput};
use crate::error::AppResult;
use crate::extract::AppJson;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCohortRequest {
    pub admin_id: Option<DbId>,
    pub name: Option<String>,
    pub start_date: Option<Timestamp>,
    pub end_date: Option<Timestamp>,
    pub max_students: Option<i32>,
    pub status: Option<String>,
    pub price_cents: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollRequest {
    pub admin_id: Option<DbId>,
    pub user_id: Option<DbId>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitApplicationRequest {
    pub user_id: Option<DbId>,
    pub cohort_id: Option<DbId>,
    pub strategic_doctrine: Option<String>,
    pub why_guild: Option<String>,
    pub commitment: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewApplicationRequest {
    pub application_id: Option<DbId>,
    pub reviewer_id: Option<DbId>,
    /// `approved` or `rejected`.
    pub status: Option<String>,
    pub notes: Option<String>,
}

// ---------------------------------------------------------------------------
// Cohorts
// ---------------------------------------------------------------------------

/// POST /api/v1/admin/cohorts
pub async fn create_cohort(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateCohortRequest>,
) -> AppResult<impl IntoResponse> {
    let admin_id = required(input.admin_id)?;
    let cohort = CohortInput {
        name: required_text(input.name)?,
        start_date: required(input.start_date)?,
        end_date: required(input.end_date)?,
        max_students: input.max_students.unwrap_or(DEFAULT_MAX_STUDENTS),
        status: input.status,
        price_cents: input
            .price_cents
            .unwrap_or_else(|| Product::Guild.price_cents()),
    };

    let cohort = guild::create_cohort(state.store.as_ref(), admin_id, cohort, Utc::now()).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: cohort })))
}

/// GET /api/v1/cohorts
///
/// Upcoming and active cohorts, soonest first.
pub async fn list_cohorts(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let cohorts = guild::list_open_cohorts(state.store.as_ref()).await?;
    Ok(Json(DataResponse { data: cohorts }))
}

/// POST /api/v1/admin/cohorts/{id}/enroll
pub async fn enroll(
    State(state): State<AppState>,
    Path(cohort_id): Path<DbId>,
    AppJson(input): AppJson<EnrollRequest>,
) -> AppResult<impl IntoResponse> {
    let admin_id = required(input.admin_id)?;
    let user_id = required(input.user_id)?;

    let cohort =
        guild::enroll(state.store.as_ref(), admin_id, cohort_id, user_id, Utc::now()).await?;
    Ok(Json(DataResponse { data: cohort }))
}

// ---------------------------------------------------------------------------
// Applications
// ---------------------------------------------------------------------------

/// POST /api/v1/guild/applications
pub async fn submit_application(
    State(state): State<AppState>,
    AppJson(input): AppJson<SubmitApplicationRequest>,
) -> AppResult<impl IntoResponse> {
    let user_id = required(input.user_id)?;
    let application = ApplicationInput {
        cohort_id: input.cohort_id,
        strategic_doctrine: input.strategic_doctrine.unwrap_or_default(),
        why_guild: input.why_guild.unwrap_or_default(),
        commitment: input.commitment.unwrap_or_default(),
    };

    let application =
        guild::submit_application(state.store.as_ref(), user_id, application, Utc::now()).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: application })))
}

/// GET /api/v1/admin/guild/applications/pending?adminId=
pub async fn list_pending_applications(
    State(state): State<AppState>,
    Query(query): Query<AdminQuery>,
) -> AppResult<impl IntoResponse> {
    let admin_id = required(query.admin_id)?;
    let pending = guild::list_pending_applications(state.store.as_ref(), admin_id).await?;
    Ok(Json(DataResponse { data: pending }))
}

/// POST /api/v1/admin/guild/applications/review
pub async fn review_application(
    State(state): State<AppState>,
    AppJson(input): AppJson<ReviewApplicationRequest>,
) -> AppResult<impl IntoResponse> {
    let application_id = required(input.application_id)?;
    let reviewer_id = required(input.reviewer_id)?;
    let status = required_text(input.status)?;

    let application = guild::review_application(
        state.store.as_ref(),
        reviewer_id,
        application_id,
        &status,
        input.notes.as_deref(),
        Utc::now(),
    )
    .await?;
    Ok(Json(DataResponse { data: application }))
}
