//! Route definitions for the public guild endpoints.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::guild;
use crate::state::AppState;

/// Routes mounted at `/cohorts`.
pub fn cohort_router() -> Router<AppState> {
    Router::new().route("/", get(guild::list_cohorts))
}

/// Routes mounted at `/guild`.
///
/// ```text
/// POST /applications -> submit_application
/// ```
pub fn application_router() -> Router<AppState> {
    Router::new().route("/applications", post(guild::submit_application))
}
