//! Route definitions for the `/admin` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{admin, assignments, guild};
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// Every handler checks the acting id (`reviewerId` / `adminId`) against
/// the user's admin flag.
///
/// ```text
/// POST /review                           -> review assignment
/// GET  /assignments/pending              -> review queue
/// POST /cohorts                          -> create_cohort
/// POST /cohorts/{id}/enroll              -> enroll
/// GET  /guild/applications/pending       -> application queue
/// POST /guild/applications/review        -> review_application
/// POST /fellowship/invites               -> create_invite
/// GET  /stats                            -> stats
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/review", post(assignments::review))
        .route("/assignments/pending", get(assignments::list_pending))
        .route("/cohorts", post(guild::create_cohort))
        .route("/cohorts/{id}/enroll", post(guild::enroll))
        .route(
            "/guild/applications/pending",
            get(guild::list_pending_applications),
        )
        .route("/guild/applications/review", post(guild::review_application))
        .route("/fellowship/invites", post(admin::create_invite))
        .route("/stats", get(admin::stats))
}
