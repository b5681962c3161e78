pub mod admin;
pub mod auth;
pub mod guild;
pub mod health;
pub mod users;

use axum::routing::{get, post};
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                                      login (public)
///
/// /users                                           signup (POST)
/// /users/{id}                                      profile
/// /users/{id}/progress                             module progress view
/// /users/{id}/lessons                              complete lesson (POST)
/// /users/{id}/assignments                          submission history
/// /users/{id}/purchases                            purchase ledger
///
/// /curriculum                                      Canon catalogue
///
/// /assignments/submit                              submit assignment (POST)
///
/// /checkout                                        create checkout session (POST)
/// /webhooks/payment                                processor webhook (POST, signed)
///
/// /cohorts                                         open guild cohorts
/// /guild/applications                              submit application (POST)
///
/// /admin/review                                    review assignment (POST)
/// /admin/assignments/pending                       review queue
/// /admin/cohorts                                   create cohort (POST)
/// /admin/cohorts/{id}/enroll                       enroll user (POST)
/// /admin/guild/applications/pending                application queue
/// /admin/guild/applications/review                 review application (POST)
/// /admin/fellowship/invites                        create invite (POST)
/// /admin/stats                                     dashboard counts
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/users", users::router())
        .route("/curriculum", get(handlers::curriculum::list_curriculum))
        .route("/assignments/submit", post(handlers::assignments::submit))
        .route("/checkout", post(handlers::checkout::create_checkout))
        .route("/webhooks/payment", post(handlers::webhooks::payment_webhook))
        .nest("/cohorts", guild::cohort_router())
        .nest("/guild", guild::application_router())
        .nest("/admin", admin::router())
}
