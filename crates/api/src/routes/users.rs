//! Route definitions for the `/users` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{accounts, assignments, checkout, progress};
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// POST /                    -> signup
/// GET  /{id}                -> get_profile
/// GET  /{id}/progress       -> get_progress
/// POST /{id}/lessons        -> complete_lesson
/// GET  /{id}/assignments    -> list_for_user
/// GET  /{id}/purchases      -> list_purchases
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(accounts::signup))
        .route("/{id}", get(accounts::get_profile))
        .route("/{id}/progress", get(progress::get_progress))
        .route("/{id}/lessons", post(progress::complete_lesson))
        .route("/{id}/assignments", get(assignments::list_for_user))
        .route("/{id}/purchases", get(checkout::list_purchases))
}
