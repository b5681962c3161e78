//! Handlers for signup, login, and user profiles.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use zavia_core::types::DbId;

use super::required_text;
use crate::engine::accounts::{self, Signup};
use crate::error::AppResult;
use crate::extract::AppJson;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub email: Option<String>,
    pub name: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// POST /api/v1/users
pub async fn signup(
    State(state): State<AppState>,
    AppJson(input): AppJson<SignupRequest>,
) -> AppResult<impl IntoResponse> {
    let signup = Signup {
        email: required_text(input.email)?,
        name: required_text(input.name)?,
        password: required_text(input.password)?,
    };
    let user = accounts::signup(state.store.as_ref(), &state.config, signup).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: user })))
}

/// POST /api/v1/auth/login
///
/// Verifies credentials and returns the profile. Sessions are owned by the
/// external identity provider.
pub async fn login(
    State(state): State<AppState>,
    AppJson(input): AppJson<LoginRequest>,
) -> AppResult<impl IntoResponse> {
    let email = required_text(input.email)?;
    let password = required_text(input.password)?;

    let user = accounts::login(state.store.as_ref(), &email, &password).await?;
    let profile = accounts::profile(state.store.as_ref(), user.id).await?;
    Ok(Json(DataResponse { data: profile }))
}

/// GET /api/v1/users/{id}
pub async fn get_profile(
    State(state): State<AppState>,
    Path(user_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let profile = accounts::profile(state.store.as_ref(), user_id).await?;
    Ok(Json(DataResponse { data: profile }))
}
