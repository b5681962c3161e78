//! Handlers for checkout and the purchase ledger.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use zavia_core::types::DbId;

use super::{required, required_text};
use crate::engine::access;
use crate::error::AppResult;
use crate::extract::AppJson;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutBody {
    pub user_id: Option<DbId>,
    pub user_email: Option<String>,
    pub product: Option<String>,
}

/// POST /api/v1/checkout
///
/// Returns the processor session id and its hosted redirect URL.
pub async fn create_checkout(
    State(state): State<AppState>,
    AppJson(input): AppJson<CheckoutBody>,
) -> AppResult<impl IntoResponse> {
    let user_id = required(input.user_id)?;
    let user_email = required_text(input.user_email)?;
    let product = required_text(input.product)?;

    let session = access::checkout(
        state.store.as_ref(),
        state.payments.as_ref(),
        &state.config,
        user_id,
        &user_email,
        &product,
    )
    .await?;
    Ok(Json(DataResponse { data: session }))
}

/// GET /api/v1/users/{id}/purchases
pub async fn list_purchases(
    State(state): State<AppState>,
    Path(user_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let purchases = access::list_purchases(state.store.as_ref(), user_id).await?;
    Ok(Json(DataResponse { data: purchases }))
}
