//! Payment-processor webhook receiver.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use serde_json::json;

use crate::engine::access;
use crate::error::AppResult;
use crate::state::AppState;

/// Header carrying `t=<unix>,v1=<hex>`.
pub const SIGNATURE_HEADER: &str = "stripe-signature";

/// POST /api/v1/webhooks/payment
///
/// The body is taken raw; the signature covers the exact bytes received.
pub async fn payment_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> AppResult<impl IntoResponse> {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok());

    access::handle_webhook(
        state.store.as_ref(),
        &state.config,
        signature,
        &body,
        Utc::now(),
    )
    .await?;
    Ok(Json(json!({ "received": true })))
}
