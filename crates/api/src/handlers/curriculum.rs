use axum::response::IntoResponse;
use axum::Json;
use zavia_core::curriculum::CANON_MODULES;

use crate::response::DataResponse;

/// GET /api/v1/curriculum
///
/// The fixed Canon catalogue: modules, lessons, and assignment word limits.
pub async fn list_curriculum() -> impl IntoResponse {
    Json(DataResponse {
        data: &CANON_MODULES,
    })
}
