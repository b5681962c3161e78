//! Payment ledger entry.

use serde::Serialize;
use sqlx::FromRow;
use zavia_core::access::Product;
use zavia_core::status::PurchaseStatus;
use zavia_core::types::{DbId, Timestamp};

#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Purchase {
    pub id: DbId,
    pub user_id: DbId,
    #[sqlx(try_from = "String")]
    pub product: Product,
    /// Minor units.
    pub amount_cents: i64,
    pub currency: String,
    pub processor_payment_id: Option<String>,
    pub processor_session_id: String,
    #[sqlx(try_from = "String")]
    pub status: PurchaseStatus,
    pub created_at: Timestamp,
}

/// DTO for a completed checkout. Recorded with status `completed`.
#[derive(Debug, Clone)]
pub struct NewPurchase {
    pub user_id: DbId,
    pub product: Product,
    pub amount_cents: i64,
    pub currency: String,
    pub processor_payment_id: Option<String>,
    pub processor_session_id: String,
    pub created_at: Timestamp,
}
