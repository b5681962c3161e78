//! Fellowship membership records and invites.

use chrono::Duration;
use serde::Serialize;
use sqlx::FromRow;
use zavia_core::access::FELLOWSHIP_TERM_DAYS;
use zavia_core::status::{InviteStatus, MembershipStatus};
use zavia_core::types::{DbId, Timestamp};

use super::purchase::Purchase;

#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FellowshipMember {
    pub id: DbId,
    pub user_id: DbId,
    #[sqlx(try_from = "String")]
    pub status: MembershipStatus,
    pub yearly_fee_cents: i64,
    pub joined_at: Timestamp,
    pub last_payment_at: Timestamp,
    pub next_payment_at: Timestamp,
}

/// DTO for a paid fellowship term starting at `paid_at`.
#[derive(Debug, Clone)]
pub struct NewFellowshipMember {
    pub user_id: DbId,
    pub yearly_fee_cents: i64,
    pub paid_at: Timestamp,
    pub next_payment_at: Timestamp,
}

impl NewFellowshipMember {
    /// One paid term starting at the purchase, with the next payment a term later.
    pub fn for_purchase(purchase: &Purchase) -> Self {
        Self {
            user_id: purchase.user_id,
            yearly_fee_cents: purchase.amount_cents,
            paid_at: purchase.created_at,
            next_payment_at: purchase.created_at + Duration::days(FELLOWSHIP_TERM_DAYS),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FellowshipInvite {
    pub id: DbId,
    pub email: String,
    pub token: String,
    pub invited_by: DbId,
    #[sqlx(try_from = "String")]
    pub status: InviteStatus,
    pub created_at: Timestamp,
    pub expires_at: Timestamp,
}

#[derive(Debug, Clone)]
pub struct NewInvite {
    pub email: String,
    pub token: String,
    pub invited_by: DbId,
    pub created_at: Timestamp,
    pub expires_at: Timestamp,
}
