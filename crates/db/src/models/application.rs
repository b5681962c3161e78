//! Guild application model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use zavia_core::status::{ApplicationDecision, ApplicationStatus};
use zavia_core::types::{DbId, Timestamp};

#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GuildApplication {
    pub id: DbId,
    pub user_id: DbId,
    pub cohort_id: Option<DbId>,
    pub strategic_doctrine: String,
    pub why_guild: String,
    pub commitment: String,
    #[sqlx(try_from = "String")]
    pub status: ApplicationStatus,
    pub submitted_at: Timestamp,
    pub reviewed_at: Option<Timestamp>,
    pub reviewed_by: Option<DbId>,
    pub review_notes: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewApplication {
    pub user_id: DbId,
    pub cohort_id: Option<DbId>,
    pub strategic_doctrine: String,
    pub why_guild: String,
    pub commitment: String,
    pub submitted_at: Timestamp,
}

#[derive(Debug, Clone)]
pub struct ApplicationReview {
    pub application_id: DbId,
    pub reviewer_id: DbId,
    pub decision: ApplicationDecision,
    pub notes: Option<String>,
    pub reviewed_at: Timestamp,
}
