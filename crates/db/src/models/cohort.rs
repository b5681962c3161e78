//! Guild cohort model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use zavia_core::status::CohortStatus;
use zavia_core::types::{DbId, Timestamp};

#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Cohort {
    pub id: DbId,
    pub name: String,
    pub start_date: Timestamp,
    pub end_date: Timestamp,
    pub max_students: i32,
    #[sqlx(try_from = "String")]
    pub status: CohortStatus,
    pub price_cents: i64,
    pub created_at: Timestamp,
    /// Enrolled user ids in enrollment order.
    pub enrolled_user_ids: Vec<DbId>,
}

#[derive(Debug, Clone)]
pub struct NewCohort {
    pub name: String,
    pub start_date: Timestamp,
    pub end_date: Timestamp,
    pub max_students: i32,
    pub status: CohortStatus,
    pub price_cents: i64,
    pub created_at: Timestamp,
}
