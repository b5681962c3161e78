//! Canon assignment model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use zavia_core::curriculum::ModuleNumber;
use zavia_core::progress::CanonProgress;
use zavia_core::status::{ReviewDecision, SubmissionStatus};
use zavia_core::types::{DbId, Timestamp};

#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub id: DbId,
    pub user_id: DbId,
    #[sqlx(try_from = "i16")]
    pub module_number: ModuleNumber,
    pub content: String,
    #[sqlx(try_from = "String")]
    pub status: SubmissionStatus,
    pub submitted_at: Timestamp,
    pub reviewed_at: Option<Timestamp>,
    pub reviewed_by: Option<DbId>,
    pub feedback: Option<String>,
}

/// DTO for a submission that has already passed content validation.
#[derive(Debug, Clone)]
pub struct NewAssignment {
    pub user_id: DbId,
    pub module_number: ModuleNumber,
    pub content: String,
    pub submitted_at: Timestamp,
}

/// A validated admin review.
#[derive(Debug, Clone)]
pub struct AssignmentReview {
    pub assignment_id: DbId,
    pub reviewer_id: DbId,
    pub decision: ReviewDecision,
    pub feedback: String,
    pub reviewed_at: Timestamp,
}

/// Outcome of a review write: the updated assignment and the owner's
/// progress after the completion cascade.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewedAssignment {
    pub assignment: Assignment,
    pub progress: CanonProgress,
    /// `true` if this review completed the Canon.
    pub course_completed: bool,
}
