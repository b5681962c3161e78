//! Assignment submission and admin review.

use zavia_core::curriculum::{module_spec, ModuleNumber};
use zavia_core::status::ReviewDecision;
use zavia_core::submission::{validate_feedback, validate_submission_content};
use zavia_core::types::{DbId, Timestamp};
use zavia_db::models::assignment::{Assignment, AssignmentReview, NewAssignment, ReviewedAssignment};
use zavia_db::Store;

use crate::error::AppResult;

pub async fn submit(
    store: &dyn Store,
    user_id: DbId,
    module_number: i64,
    content: String,
    now: Timestamp,
) -> AppResult<Assignment> {
    let module = ModuleNumber::try_from(module_number)?;
    super::require_user(store, user_id).await?;
    let words = validate_submission_content(&content, module_spec(module))?;

    let assignment = store
        .submit_assignment(&NewAssignment {
            user_id,
            module_number: module,
            content,
            submitted_at: now,
        })
        .await?;

    tracing::info!(
        assignment_id = assignment.id,
        user_id,
        module_number = module.get(),
        words,
        "Assignment submitted"
    );
    Ok(assignment)
}

/// Review a pending assignment.
///
/// The admin check runs before `status` and `feedback` are looked at, so a
/// non-admin is rejected whatever else the request carries.
pub async fn review(
    store: &dyn Store,
    reviewer_id: DbId,
    assignment_id: DbId,
    status: &str,
    feedback: &str,
    now: Timestamp,
) -> AppResult<ReviewedAssignment> {
    super::require_admin(store, reviewer_id).await?;
    let decision: ReviewDecision = status.parse()?;
    let feedback = validate_feedback(feedback)?;

    let reviewed = store
        .record_review(&AssignmentReview {
            assignment_id,
            reviewer_id,
            decision,
            feedback: feedback.to_string(),
            reviewed_at: now,
        })
        .await?;

    tracing::info!(
        assignment_id,
        reviewer_id,
        user_id = reviewed.assignment.user_id,
        module_number = reviewed.assignment.module_number.get(),
        status = %decision,
        "Assignment reviewed"
    );
    if reviewed.course_completed {
        tracing::info!(
            user_id = reviewed.assignment.user_id,
            "Canon completed; user qualified for the Guild"
        );
    }
    Ok(reviewed)
}

pub async fn list_pending(store: &dyn Store, admin_id: DbId) -> AppResult<Vec<Assignment>> {
    super::require_admin(store, admin_id).await?;
    Ok(store.list_pending_assignments().await?)
}

pub async fn list_for_user(store: &dyn Store, user_id: DbId) -> AppResult<Vec<Assignment>> {
    super::require_user(store, user_id).await?;
    Ok(store.list_user_assignments(user_id).await?)
}
