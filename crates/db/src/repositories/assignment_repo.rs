//! Repository for the `assignments` table.

use sqlx::{PgConnection, PgPool};
use zavia_core::types::DbId;

use crate::models::assignment::{Assignment, AssignmentReview, NewAssignment};

const COLUMNS: &str = "id, user_id, module_number, content, status, submitted_at, \
                       reviewed_at, reviewed_by, feedback";

pub struct AssignmentRepo;

impl AssignmentRepo {
    pub async fn create(
        conn: &mut PgConnection,
        input: &NewAssignment,
    ) -> Result<Assignment, sqlx::Error> {
        let query = format!(
            "INSERT INTO assignments (user_id, module_number, content, status, submitted_at)
             VALUES ($1, $2, $3, 'pending', $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Assignment>(&query)
            .bind(input.user_id)
            .bind(i16::from(input.module_number))
            .bind(&input.content)
            .bind(input.submitted_at)
            .fetch_one(&mut *conn)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Assignment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM assignments WHERE id = $1");
        sqlx::query_as::<_, Assignment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Read an assignment and lock its row until the transaction ends.
    pub async fn lock(conn: &mut PgConnection, id: DbId) -> Result<Option<Assignment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM assignments WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, Assignment>(&query)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
    }

    /// Apply a review to a still-pending assignment.
    ///
    /// Returns `None` if the assignment is missing or no longer pending.
    pub async fn apply_review(
        conn: &mut PgConnection,
        review: &AssignmentReview,
    ) -> Result<Option<Assignment>, sqlx::Error> {
        let query = format!(
            "UPDATE assignments
             SET status = $2, feedback = $3, reviewed_by = $4, reviewed_at = $5
             WHERE id = $1 AND status = 'pending'
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Assignment>(&query)
            .bind(review.assignment_id)
            .bind(review.decision.as_str())
            .bind(&review.feedback)
            .bind(review.reviewer_id)
            .bind(review.reviewed_at)
            .fetch_optional(&mut *conn)
            .await
    }

    /// Pending assignments, oldest first.
    pub async fn list_pending(pool: &PgPool) -> Result<Vec<Assignment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM assignments
             WHERE status = 'pending'
             ORDER BY submitted_at ASC, id ASC"
        );
        sqlx::query_as::<_, Assignment>(&query).fetch_all(pool).await
    }

    /// A user's assignments, newest first.
    pub async fn list_for_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Assignment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM assignments
             WHERE user_id = $1
             ORDER BY submitted_at DESC, id DESC"
        );
        sqlx::query_as::<_, Assignment>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }
}
