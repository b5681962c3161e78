//! Repository for the `guild_applications` table.

use sqlx::PgPool;
use zavia_core::types::DbId;

use crate::models::application::{ApplicationReview, GuildApplication, NewApplication};

const COLUMNS: &str = "id, user_id, cohort_id, strategic_doctrine, why_guild, commitment, \
                       status, submitted_at, reviewed_at, reviewed_by, review_notes";

pub struct ApplicationRepo;

impl ApplicationRepo {
    pub async fn create(
        pool: &PgPool,
        input: &NewApplication,
    ) -> Result<GuildApplication, sqlx::Error> {
        let query = format!(
            "INSERT INTO guild_applications
                (user_id, cohort_id, strategic_doctrine, why_guild, commitment, status, submitted_at)
             VALUES ($1, $2, $3, $4, $5, 'pending', $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, GuildApplication>(&query)
            .bind(input.user_id)
            .bind(input.cohort_id)
            .bind(&input.strategic_doctrine)
            .bind(&input.why_guild)
            .bind(&input.commitment)
            .bind(input.submitted_at)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<GuildApplication>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM guild_applications WHERE id = $1");
        sqlx::query_as::<_, GuildApplication>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Pending applications, oldest first.
    pub async fn list_pending(pool: &PgPool) -> Result<Vec<GuildApplication>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM guild_applications
             WHERE status = 'pending'
             ORDER BY submitted_at ASC, id ASC"
        );
        sqlx::query_as::<_, GuildApplication>(&query).fetch_all(pool).await
    }

    /// Resolve a still-pending application.
    ///
    /// Returns `None` if the application is missing or no longer pending.
    pub async fn apply_review(
        pool: &PgPool,
        review: &ApplicationReview,
    ) -> Result<Option<GuildApplication>, sqlx::Error> {
        let query = format!(
            "UPDATE guild_applications
             SET status = $2, review_notes = $3, reviewed_by = $4, reviewed_at = $5
             WHERE id = $1 AND status = 'pending'
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, GuildApplication>(&query)
            .bind(review.application_id)
            .bind(review.decision.as_str())
            .bind(&review.notes)
            .bind(review.reviewer_id)
            .bind(review.reviewed_at)
            .fetch_optional(pool)
            .await
    }
}
