//! Repository for `guild_cohorts` and `cohort_enrollments`.

use sqlx::{PgConnection, PgPool};
use zavia_core::types::{DbId, Timestamp};

use crate::models::cohort::{Cohort, NewCohort};

/// Column list over alias `c`, including the enrolled user ids.
const COLUMNS: &str = "c.id, c.name, c.start_date, c.end_date, c.max_students, c.status, \
                       c.price_cents, c.created_at, \
                       ARRAY(SELECT e.user_id FROM cohort_enrollments e \
                             WHERE e.cohort_id = c.id \
                             ORDER BY e.enrolled_at, e.user_id) AS enrolled_user_ids";

pub struct CohortRepo;

impl CohortRepo {
    pub async fn create(pool: &PgPool, input: &NewCohort) -> Result<Cohort, sqlx::Error> {
        let query = format!(
            "INSERT INTO guild_cohorts AS c
                (name, start_date, end_date, max_students, status, price_cents, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Cohort>(&query)
            .bind(&input.name)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(input.max_students)
            .bind(input.status.as_str())
            .bind(input.price_cents)
            .bind(input.created_at)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Cohort>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM guild_cohorts c WHERE c.id = $1");
        sqlx::query_as::<_, Cohort>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Read a cohort and lock its row until the transaction ends.
    pub async fn lock(conn: &mut PgConnection, id: DbId) -> Result<Option<Cohort>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM guild_cohorts c WHERE c.id = $1 FOR UPDATE OF c");
        sqlx::query_as::<_, Cohort>(&query)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
    }

    /// Upcoming and active cohorts, soonest first.
    pub async fn list_open(pool: &PgPool) -> Result<Vec<Cohort>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM guild_cohorts c
             WHERE c.status IN ('upcoming', 'active')
             ORDER BY c.start_date ASC, c.id ASC"
        );
        sqlx::query_as::<_, Cohort>(&query).fetch_all(pool).await
    }

    pub async fn enroll(
        conn: &mut PgConnection,
        cohort_id: DbId,
        user_id: DbId,
        at: Timestamp,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO cohort_enrollments (cohort_id, user_id, enrolled_at)
             VALUES ($1, $2, $3)
             ON CONFLICT (cohort_id, user_id) DO NOTHING",
        )
        .bind(cohort_id)
        .bind(user_id)
        .bind(at)
        .execute(&mut *conn)
        .await?;
        Ok(())
    }
}
