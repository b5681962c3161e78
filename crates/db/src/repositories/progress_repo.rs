//! Repository for the `module_progress` table.

use sqlx::PgConnection;
use zavia_core::curriculum::ModuleNumber;
use zavia_core::status::SubmissionStatus;
use zavia_core::types::{DbId, Timestamp};

use crate::models::progress::ModuleProgressRow;

const COLUMNS: &str = "module_number, started_at, completed_at, lessons_completed, \
                       assignment_submitted, assignment_status, assignment_feedback";

pub struct ProgressRepo;

impl ProgressRepo {
    /// Insert the five default module rows for a new user.
    pub async fn insert_defaults(conn: &mut PgConnection, user_id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO module_progress (user_id, module_number)
             SELECT $1, n FROM generate_series(1, 5) AS n",
        )
        .bind(user_id)
        .execute(&mut *conn)
        .await?;
        Ok(())
    }

    /// All module rows for a user in module order, optionally locked for
    /// update.
    pub async fn list_for_user(
        conn: &mut PgConnection,
        user_id: DbId,
        for_update: bool,
    ) -> Result<Vec<ModuleProgressRow>, sqlx::Error> {
        let lock = if for_update { " FOR UPDATE" } else { "" };
        let query = format!(
            "SELECT {COLUMNS} FROM module_progress
             WHERE user_id = $1
             ORDER BY module_number{lock}"
        );
        sqlx::query_as::<_, ModuleProgressRow>(&query)
            .bind(user_id)
            .fetch_all(&mut *conn)
            .await
    }

    /// Atomic add-to-set on `lessons_completed`; `started_at` is first write
    /// wins.
    pub async fn add_lesson(
        conn: &mut PgConnection,
        user_id: DbId,
        module: ModuleNumber,
        lesson: i32,
        at: Timestamp,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE module_progress SET
                started_at = COALESCE(started_at, $4),
                lessons_completed = CASE
                    WHEN $3 = ANY(lessons_completed) THEN lessons_completed
                    ELSE array_append(lessons_completed, $3)
                END
             WHERE user_id = $1 AND module_number = $2",
        )
        .bind(user_id)
        .bind(i16::from(module))
        .bind(lesson)
        .bind(at)
        .execute(&mut *conn)
        .await?;
        Ok(())
    }

    pub async fn mark_submitted(
        conn: &mut PgConnection,
        user_id: DbId,
        module: ModuleNumber,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE module_progress
             SET assignment_submitted = true, assignment_status = 'pending'
             WHERE user_id = $1 AND module_number = $2",
        )
        .bind(user_id)
        .bind(i16::from(module))
        .execute(&mut *conn)
        .await?;
        Ok(())
    }

    pub async fn write_review(
        conn: &mut PgConnection,
        user_id: DbId,
        module: ModuleNumber,
        status: SubmissionStatus,
        feedback: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE module_progress
             SET assignment_status = $3, assignment_feedback = $4
             WHERE user_id = $1 AND module_number = $2",
        )
        .bind(user_id)
        .bind(i16::from(module))
        .bind(status.as_str())
        .bind(feedback)
        .execute(&mut *conn)
        .await?;
        Ok(())
    }
}
