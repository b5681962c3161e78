//! Aggregate counts for the admin dashboard.

use sqlx::{FromRow, PgPool};

#[derive(Debug, Clone, Copy, FromRow)]
pub struct UserCounts {
    pub total_users: i64,
    pub canon_users: i64,
    pub guild_users: i64,
    pub fellowship_users: i64,
}

pub struct StatsRepo;

impl StatsRepo {
    pub async fn user_counts(pool: &PgPool) -> Result<UserCounts, sqlx::Error> {
        sqlx::query_as::<_, UserCounts>(
            "SELECT
                COUNT(*) AS total_users,
                COUNT(*) FILTER (WHERE canon_access) AS canon_users,
                COUNT(*) FILTER (WHERE guild_access) AS guild_users,
                COUNT(*) FILTER (WHERE fellowship_access) AS fellowship_users
             FROM users",
        )
        .fetch_one(pool)
        .await
    }

    pub async fn pending_assignments(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM assignments WHERE status = 'pending'")
            .fetch_one(pool)
            .await
    }

    pub async fn pending_applications(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM guild_applications WHERE status = 'pending'",
        )
        .fetch_one(pool)
        .await
    }
}
