//! Repository for the `users` table.

use sqlx::{PgConnection, PgPool};
use zavia_core::types::DbId;

use crate::models::progress::CompletionFlags;
use crate::models::user::{NewUser, User, UserCredentials};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, email, name, canon_access, guild_access, fellowship_access, \
                       guild_cohort_id, is_admin, created_at, updated_at";

pub struct UserRepo;

impl UserRepo {
    /// Insert a new user. Fails with a unique violation on `uq_users_email`.
    pub async fn create(conn: &mut PgConnection, input: &NewUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (email, name, password_hash, is_admin)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.email)
            .bind(&input.name)
            .bind(&input.password_hash)
            .bind(input.is_admin)
            .fetch_one(&mut *conn)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find login credentials by email (case-sensitive).
    pub async fn find_credentials(
        pool: &PgPool,
        email: &str,
    ) -> Result<Option<UserCredentials>, sqlx::Error> {
        sqlx::query_as::<_, UserCredentials>("SELECT id, password_hash FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Read the completion flags, locking the user row until the transaction
    /// ends. Returns `None` if the user does not exist.
    pub async fn lock_completion(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<CompletionFlags>, sqlx::Error> {
        sqlx::query_as::<_, CompletionFlags>(
            "SELECT canon_completed, qualified_for_guild FROM users WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
    }

    pub async fn load_completion(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<CompletionFlags>, sqlx::Error> {
        sqlx::query_as::<_, CompletionFlags>(
            "SELECT canon_completed, qualified_for_guild FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Persist the completion flags. Flags are only ever raised.
    pub async fn raise_completion(
        conn: &mut PgConnection,
        id: DbId,
        flags: CompletionFlags,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE users SET
                canon_completed = canon_completed OR $2,
                qualified_for_guild = qualified_for_guild OR $3,
                updated_at = NOW()
             WHERE id = $1",
        )
        .bind(id)
        .bind(flags.canon_completed)
        .bind(flags.qualified_for_guild)
        .execute(&mut *conn)
        .await?;
        Ok(())
    }

    /// Returns `true` if the row exists.
    pub async fn grant_canon(conn: &mut PgConnection, id: DbId) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE users SET canon_access = true, updated_at = NOW() WHERE id = $1")
                .bind(id)
                .execute(&mut *conn)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Returns `true` if the row exists.
    pub async fn grant_fellowship(conn: &mut PgConnection, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE users SET fellowship_access = true, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .execute(&mut *conn)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Grant guild access and point the user at `cohort_id`.
    ///
    /// Returns `true` if the row exists.
    pub async fn grant_guild(
        conn: &mut PgConnection,
        id: DbId,
        cohort_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE users SET guild_access = true, guild_cohort_id = $2, updated_at = NOW()
             WHERE id = $1",
        )
        .bind(id)
        .bind(cohort_id)
        .execute(&mut *conn)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
