//! Repositories for `fellowship_members` and `fellowship_invites`.

use sqlx::{PgConnection, PgPool};
use zavia_core::types::DbId;

use crate::models::fellowship::{FellowshipInvite, FellowshipMember, NewFellowshipMember, NewInvite};

const MEMBER_COLUMNS: &str = "id, user_id, status, yearly_fee_cents, joined_at, \
                              last_payment_at, next_payment_at";

const INVITE_COLUMNS: &str = "id, email, token, invited_by, status, created_at, expires_at";

pub struct FellowshipMemberRepo;

impl FellowshipMemberRepo {
    pub async fn create(
        conn: &mut PgConnection,
        input: &NewFellowshipMember,
    ) -> Result<FellowshipMember, sqlx::Error> {
        let query = format!(
            "INSERT INTO fellowship_members
                (user_id, status, yearly_fee_cents, joined_at, last_payment_at, next_payment_at)
             VALUES ($1, 'active', $2, $3, $3, $4)
             RETURNING {MEMBER_COLUMNS}"
        );
        sqlx::query_as::<_, FellowshipMember>(&query)
            .bind(input.user_id)
            .bind(input.yearly_fee_cents)
            .bind(input.paid_at)
            .bind(input.next_payment_at)
            .fetch_one(&mut *conn)
            .await
    }

    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<FellowshipMember>, sqlx::Error> {
        let query = format!(
            "SELECT {MEMBER_COLUMNS} FROM fellowship_members
             WHERE user_id = $1
             ORDER BY joined_at ASC, id ASC"
        );
        sqlx::query_as::<_, FellowshipMember>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }
}

pub struct FellowshipInviteRepo;

impl FellowshipInviteRepo {
    pub async fn create(pool: &PgPool, input: &NewInvite) -> Result<FellowshipInvite, sqlx::Error> {
        let query = format!(
            "INSERT INTO fellowship_invites (email, token, invited_by, status, created_at, expires_at)
             VALUES ($1, $2, $3, 'pending', $4, $5)
             RETURNING {INVITE_COLUMNS}"
        );
        sqlx::query_as::<_, FellowshipInvite>(&query)
            .bind(&input.email)
            .bind(&input.token)
            .bind(input.invited_by)
            .bind(input.created_at)
            .bind(input.expires_at)
            .fetch_one(pool)
            .await
    }
}
