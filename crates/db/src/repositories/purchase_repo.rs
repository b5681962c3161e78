//! Repository for the `purchases` ledger.

use sqlx::{PgConnection, PgPool};
use zavia_core::types::{DbId, Timestamp};

use crate::models::purchase::{NewPurchase, Purchase};

const COLUMNS: &str = "id, user_id, product, amount_cents, currency, processor_payment_id, \
                       processor_session_id, status, created_at";

pub struct PurchaseRepo;

impl PurchaseRepo {
    /// Insert a completed purchase unless its processor session is already
    /// recorded (`uq_purchases_session`). Returns `None` for a duplicate.
    pub async fn create_if_new(
        conn: &mut PgConnection,
        input: &NewPurchase,
    ) -> Result<Option<Purchase>, sqlx::Error> {
        let query = format!(
            "INSERT INTO purchases
                (user_id, product, amount_cents, currency, processor_payment_id,
                 processor_session_id, status, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, 'completed', $7)
             ON CONFLICT ON CONSTRAINT uq_purchases_session DO NOTHING
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Purchase>(&query)
            .bind(input.user_id)
            .bind(input.product.as_str())
            .bind(input.amount_cents)
            .bind(&input.currency)
            .bind(&input.processor_payment_id)
            .bind(&input.processor_session_id)
            .bind(input.created_at)
            .fetch_optional(&mut *conn)
            .await
    }

    /// A user's purchases, newest first.
    pub async fn list_for_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Purchase>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM purchases
             WHERE user_id = $1
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Purchase>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Completed revenue per product text, in minor units.
    pub async fn revenue_by_product(pool: &PgPool) -> Result<Vec<(String, i64)>, sqlx::Error> {
        sqlx::query_as::<_, (String, i64)>(
            "SELECT product, COALESCE(SUM(amount_cents), 0)::BIGINT
             FROM purchases
             WHERE status = 'completed'
             GROUP BY product",
        )
        .fetch_all(pool)
        .await
    }

    /// Completed revenue recorded at or after `since`, in minor units.
    pub async fn revenue_since(pool: &PgPool, since: Timestamp) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COALESCE(SUM(amount_cents), 0)::BIGINT
             FROM purchases
             WHERE status = 'completed' AND created_at >= $1",
        )
        .bind(since)
        .fetch_one(pool)
        .await
    }
}
