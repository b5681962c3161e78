//! Admin dashboard statistics and fellowship invites.

use chrono::{Datelike, Duration};
use rand::Rng;
use zavia_core::access::INVITE_EXPIRY_DAYS;
use zavia_core::error::CoreError;
use zavia_core::types::{DbId, Timestamp};
use zavia_core::validation::is_valid_email;
use zavia_db::models::fellowship::{FellowshipInvite, NewInvite};
use zavia_db::models::stats::AdminStats;
use zavia_db::Store;

use crate::error::{AppError, AppResult};

/// Length of the random invite token.
const INVITE_TOKEN_LENGTH: usize = 32;

pub async fn stats(store: &dyn Store, admin_id: DbId, now: Timestamp) -> AppResult<AdminStats> {
    super::require_admin(store, admin_id).await?;
    Ok(store.stats(month_start(now)?).await?)
}

pub async fn create_invite(
    store: &dyn Store,
    admin_id: DbId,
    email: &str,
    now: Timestamp,
) -> AppResult<FellowshipInvite> {
    super::require_admin(store, admin_id).await?;
    let email = email.trim();
    if !is_valid_email(email) {
        return Err(CoreError::Validation("Invalid email address".into()).into());
    }

    let invite = store
        .create_invite(&NewInvite {
            email: email.to_string(),
            token: generate_token(),
            invited_by: admin_id,
            created_at: now,
            expires_at: now + Duration::days(INVITE_EXPIRY_DAYS),
        })
        .await?;
    tracing::info!(invite_id = invite.id, admin_id, "Fellowship invite created");
    Ok(invite)
}

fn generate_token() -> String {
    rand::rng()
        .sample_iter(&rand::distr::Alphanumeric)
        .take(INVITE_TOKEN_LENGTH)
        .map(char::from)
        .collect()
}

/// Midnight UTC on the first day of `now`'s month.
fn month_start(now: Timestamp) -> AppResult<Timestamp> {
    now.date_naive()
        .with_day(1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .ok_or_else(|| AppError::InternalError("Failed to compute month start".into()))
}
