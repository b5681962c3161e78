//! Signup, login, and profile lookup.

use serde::Serialize;
use zavia_core::curriculum::MODULE_COUNT;
use zavia_core::error::CoreError;
use zavia_core::status::SubmissionStatus;
use zavia_core::types::DbId;
use zavia_core::validation::{check_password, is_valid_email};
use zavia_db::models::user::{NewUser, User};
use zavia_db::Store;

use crate::auth::password::{hash_password, verify_password};
use crate::config::ServerConfig;
use crate::error::{AppError, AppResult};

const INVALID_CREDENTIALS: &str = "Invalid email or password";

pub struct Signup {
    pub email: String,
    pub name: String,
    pub password: String,
}

/// Public profile: the user row plus a progress summary.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(flatten)]
    pub user: User,
    pub modules_passed: usize,
    pub total_modules: usize,
    pub canon_completed: bool,
    pub qualified_for_guild: bool,
}

pub async fn signup(store: &dyn Store, config: &ServerConfig, input: Signup) -> AppResult<User> {
    let email = input.email.trim().to_string();
    if !is_valid_email(&email) {
        return Err(CoreError::Validation("Invalid email address".into()).into());
    }
    let name = input.name.trim().to_string();
    if name.is_empty() {
        return Err(CoreError::Validation("Name is required".into()).into());
    }
    let strength = check_password(&input.password);
    if !strength.valid {
        return Err(CoreError::Validation(strength.errors.join(". ")).into());
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let is_admin = config.is_admin_email(&email);
    let user = store
        .create_user(&NewUser {
            email,
            name,
            password_hash,
            is_admin,
        })
        .await?;

    tracing::info!(user_id = user.id, is_admin, "User signed up");
    Ok(user)
}

/// Verify credentials. Every mismatch gets the same 401.
pub async fn login(store: &dyn Store, email: &str, password: &str) -> AppResult<User> {
    let credentials = store
        .find_credentials(email.trim())
        .await?
        .ok_or_else(|| CoreError::Unauthorized(INVALID_CREDENTIALS.into()))?;

    let valid = verify_password(password, &credentials.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !valid {
        tracing::debug!(user_id = credentials.id, "Login rejected");
        return Err(CoreError::Unauthorized(INVALID_CREDENTIALS.into()).into());
    }

    let user = super::require_user(store, credentials.id).await?;
    tracing::info!(user_id = user.id, "User logged in");
    Ok(user)
}

pub async fn profile(store: &dyn Store, user_id: DbId) -> AppResult<UserProfile> {
    let user = super::require_user(store, user_id).await?;
    let progress = store.load_progress(user_id).await?.unwrap_or_default();

    Ok(UserProfile {
        user,
        modules_passed: progress
            .modules
            .iter()
            .filter(|m| m.assignment_status == SubmissionStatus::Pass)
            .count(),
        total_modules: MODULE_COUNT,
        canon_completed: progress.completed,
        qualified_for_guild: progress.qualified_for_guild,
    })
}
