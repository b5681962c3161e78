//! Workflow engine.
//!
//! Each function takes the acting user ids as explicit arguments, applies the
//! `zavia_core` rules, and persists through the [`zavia_db::Store`] port.
//! Handlers only decode requests and encode responses.

pub mod access;
pub mod accounts;
pub mod admin;
pub mod assignments;
pub mod guild;
pub mod progression;

use zavia_core::error::CoreError;
use zavia_core::types::DbId;
use zavia_db::models::user::User;
use zavia_db::Store;

use crate::error::AppResult;

/// Load a user or fail with `NotFound`.
pub async fn require_user(store: &dyn Store, user_id: DbId) -> AppResult<User> {
    store.find_user(user_id).await?.ok_or_else(|| {
        CoreError::NotFound {
            entity: "User",
            id: user_id,
        }
        .into()
    })
}

/// Load the acting user and require the admin flag.
///
/// Unknown ids and non-admins get the same generic denial.
pub async fn require_admin(store: &dyn Store, admin_id: DbId) -> AppResult<User> {
    match store.find_user(admin_id).await? {
        Some(user) if user.is_admin => Ok(user),
        _ => {
            tracing::warn!(user_id = admin_id, "Admin action denied");
            Err(CoreError::Forbidden("Admin access required".into()).into())
        }
    }
}
