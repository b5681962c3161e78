//! User entity model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use zavia_core::access::AccessFlags;
use zavia_core::types::{DbId, Timestamp};

/// User row from the `users` table, without credentials.
///
/// Canon progress lives in `module_progress` and is loaded separately.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: DbId,
    pub email: String,
    pub name: String,
    pub canon_access: bool,
    pub guild_access: bool,
    pub fellowship_access: bool,
    pub guild_cohort_id: Option<DbId>,
    pub is_admin: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl User {
    pub fn access(&self) -> AccessFlags {
        AccessFlags {
            canon_access: self.canon_access,
            guild_access: self.guild_access,
            fellowship_access: self.fellowship_access,
        }
    }
}

/// Login lookup result. NEVER serialize this.
#[derive(Debug, Clone, FromRow)]
pub struct UserCredentials {
    pub id: DbId,
    pub password_hash: String,
}

/// DTO for creating a new user. All flags start false.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub is_admin: bool,
}
