//! Account entity model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use vfix_core::types::{DbId, Timestamp};

/// Full account row from the `accounts` table.
///
/// Contains the password hash -- NEVER serialize this to API responses
/// directly. Use [`AccountResponse`] for external-facing output.
///
/// `password_hash` is NULL for guest accounts and externally-authenticated
/// accounts; such accounts can never pass a password check.
#[derive(Debug, Clone, FromRow)]
pub struct Account {
    pub id: DbId,
    pub email: String,
    pub username: String,
    pub password_hash: Option<String>,
    pub full_name: Option<String>,
    pub role: String,
    pub enterprise_role: Option<String>,
    pub gdpr_consent: bool,
    pub is_active: bool,
    pub failed_login_count: i32,
    pub locked_until: Option<Timestamp>,
    pub last_login_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Account {
    /// Minutes until an active lockout expires, rounded up.
    ///
    /// Returns `None` when the account is not locked or the lockout has
    /// already passed.
    pub fn lockout_remaining_minutes(&self, now: Timestamp) -> Option<i64> {
        let until = self.locked_until?;
        if until <= now {
            return None;
        }
        let secs = (until - now).num_seconds();
        Some((secs + 59) / 60)
    }
}

/// Safe account representation for API responses (no password hash).
#[derive(Debug, Clone, Serialize)]
pub struct AccountResponse {
    pub id: DbId,
    pub email: String,
    pub username: String,
    pub full_name: Option<String>,
    pub role: String,
    pub enterprise_role: Option<String>,
    pub is_active: bool,
    pub last_login_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

impl From<&Account> for AccountResponse {
    fn from(account: &Account) -> Self {
        AccountResponse {
            id: account.id,
            email: account.email.clone(),
            username: account.username.clone(),
            full_name: account.full_name.clone(),
            role: account.role.clone(),
            enterprise_role: account.enterprise_role.clone(),
            is_active: account.is_active,
            last_login_at: account.last_login_at,
            created_at: account.created_at,
        }
    }
}

/// DTO for creating a new account.
#[derive(Debug)]
pub struct CreateAccount {
    pub email: String,
    pub username: String,
    pub password_hash: Option<String>,
    pub full_name: Option<String>,
    pub role: String,
    pub gdpr_consent: bool,
}
