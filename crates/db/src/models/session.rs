//! Account session model and DTOs.
//!
//! One row per issued access token, keyed by the token's `jti` claim. The
//! row enables revocation independent of the token's own cryptographic
//! expiry: a session is valid only while `is_active` and unexpired.

use sqlx::FromRow;
use vfix_core::types::{DbId, Timestamp};

/// An account session row from the `account_sessions` table.
#[derive(Debug, Clone, FromRow)]
pub struct AccountSession {
    pub id: DbId,
    pub account_id: DbId,
    /// JWT `jti` claim of the token this session tracks (unique).
    pub token_id: String,
    /// Human-readable device descriptor, e.g. "Chrome on Windows".
    pub device_name: Option<String>,
    pub user_agent: Option<String>,
    pub ip_address: Option<String>,
    pub is_active: bool,
    pub last_used_at: Timestamp,
    pub expires_at: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new session.
pub struct CreateSession {
    pub account_id: DbId,
    pub token_id: String,
    pub device_name: Option<String>,
    pub user_agent: Option<String>,
    pub ip_address: Option<String>,
    pub expires_at: Timestamp,
}
