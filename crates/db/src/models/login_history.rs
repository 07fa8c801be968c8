//! Login history entity model and DTOs.
//!
//! The `login_history` table is an append-only audit trail: one row per
//! authentication attempt, successful or not, with no updates or deletes.

use sqlx::FromRow;
use vfix_core::types::{DbId, Timestamp};

/// A single login attempt record. Immutable once written.
#[derive(Debug, Clone, FromRow)]
pub struct LoginHistoryEntry {
    pub id: DbId,
    /// NULL when the attempted identifier resolved to no account; the
    /// attempted identifier itself is preserved in `email` for audit.
    pub account_id: Option<DbId>,
    pub email: String,
    pub success: bool,
    pub failure_reason: Option<String>,
    pub device_name: Option<String>,
    pub user_agent: Option<String>,
    pub ip_address: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Closed set of reason codes for failed authentication attempts.
///
/// Stored as snake_case text. The distinction between `AccountNotFound` and
/// `AccountInactive` exists only here, for forensics -- the public error for
/// both is the same generic `InvalidCredentials`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureReason {
    AccountLocked,
    AccountNotFound,
    AccountInactive,
    InvalidPassword,
}

impl FailureReason {
    pub const fn as_str(self) -> &'static str {
        match self {
            FailureReason::AccountLocked => "account_locked",
            FailureReason::AccountNotFound => "account_not_found",
            FailureReason::AccountInactive => "account_inactive",
            FailureReason::InvalidPassword => "invalid_password",
        }
    }
}

/// DTO for recording one authentication attempt.
#[derive(Debug)]
pub struct RecordLoginAttempt {
    pub account_id: Option<DbId>,
    /// The email or username as attempted, even when no account matched.
    pub email: String,
    pub success: bool,
    pub failure_reason: Option<FailureReason>,
    pub device_name: Option<String>,
    pub user_agent: Option<String>,
    pub ip_address: Option<String>,
}
