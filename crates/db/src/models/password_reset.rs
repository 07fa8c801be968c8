//! Password reset token model and DTOs.
//!
//! Reset tokens are opaque random strings handed to the user out-of-band;
//! only their SHA-256 hash is stored so a database leak does not expose
//! usable tokens. Tokens are single-use and expire after one hour.

use sqlx::FromRow;
use vfix_core::types::{DbId, Timestamp};

/// A password reset token row from the `password_reset_tokens` table.
#[derive(Debug, Clone, FromRow)]
pub struct PasswordResetToken {
    pub id: DbId,
    pub account_id: DbId,
    pub token_hash: String,
    pub expires_at: Timestamp,
    pub used: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new password reset token.
#[derive(Debug)]
pub struct CreatePasswordResetToken {
    pub account_id: DbId,
    pub token_hash: String,
    pub expires_at: Timestamp,
}
