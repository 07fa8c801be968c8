//! Repository for the `password_reset_tokens` table.

use sqlx::PgPool;
use vfix_core::types::DbId;

use crate::models::password_reset::{CreatePasswordResetToken, PasswordResetToken};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, account_id, token_hash, expires_at, used, created_at, updated_at";

/// Provides operations for single-use password reset tokens.
pub struct PasswordResetRepo;

impl PasswordResetRepo {
    /// Insert a new reset token, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreatePasswordResetToken,
    ) -> Result<PasswordResetToken, sqlx::Error> {
        let query = format!(
            "INSERT INTO password_reset_tokens (account_id, token_hash, expires_at)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PasswordResetToken>(&query)
            .bind(input.account_id)
            .bind(&input.token_hash)
            .bind(input.expires_at)
            .fetch_one(pool)
            .await
    }

    /// Find a still-usable token by its SHA-256 hash.
    ///
    /// Only returns tokens that are unused and unexpired.
    pub async fn find_valid_by_token_hash(
        pool: &PgPool,
        token_hash: &str,
    ) -> Result<Option<PasswordResetToken>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM password_reset_tokens
             WHERE token_hash = $1
               AND used = false
               AND expires_at > NOW()"
        );
        sqlx::query_as::<_, PasswordResetToken>(&query)
            .bind(token_hash)
            .fetch_optional(pool)
            .await
    }

    /// Mark a token as used. Returns `true` if the row was updated.
    pub async fn mark_used(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE password_reset_tokens SET used = true WHERE id = $1 AND used = false")
                .bind(id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}
