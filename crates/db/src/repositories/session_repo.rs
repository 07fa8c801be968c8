//! Repository for the `account_sessions` table.
//!
//! A session has exactly one non-trivial state transition: Active to
//! Inactive (via revoke, revoke-all, or expiry). There is no way back.

use sqlx::PgPool;
use vfix_core::types::DbId;

use crate::models::session::{AccountSession, CreateSession};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, account_id, token_id, device_name, user_agent, ip_address, \
                        is_active, last_used_at, expires_at, created_at, updated_at";

/// Provides CRUD operations for account sessions.
pub struct SessionRepo;

impl SessionRepo {
    /// Insert a new active session, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateSession,
    ) -> Result<AccountSession, sqlx::Error> {
        let query = format!(
            "INSERT INTO account_sessions
                (account_id, token_id, device_name, user_agent, ip_address, expires_at)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AccountSession>(&query)
            .bind(input.account_id)
            .bind(&input.token_id)
            .bind(&input.device_name)
            .bind(&input.user_agent)
            .bind(&input.ip_address)
            .bind(input.expires_at)
            .fetch_one(pool)
            .await
    }

    /// Find a session by its token id (JWT `jti`).
    ///
    /// Only returns sessions that are still active and unexpired; a revoked
    /// session is indistinguishable from a missing one.
    pub async fn find_by_token_id(
        pool: &PgPool,
        token_id: &str,
    ) -> Result<Option<AccountSession>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM account_sessions
             WHERE token_id = $1
               AND is_active = true
               AND expires_at > NOW()"
        );
        sqlx::query_as::<_, AccountSession>(&query)
            .bind(token_id)
            .fetch_optional(pool)
            .await
    }

    /// Update a session's `last_used_at` to now.
    pub async fn touch_last_used(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE account_sessions SET last_used_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Revoke a single session owned by `account_id`.
    ///
    /// Returns `false` when the session does not exist, is not owned by the
    /// given account, or was already revoked -- ownership is checked, not
    /// just existence.
    pub async fn revoke(
        pool: &PgPool,
        session_id: DbId,
        account_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE account_sessions SET is_active = false
             WHERE id = $1 AND account_id = $2 AND is_active = true",
        )
        .bind(session_id)
        .bind(account_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Revoke all active sessions for an account, optionally sparing the one
    /// whose token id matches `except_token_id` (so a user can sign out all
    /// other devices without signing out themselves).
    ///
    /// Returns the count of sessions revoked.
    pub async fn revoke_all_for_account(
        pool: &PgPool,
        account_id: DbId,
        except_token_id: Option<&str>,
    ) -> Result<u64, sqlx::Error> {
        let result = match except_token_id {
            Some(token_id) => {
                sqlx::query(
                    "UPDATE account_sessions SET is_active = false
                     WHERE account_id = $1 AND is_active = true AND token_id <> $2",
                )
                .bind(account_id)
                .bind(token_id)
                .execute(pool)
                .await?
            }
            None => {
                sqlx::query(
                    "UPDATE account_sessions SET is_active = false
                     WHERE account_id = $1 AND is_active = true",
                )
                .bind(account_id)
                .execute(pool)
                .await?
            }
        };
        Ok(result.rows_affected())
    }

    /// List all active, unexpired sessions for an account, most recently
    /// used first.
    pub async fn list_active_for_account(
        pool: &PgPool,
        account_id: DbId,
    ) -> Result<Vec<AccountSession>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM account_sessions
             WHERE account_id = $1
               AND is_active = true
               AND expires_at > NOW()
             ORDER BY last_used_at DESC"
        );
        sqlx::query_as::<_, AccountSession>(&query)
            .bind(account_id)
            .fetch_all(pool)
            .await
    }

    /// Delete expired or revoked sessions. Returns the count of deleted rows.
    pub async fn cleanup_expired(pool: &PgPool) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM account_sessions WHERE expires_at < NOW() OR is_active = false",
        )
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}
