//! Repository for the `login_history` table.
//!
//! Append-only: this repository offers insert and read operations and
//! nothing else. No update or delete ever touches a written entry.

use sqlx::PgPool;
use vfix_core::types::DbId;

use crate::models::login_history::{LoginHistoryEntry, RecordLoginAttempt};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, account_id, email, success, failure_reason, \
                        device_name, user_agent, ip_address, created_at, updated_at";

/// Provides append and query operations for the login audit trail.
pub struct LoginHistoryRepo;

impl LoginHistoryRepo {
    /// Append one attempt record, returning the created row.
    pub async fn record(
        pool: &PgPool,
        input: &RecordLoginAttempt,
    ) -> Result<LoginHistoryEntry, sqlx::Error> {
        let query = format!(
            "INSERT INTO login_history
                (account_id, email, success, failure_reason, device_name, user_agent, ip_address)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, LoginHistoryEntry>(&query)
            .bind(input.account_id)
            .bind(&input.email)
            .bind(input.success)
            .bind(input.failure_reason.map(|r| r.as_str()))
            .bind(&input.device_name)
            .bind(&input.user_agent)
            .bind(&input.ip_address)
            .fetch_one(pool)
            .await
    }

    /// List recent attempts for an account, newest first.
    pub async fn list_for_account(
        pool: &PgPool,
        account_id: DbId,
        limit: i64,
    ) -> Result<Vec<LoginHistoryEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM login_history
             WHERE account_id = $1
             ORDER BY created_at DESC, id DESC
             LIMIT $2"
        );
        sqlx::query_as::<_, LoginHistoryEntry>(&query)
            .bind(account_id)
            .bind(limit)
            .fetch_all(pool)
            .await
    }
}
