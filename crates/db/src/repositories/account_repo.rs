//! Repository for the `accounts` table.

use sqlx::PgPool;
use vfix_core::types::{DbId, Timestamp};

use crate::models::account::{Account, CreateAccount};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, email, username, password_hash, full_name, role, enterprise_role, \
                        gdpr_consent, is_active, failed_login_count, locked_until, \
                        last_login_at, created_at, updated_at";

/// Provides CRUD and lockout-bookkeeping operations for accounts.
///
/// "Not found" is always `Ok(None)`; callers decide the error kind.
pub struct AccountRepo;

impl AccountRepo {
    /// Insert a new account, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateAccount) -> Result<Account, sqlx::Error> {
        let query = format!(
            "INSERT INTO accounts (email, username, password_hash, full_name, role, gdpr_consent)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Account>(&query)
            .bind(&input.email)
            .bind(&input.username)
            .bind(&input.password_hash)
            .bind(&input.full_name)
            .bind(&input.role)
            .bind(input.gdpr_consent)
            .fetch_one(pool)
            .await
    }

    /// Find an account by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Account>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM accounts WHERE id = $1");
        sqlx::query_as::<_, Account>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an account by email (exact match).
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Account>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM accounts WHERE email = $1");
        sqlx::query_as::<_, Account>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Find an account by username (exact match).
    pub async fn find_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<Account>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM accounts WHERE username = $1");
        sqlx::query_as::<_, Account>(&query)
            .bind(username)
            .fetch_optional(pool)
            .await
    }

    /// Resolve a login identifier: email first, then username. Exact match
    /// only, no fuzzy matching.
    pub async fn find_by_identifier(
        pool: &PgPool,
        identifier: &str,
    ) -> Result<Option<Account>, sqlx::Error> {
        if let Some(account) = Self::find_by_email(pool, identifier).await? {
            return Ok(Some(account));
        }
        Self::find_by_username(pool, identifier).await
    }

    /// Whether an account with the given email or username already exists.
    pub async fn exists_by_email_or_username(
        pool: &PgPool,
        email: &str,
        username: &str,
    ) -> Result<bool, sqlx::Error> {
        let (exists,): (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM accounts WHERE email = $1 OR username = $2)",
        )
        .bind(email)
        .bind(username)
        .fetch_one(pool)
        .await?;
        Ok(exists)
    }

    /// Record one failed login attempt: increment the counter and, when the
    /// caller has determined the lockout threshold is reached, set the
    /// lockout deadline in the same statement.
    pub async fn record_failed_attempt(
        pool: &PgPool,
        id: DbId,
        lock_until: Option<Timestamp>,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE accounts SET
                failed_login_count = failed_login_count + 1,
                locked_until = COALESCE($2, locked_until)
             WHERE id = $1",
        )
        .bind(id)
        .bind(lock_until)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Record a successful login: reset `failed_login_count` to 0, clear
    /// `locked_until`, and set `last_login_at` to now.
    pub async fn record_successful_login(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE accounts SET
                failed_login_count = 0,
                locked_until = NULL,
                last_login_at = NOW()
             WHERE id = $1",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Clear an expired lockout: reset the counter and the deadline without
    /// touching `last_login_at`.
    pub async fn clear_lockout(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE accounts SET failed_login_count = 0, locked_until = NULL WHERE id = $1",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Update an account's password hash. Returns `true` if the row was updated.
    pub async fn update_password(
        pool: &PgPool,
        id: DbId,
        password_hash: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE accounts SET password_hash = $2 WHERE id = $1")
            .bind(id)
            .bind(password_hash)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Soft-deactivate an account by setting `is_active = false`.
    ///
    /// Accounts are never physically deleted by this subsystem.
    pub async fn deactivate(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE accounts SET is_active = false WHERE id = $1 AND is_active = true")
                .bind(id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}
