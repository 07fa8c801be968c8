use crate::types::DbId;

/// Domain-level error taxonomy.
///
/// Every fallible business operation reports one of these variants; callers
/// check the discriminant rather than matching on exception types across
/// module boundaries. [`CoreError::InvalidCredentials`] carries a fixed
/// generic message so a failed login never reveals whether the account
/// exists.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// Not-found without a numeric id (unknown barcode, unowned session).
    #[error("Not found: {0}")]
    NotFoundMsg(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// Deliberately generic: covers unknown account, inactive account,
    /// missing password hash, and wrong password alike.
    #[error("Invalid email/username or password")]
    InvalidCredentials,

    /// Distinct from `InvalidCredentials` -- the account's existence is
    /// already implied by the prior failed attempts, so the message may
    /// disclose the lockout state.
    #[error("Account temporarily locked due to too many failed login attempts. Try again in {minutes} minute(s).")]
    AccountLocked { minutes: i64 },

    #[error("Unauthenticated: {0}")]
    Unauthenticated(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
