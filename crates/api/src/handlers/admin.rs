//! Admin-only maintenance handlers.

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;
use vfix_core::error::CoreError;
use vfix_core::types::DbId;
use vfix_db::repositories::{AccountRepo, SessionRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::auth::MessageResponse;
use crate::middleware::auth::RequireAdmin;
use crate::state::AppState;

/// Response for `POST /admin/sessions/cleanup`.
#[derive(Debug, Serialize)]
pub struct CleanupResponse {
    pub message: String,
    pub deleted_count: u64,
}

/// POST /api/v1/admin/sessions/cleanup
///
/// Delete expired and revoked session rows. Expiry is otherwise passive
/// (checked at read time), so the table grows until an admin runs this.
pub async fn cleanup_sessions(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
) -> AppResult<Json<CleanupResponse>> {
    let deleted_count = SessionRepo::cleanup_expired(&state.pool).await?;

    tracing::info!(
        admin_id = admin.account.id,
        deleted_count,
        "Expired sessions cleaned up"
    );

    Ok(Json(CleanupResponse {
        message: "Expired sessions deleted".to_string(),
        deleted_count,
    }))
}

/// POST /api/v1/admin/accounts/{id}/deactivate
///
/// Soft-deactivate an account and revoke all of its sessions. Accounts are
/// never physically deleted.
pub async fn deactivate_account(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(account_id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    let deactivated = AccountRepo::deactivate(&state.pool, account_id).await?;
    if !deactivated {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "account",
            id: account_id,
        }));
    }

    state.account_cache.invalidate(account_id);
    let revoked = SessionRepo::revoke_all_for_account(&state.pool, account_id, None).await?;

    tracing::info!(
        admin_id = admin.account.id,
        account_id,
        revoked,
        "Account deactivated"
    );

    Ok(Json(MessageResponse {
        message: "Account deactivated".to_string(),
    }))
}
