//! Handlers for session management and login history, all operating on the
//! authenticated account. A client-supplied account id is never trusted.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use vfix_core::error::CoreError;
use vfix_core::types::{DbId, Timestamp};
use vfix_db::models::session::AccountSession;
use vfix_db::repositories::{LoginHistoryRepo, SessionRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::auth::MessageResponse;
use crate::middleware::auth::AuthAccount;
use crate::state::AppState;

/// Default number of login history entries returned.
const DEFAULT_HISTORY_LIMIT: i64 = 20;
/// Upper bound on the login history page size.
const MAX_HISTORY_LIMIT: i64 = 100;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// One session in the `GET /auth/sessions` listing.
#[derive(Debug, Serialize)]
pub struct SessionInfo {
    pub id: DbId,
    pub device_name: Option<String>,
    pub user_agent: Option<String>,
    pub ip_address: Option<String>,
    /// Whether this row backs the token used for the current request.
    pub is_current: bool,
    pub last_used_at: Timestamp,
    pub expires_at: Timestamp,
    pub created_at: Timestamp,
}

/// Response for `GET /auth/sessions`.
#[derive(Debug, Serialize)]
pub struct SessionsListResponse {
    pub sessions: Vec<SessionInfo>,
    pub total: usize,
}

/// Response for `POST /auth/sessions/revoke-all`.
#[derive(Debug, Serialize)]
pub struct RevokeAllResponse {
    pub message: String,
    pub revoked_count: u64,
}

/// One entry in the `GET /auth/login-history` listing.
#[derive(Debug, Serialize)]
pub struct LoginHistoryInfo {
    pub id: DbId,
    pub success: bool,
    pub failure_reason: Option<String>,
    pub device_name: Option<String>,
    pub ip_address: Option<String>,
    pub created_at: Timestamp,
}

/// Response for `GET /auth/login-history`.
#[derive(Debug, Serialize)]
pub struct LoginHistoryResponse {
    pub history: Vec<LoginHistoryInfo>,
    pub total: usize,
    pub successful_count: usize,
    pub failed_count: usize,
}

/// Query parameters for `GET /auth/login-history`.
#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<i64>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/auth/sessions
///
/// List the caller's active sessions, most recently used first, with the
/// current session marked.
pub async fn list_sessions(
    State(state): State<AppState>,
    auth: AuthAccount,
) -> AppResult<Json<SessionsListResponse>> {
    let sessions = SessionRepo::list_active_for_account(&state.pool, auth.account.id).await?;

    let sessions: Vec<SessionInfo> = sessions
        .iter()
        .map(|s| session_info(s, &auth.token_id))
        .collect();
    let total = sessions.len();

    Ok(Json(SessionsListResponse { sessions, total }))
}

/// DELETE /api/v1/auth/sessions/{id}
///
/// Revoke one of the caller's sessions. A session that does not exist, is
/// not owned by the caller, or was already revoked is a 404 -- ownership
/// failures are indistinguishable from missing rows.
pub async fn revoke_session(
    State(state): State<AppState>,
    auth: AuthAccount,
    Path(session_id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    let revoked = SessionRepo::revoke(&state.pool, session_id, auth.account.id).await?;
    if !revoked {
        return Err(AppError::Core(CoreError::NotFoundMsg(
            "Session not found".into(),
        )));
    }

    tracing::info!(account_id = auth.account.id, session_id, "Session revoked");

    Ok(Json(MessageResponse {
        message: "Session revoked".to_string(),
    }))
}

/// POST /api/v1/auth/sessions/revoke-all
///
/// Revoke every session for the caller except the one behind the current
/// request, so "sign out other devices" does not sign the caller out.
pub async fn revoke_all_sessions(
    State(state): State<AppState>,
    auth: AuthAccount,
) -> AppResult<Json<RevokeAllResponse>> {
    let revoked_count =
        SessionRepo::revoke_all_for_account(&state.pool, auth.account.id, Some(&auth.token_id))
            .await?;

    tracing::info!(
        account_id = auth.account.id,
        revoked_count,
        "Revoked all other sessions"
    );

    Ok(Json(RevokeAllResponse {
        message: "All other sessions revoked".to_string(),
        revoked_count,
    }))
}

/// GET /api/v1/auth/login-history?limit=N
///
/// Most recent authentication attempts against the caller's account, newest
/// first. `limit` is clamped to 1..=100 and defaults to 20.
pub async fn login_history(
    State(state): State<AppState>,
    auth: AuthAccount,
    Query(query): Query<HistoryQuery>,
) -> AppResult<Json<LoginHistoryResponse>> {
    let limit = query
        .limit
        .unwrap_or(DEFAULT_HISTORY_LIMIT)
        .clamp(1, MAX_HISTORY_LIMIT);

    let entries = LoginHistoryRepo::list_for_account(&state.pool, auth.account.id, limit).await?;

    let history: Vec<LoginHistoryInfo> = entries
        .iter()
        .map(|e| LoginHistoryInfo {
            id: e.id,
            success: e.success,
            failure_reason: e.failure_reason.clone(),
            device_name: e.device_name.clone(),
            ip_address: e.ip_address.clone(),
            created_at: e.created_at,
        })
        .collect();

    let successful_count = history.iter().filter(|e| e.success).count();
    let failed_count = history.len() - successful_count;

    Ok(Json(LoginHistoryResponse {
        total: history.len(),
        successful_count,
        failed_count,
        history,
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn session_info(session: &AccountSession, current_token_id: &str) -> SessionInfo {
    SessionInfo {
        id: session.id,
        device_name: session.device_name.clone(),
        user_agent: session.user_agent.clone(),
        ip_address: session.ip_address.clone(),
        is_current: session.token_id == current_token_id,
        last_used_at: session.last_used_at,
        expires_at: session.expires_at,
        created_at: session.created_at,
    }
}
