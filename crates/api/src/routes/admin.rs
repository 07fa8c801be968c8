//! Route definitions for admin-only maintenance endpoints.

use axum::routing::post;
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Routes mounted at `/admin`. Every handler requires the `admin` role.
///
/// ```text
/// POST /sessions/cleanup            -> cleanup_sessions
/// POST /accounts/{id}/deactivate    -> deactivate_account
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/sessions/cleanup", post(admin::cleanup_sessions))
        .route("/accounts/{id}/deactivate", post(admin::deactivate_account))
}
