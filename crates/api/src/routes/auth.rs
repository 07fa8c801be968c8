//! Route definitions for the `/auth` resource.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::{auth, sessions};
use crate::state::AppState;

/// Routes mounted at `/auth`.
///
/// ```text
/// POST   /register                -> register
/// POST   /login                   -> login
/// POST   /guest                   -> guest_login
/// POST   /logout                  -> logout
/// POST   /password-reset          -> password_reset_request
/// POST   /password-reset/confirm  -> password_reset_confirm
/// GET    /sessions                -> list_sessions (requires auth)
/// DELETE /sessions/{id}           -> revoke_session (requires auth)
/// POST   /sessions/revoke-all     -> revoke_all_sessions (requires auth)
/// GET    /login-history           -> login_history (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/guest", post(auth::guest_login))
        .route("/logout", post(auth::logout))
        .route("/password-reset", post(auth::password_reset_request))
        .route("/password-reset/confirm", post(auth::password_reset_confirm))
        .route("/sessions", get(sessions::list_sessions))
        .route("/sessions/{id}", delete(sessions::revoke_session))
        .route("/sessions/revoke-all", post(sessions::revoke_all_sessions))
        .route("/login-history", get(sessions::login_history))
}
