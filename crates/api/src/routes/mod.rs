pub mod admin;
pub mod auth;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                       register (public)
/// /auth/login                          login (public)
/// /auth/guest                          guest login by barcode (public)
/// /auth/logout                         logout (requires a valid token)
/// /auth/password-reset                 request reset (public)
/// /auth/password-reset/confirm         redeem reset token (public)
/// /auth/sessions                       list sessions (requires auth)
/// /auth/sessions/{id}                  revoke one session (DELETE)
/// /auth/sessions/revoke-all            revoke all other sessions (POST)
/// /auth/login-history                  recent attempts (requires auth)
///
/// /admin/sessions/cleanup              delete expired sessions (admin only)
/// /admin/accounts/{id}/deactivate      soft-deactivate an account (admin only)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/admin", admin::router())
}
