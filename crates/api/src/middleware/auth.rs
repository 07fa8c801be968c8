//! Bearer-token authentication extractor for Axum handlers.
//!
//! This is the single place where "who is calling" gets resolved: token
//! signature and expiry, then the session registry (a revoked session fails
//! authentication even while the token itself is still cryptographically
//! valid), then the account row via the TTL'd cache. The session's
//! `last_used_at` is touched on every successful resolution.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use vfix_core::error::CoreError;
use vfix_core::role::{effective_role, EffectiveRole, EnterpriseRole, Role};
use vfix_db::models::account::Account;
use vfix_db::repositories::{AccountRepo, SessionRepo};

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated account extracted from a JWT Bearer token in the
/// `Authorization` header.
///
/// Use this as an extractor parameter in any handler that requires
/// authentication:
///
/// ```ignore
/// async fn my_handler(auth: AuthAccount) -> AppResult<Json<()>> {
///     tracing::info!(account_id = auth.account.id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthAccount {
    /// The authenticated account row.
    pub account: Account,
    /// The presented token's `jti` -- identifies the current session.
    pub token_id: String,
    /// Role resolved once per request from the account's role pair.
    pub effective_role: EffectiveRole,
}

/// Pull the raw bearer token out of the `Authorization` header.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AppError> {
    let auth_header = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthenticated(
                "Missing Authorization header".into(),
            ))
        })?;

    auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        AppError::Core(CoreError::Unauthenticated(
            "Invalid Authorization format. Expected: Bearer <token>".into(),
        ))
    })
}

impl FromRequestParts<AppState> for AuthAccount {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)?;

        let claims = validate_token(token, &state.config.jwt).map_err(|_| {
            AppError::Core(CoreError::Unauthenticated("Invalid or expired token".into()))
        })?;

        // The token is cryptographically valid; now the session registry
        // decides whether it is still permitted.
        let session = SessionRepo::find_by_token_id(&state.pool, &claims.jti)
            .await?
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthenticated(
                    "Session expired or revoked".into(),
                ))
            })?;

        SessionRepo::touch_last_used(&state.pool, session.id).await?;

        let account = match state.account_cache.get(claims.sub) {
            Some(account) => account,
            None => {
                let account = AccountRepo::find_by_id(&state.pool, claims.sub)
                    .await?
                    .ok_or_else(|| {
                        AppError::Core(CoreError::Unauthenticated("Not authenticated".into()))
                    })?;
                state.account_cache.insert(account.clone());
                account
            }
        };

        if !account.is_active {
            return Err(AppError::Core(CoreError::Unauthenticated(
                "Not authenticated".into(),
            )));
        }

        let effective = resolve_effective_role(&account)?;

        Ok(AuthAccount {
            account,
            token_id: claims.jti,
            effective_role: effective,
        })
    }
}

/// Extractor that additionally requires the platform `admin` role.
///
/// Wraps [`AuthAccount`]; any authenticated caller whose effective role does
/// not reach `Admin` in the precedence table is rejected with 403.
#[derive(Debug, Clone)]
pub struct RequireAdmin(pub AuthAccount);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth = AuthAccount::from_request_parts(parts, state).await?;
        if !auth.effective_role.satisfies(EffectiveRole::Admin) {
            return Err(AppError::Core(CoreError::Forbidden(
                "Admin access required".into(),
            )));
        }
        Ok(RequireAdmin(auth))
    }
}

/// Parse the account's stored role strings into a single [`EffectiveRole`].
///
/// An unparseable role means corrupt data, not a caller mistake: it surfaces
/// as an internal error, never a fallback role.
fn resolve_effective_role(account: &Account) -> Result<EffectiveRole, AppError> {
    let role: Role = account
        .role
        .parse()
        .map_err(|e| AppError::Core(CoreError::Internal(format!("{e}"))))?;

    let enterprise: Option<EnterpriseRole> = account
        .enterprise_role
        .as_deref()
        .map(str::parse)
        .transpose()
        .map_err(|e| AppError::Core(CoreError::Internal(format!("{e}"))))?;

    Ok(effective_role(role, enterprise))
}
