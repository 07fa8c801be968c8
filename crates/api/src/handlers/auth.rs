//! Handlers for the `/auth` resource: register, login, guest login, logout,
//! and password reset.
//!
//! The login flow is the heart of the lockout policy. Every exit path writes
//! a login history entry; the history write is best-effort and never fails
//! the call itself. The public failure for a missing account, an inactive
//! account, and an absent password hash is the same generic
//! `INVALID_CREDENTIALS` -- only the recorded history reason differs.

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use vfix_core::error::CoreError;
use vfix_db::models::account::{Account, AccountResponse, CreateAccount};
use vfix_db::models::login_history::{FailureReason, RecordLoginAttempt};
use vfix_db::models::password_reset::CreatePasswordResetToken;
use vfix_db::models::session::CreateSession;
use vfix_db::repositories::{
    AccountRepo, LoginHistoryRepo, PasswordResetRepo, ProductRepo, SessionRepo,
};

use crate::auth::device::{device_info, DeviceInfo};
use crate::auth::jwt::{generate_access_token, generate_reset_token, hash_reset_token};
use crate::auth::password::{hash_password, validate_password_strength, verify_password};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::bearer_token;
use crate::state::AppState;

/// Maximum consecutive failed login attempts before locking the account.
const MAX_FAILED_ATTEMPTS: i32 = 5;

/// Duration in minutes to lock an account after exceeding failed attempts.
const LOCK_DURATION_MINS: i64 = 30;

/// Password reset token lifetime in minutes.
const RESET_TOKEN_EXPIRY_MINS: i64 = 60;

/// Synthetic email domain for guest accounts created from a barcode scan.
const GUEST_EMAIL_DOMAIN: &str = "vfix.local";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/register`.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub username: String,
    pub password: String,
    pub full_name: Option<String>,
    #[serde(default)]
    pub gdpr_consent: bool,
}

/// Request body for `POST /auth/login`. The identifier may be an email
/// address or a username.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub identifier: String,
    pub password: String,
}

/// Request body for `POST /auth/guest`.
#[derive(Debug, Deserialize)]
pub struct GuestLoginRequest {
    pub barcode: String,
}

/// Request body for `POST /auth/password-reset`.
#[derive(Debug, Deserialize)]
pub struct PasswordResetRequest {
    pub email: String,
}

/// Request body for `POST /auth/password-reset/confirm`.
#[derive(Debug, Deserialize)]
pub struct PasswordResetConfirm {
    pub token: String,
    pub new_password: String,
}

/// Response for `POST /auth/register`.
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub account: AccountResponse,
    pub access_token: String,
    pub token_type: &'static str,
}

/// Token response returned by login and guest login.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: &'static str,
    pub role: String,
    pub enterprise_role: Option<String>,
}

/// Generic `{ "message": ... }` response.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/register
///
/// Create a new account with role `user` and sign it in immediately.
pub async fn register(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(input): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<RegisterResponse>)> {
    let email = input.email.trim().to_lowercase();
    let username = input.username.trim().to_string();

    if email.is_empty() || !email.contains('@') {
        return Err(AppError::Core(CoreError::Validation(
            "A valid email address is required".into(),
        )));
    }
    if username.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Username must not be empty".into(),
        )));
    }
    // Duplicate check comes before the remaining validation: an existing
    // identity is always reported as a conflict, whatever else is wrong
    // with the request.
    if AccountRepo::exists_by_email_or_username(&state.pool, &email, &username).await? {
        return Err(AppError::Core(CoreError::Conflict(
            "An account with this email or username already exists".into(),
        )));
    }

    if !input.gdpr_consent {
        return Err(AppError::Core(CoreError::Validation(
            "GDPR consent is required to create an account".into(),
        )));
    }
    validate_password_strength(&input.password)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let account = AccountRepo::create(
        &state.pool,
        &CreateAccount {
            email,
            username,
            password_hash: Some(password_hash),
            full_name: input.full_name,
            role: "user".to_string(),
            gdpr_consent: true,
        },
    )
    .await?;

    let device = device_info(&headers);
    let access_token = issue_token_and_session(&state, &account, &device).await?;

    state.account_cache.insert(account.clone());
    tracing::info!(account_id = account.id, "Account registered");

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            account: AccountResponse::from(&account),
            access_token,
            token_type: "bearer",
        }),
    ))
}

/// POST /api/v1/auth/login
///
/// Authenticate with email-or-username + password. Enforces the lockout
/// policy and records every attempt in the login history.
pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<TokenResponse>> {
    let identifier = input.identifier.trim();
    let device = device_info(&headers);

    // Always a fresh read -- lockout counters must never come from the cache.
    let account = match AccountRepo::find_by_identifier(&state.pool, identifier).await? {
        Some(account) => account,
        None => {
            record_history(
                &state,
                failed_attempt(None, identifier, FailureReason::AccountNotFound, &device),
            )
            .await;
            return Err(AppError::Core(CoreError::InvalidCredentials));
        }
    };

    let now = Utc::now();
    if let Some(minutes) = account.lockout_remaining_minutes(now) {
        record_history(
            &state,
            failed_attempt(
                Some(&account),
                identifier,
                FailureReason::AccountLocked,
                &device,
            ),
        )
        .await;
        return Err(AppError::Core(CoreError::AccountLocked { minutes }));
    }
    let mut failed_count = account.failed_login_count;
    if account.locked_until.is_some() {
        // Lockout deadline has passed; reset the bookkeeping before the
        // password check so this attempt starts from a clean slate.
        AccountRepo::clear_lockout(&state.pool, account.id).await?;
        failed_count = 0;
    }

    if !account.is_active {
        record_history(
            &state,
            failed_attempt(
                Some(&account),
                identifier,
                FailureReason::AccountInactive,
                &device,
            ),
        )
        .await;
        return Err(AppError::Core(CoreError::InvalidCredentials));
    }

    // Guest and externally-authenticated accounts have no password hash and
    // can never pass a password login. No counter increment: there is no
    // credential to brute-force.
    let Some(password_hash) = account.password_hash.as_deref() else {
        record_history(
            &state,
            failed_attempt(
                Some(&account),
                identifier,
                FailureReason::InvalidPassword,
                &device,
            ),
        )
        .await;
        return Err(AppError::Core(CoreError::InvalidCredentials));
    };

    let password_valid = verify_password(&input.password, password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        let lock_until = if failed_count + 1 >= MAX_FAILED_ATTEMPTS {
            Some(now + chrono::Duration::minutes(LOCK_DURATION_MINS))
        } else {
            None
        };
        AccountRepo::record_failed_attempt(&state.pool, account.id, lock_until).await?;
        if lock_until.is_some() {
            tracing::warn!(account_id = account.id, "Account locked after repeated failures");
        }

        record_history(
            &state,
            failed_attempt(
                Some(&account),
                identifier,
                FailureReason::InvalidPassword,
                &device,
            ),
        )
        .await;
        return Err(AppError::Core(CoreError::InvalidCredentials));
    }

    AccountRepo::record_successful_login(&state.pool, account.id).await?;

    let access_token = issue_token_and_session(&state, &account, &device).await?;

    record_history(
        &state,
        RecordLoginAttempt {
            account_id: Some(account.id),
            email: account.email.clone(),
            success: true,
            failure_reason: None,
            device_name: device.device_name.clone(),
            user_agent: device.user_agent.clone(),
            ip_address: device.ip_address.clone(),
        },
    )
    .await;

    tracing::info!(account_id = account.id, "Login successful");

    Ok(Json(TokenResponse {
        access_token,
        token_type: "bearer",
        role: account.role,
        enterprise_role: account.enterprise_role,
    }))
}

/// POST /api/v1/auth/guest
///
/// Sign in as a guest tied to a scanned product barcode. The guest account
/// is found or created deterministically from the barcode, carries no
/// password, and is exempt from lockout and history recording.
pub async fn guest_login(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(input): Json<GuestLoginRequest>,
) -> AppResult<Json<TokenResponse>> {
    let barcode = input.barcode.trim();
    if barcode.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Barcode must not be empty".into(),
        )));
    }

    ProductRepo::find_by_barcode(&state.pool, barcode)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFoundMsg(format!(
                "No product found for barcode {barcode}"
            )))
        })?;

    let guest_email = format!("guest_{barcode}@{GUEST_EMAIL_DOMAIN}");
    let account = match AccountRepo::find_by_email(&state.pool, &guest_email).await? {
        Some(account) => account,
        None => {
            let account = AccountRepo::create(
                &state.pool,
                &CreateAccount {
                    email: guest_email,
                    username: format!("guest_{barcode}"),
                    password_hash: None,
                    full_name: None,
                    role: "guest".to_string(),
                    gdpr_consent: false,
                },
            )
            .await?;
            tracing::info!(account_id = account.id, "Guest account created");
            account
        }
    };

    let device = device_info(&headers);
    let access_token = issue_token_and_session(&state, &account, &device).await?;

    Ok(Json(TokenResponse {
        access_token,
        token_type: "bearer",
        role: account.role,
        enterprise_role: None,
    }))
}

/// POST /api/v1/auth/logout
///
/// Revoke the session behind the presented token. Idempotent: logging out
/// twice, or with a token whose session was already revoked, is still 200.
/// A missing or cryptographically invalid token is 401.
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> AppResult<Json<MessageResponse>> {
    let token = bearer_token(&headers)?;
    let claims = crate::auth::jwt::validate_token(token, &state.config.jwt).map_err(|_| {
        AppError::Core(CoreError::Unauthenticated("Invalid or expired token".into()))
    })?;

    if let Some(session) = SessionRepo::find_by_token_id(&state.pool, &claims.jti).await? {
        SessionRepo::revoke(&state.pool, session.id, claims.sub).await?;
        tracing::info!(account_id = claims.sub, "Logged out");
    }

    Ok(Json(MessageResponse {
        message: "Logged out successfully".to_string(),
    }))
}

/// POST /api/v1/auth/password-reset
///
/// Request a password reset. Always returns the same 200 response whether
/// or not the email belongs to an account, so this endpoint cannot be used
/// to enumerate registered addresses. Token delivery (mail) is outside this
/// service; only the token's SHA-256 digest is stored.
pub async fn password_reset_request(
    State(state): State<AppState>,
    Json(input): Json<PasswordResetRequest>,
) -> AppResult<Json<MessageResponse>> {
    let email = input.email.trim().to_lowercase();

    if let Some(account) = AccountRepo::find_by_email(&state.pool, &email).await? {
        if account.is_active && account.password_hash.is_some() {
            let (_plaintext, token_hash) = generate_reset_token();
            let expires_at = Utc::now() + chrono::Duration::minutes(RESET_TOKEN_EXPIRY_MINS);

            PasswordResetRepo::create(
                &state.pool,
                &CreatePasswordResetToken {
                    account_id: account.id,
                    token_hash,
                    expires_at,
                },
            )
            .await?;

            tracing::info!(account_id = account.id, "Password reset token issued");
        }
    }

    Ok(Json(MessageResponse {
        message: "If the email is registered, a password reset link has been sent".to_string(),
    }))
}

/// POST /api/v1/auth/password-reset/confirm
///
/// Redeem a reset token: set the new password, burn the token, drop the
/// cached account, and revoke every session for the account.
pub async fn password_reset_confirm(
    State(state): State<AppState>,
    Json(input): Json<PasswordResetConfirm>,
) -> AppResult<Json<MessageResponse>> {
    let token_hash = hash_reset_token(input.token.trim());

    let reset = PasswordResetRepo::find_valid_by_token_hash(&state.pool, &token_hash)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Validation(
                "Invalid or expired reset token".into(),
            ))
        })?;

    validate_password_strength(&input.new_password)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let password_hash = hash_password(&input.new_password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    AccountRepo::update_password(&state.pool, reset.account_id, &password_hash).await?;
    PasswordResetRepo::mark_used(&state.pool, reset.id).await?;

    state.account_cache.invalidate(reset.account_id);

    let revoked = SessionRepo::revoke_all_for_account(&state.pool, reset.account_id, None).await?;
    tracing::info!(
        account_id = reset.account_id,
        revoked,
        "Password reset completed, sessions revoked"
    );

    Ok(Json(MessageResponse {
        message: "Password has been reset. Please sign in again.".to_string(),
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Generate an access token and persist the matching session row keyed by
/// the token's `jti`.
async fn issue_token_and_session(
    state: &AppState,
    account: &Account,
    device: &DeviceInfo,
) -> AppResult<String> {
    let (access_token, jti) = generate_access_token(account.id, &account.role, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    let expires_at = Utc::now() + chrono::Duration::days(state.config.jwt.session_expiry_days);

    SessionRepo::create(
        &state.pool,
        &CreateSession {
            account_id: account.id,
            token_id: jti,
            device_name: device.device_name.clone(),
            user_agent: device.user_agent.clone(),
            ip_address: device.ip_address.clone(),
            expires_at,
        },
    )
    .await?;

    Ok(access_token)
}

/// Build a failed-attempt history record. The `email` column records the
/// identifier as attempted, even when no account matched.
fn failed_attempt(
    account: Option<&Account>,
    identifier: &str,
    reason: FailureReason,
    device: &DeviceInfo,
) -> RecordLoginAttempt {
    RecordLoginAttempt {
        account_id: account.map(|a| a.id),
        email: identifier.to_string(),
        success: false,
        failure_reason: Some(reason),
        device_name: device.device_name.clone(),
        user_agent: device.user_agent.clone(),
        ip_address: device.ip_address.clone(),
    }
}

/// Append a login history entry, best-effort. The audit trail must never
/// turn a login attempt into a 500.
async fn record_history(state: &AppState, attempt: RecordLoginAttempt) {
    if let Err(e) = LoginHistoryRepo::record(&state.pool, &attempt).await {
        tracing::warn!(error = %e, "Failed to record login history entry");
    }
}
