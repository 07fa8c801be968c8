//! JWT access-token generation/validation and password-reset-token helpers.
//!
//! Access tokens are HS256-signed JWTs containing a [`Claims`] payload. Each
//! token carries a unique `jti`; the session registry keys off that id, so
//! revocation is a registry concern -- [`validate_token`] deliberately checks
//! only the signature and expiry, never the registry.
//!
//! Password reset tokens are opaque random strings; only their SHA-256 hash
//! is stored server-side so a database leak does not expose usable tokens.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;
use vfix_core::types::DbId;

/// JWT claims embedded in every access token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject -- the account's internal database id.
    pub sub: DbId,
    /// The account's base role name (e.g. `"user"`, `"guest"`, `"admin"`).
    pub role: String,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Unique token identifier (UUID v4); joins the token to its session row.
    pub jti: String,
}

/// Configuration for JWT token generation and session lifetimes.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret used to sign and verify tokens.
    pub secret: String,
    /// Access token lifetime in minutes (default: 30).
    pub access_token_expiry_mins: i64,
    /// Session registry row lifetime in days (default: 30).
    ///
    /// Deliberately much longer than the token's own expiry: the registry
    /// exists for revocation, while the token's `exp` gates access.
    pub session_expiry_days: i64,
}

/// Default access token expiry in minutes.
const DEFAULT_ACCESS_EXPIRY_MINS: i64 = 30;
/// Default session expiry in days.
const DEFAULT_SESSION_EXPIRY_DAYS: i64 = 30;

impl JwtConfig {
    /// Load JWT configuration from environment variables.
    ///
    /// | Env Var                   | Required | Default |
    /// |---------------------------|----------|---------|
    /// | `JWT_SECRET`              | **yes**  | --      |
    /// | `JWT_ACCESS_EXPIRY_MINS`  | no       | `30`    |
    /// | `SESSION_EXPIRY_DAYS`     | no       | `30`    |
    ///
    /// # Panics
    ///
    /// Panics if `JWT_SECRET` is not set or is empty.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "JWT_SECRET must not be empty");

        let access_token_expiry_mins: i64 = std::env::var("JWT_ACCESS_EXPIRY_MINS")
            .unwrap_or_else(|_| DEFAULT_ACCESS_EXPIRY_MINS.to_string())
            .parse()
            .expect("JWT_ACCESS_EXPIRY_MINS must be a valid i64");

        let session_expiry_days: i64 = std::env::var("SESSION_EXPIRY_DAYS")
            .unwrap_or_else(|_| DEFAULT_SESSION_EXPIRY_DAYS.to_string())
            .parse()
            .expect("SESSION_EXPIRY_DAYS must be a valid i64");

        Self {
            secret,
            access_token_expiry_mins,
            session_expiry_days,
        }
    }
}

/// Generate an HS256 access token for the given account.
///
/// Returns the encoded token together with its `jti`, which the caller
/// registers as the new session's token id.
pub fn generate_access_token(
    account_id: DbId,
    role: &str,
    config: &JwtConfig,
) -> Result<(String, String), jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();
    let exp = now + config.access_token_expiry_mins * 60;
    let jti = Uuid::new_v4().to_string();

    let claims = Claims {
        sub: account_id,
        role: role.to_string(),
        exp,
        iat: now,
        jti: jti.clone(),
    };

    let token = encode(
        &Header::default(), // HS256
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )?;
    Ok((token, jti))
}

/// Validate and decode an access token, returning the embedded [`Claims`].
///
/// Validates the signature and expiration automatically. Whether the
/// session behind the token is still permitted is the caller's job.
pub fn validate_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(), // HS256, validates exp
    )?;
    Ok(token_data.claims)
}

/// Generate a cryptographically random password reset token.
///
/// Returns a tuple of `(plaintext_token, sha256_hex_hash)`. The plaintext is
/// delivered to the user out-of-band; only the hash is persisted.
pub fn generate_reset_token() -> (String, String) {
    let plaintext = Uuid::new_v4().to_string();
    let hash = hash_reset_token(&plaintext);
    (plaintext, hash)
}

/// Compute the SHA-256 hex digest of a reset token.
///
/// Use this to compare an incoming reset token against the stored hash.
pub fn hash_reset_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}
