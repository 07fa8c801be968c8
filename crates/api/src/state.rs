use std::sync::Arc;

use crate::cache::AccountCache;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: vfix_db::DbPool,
    /// Server configuration (JWT secret, expiries, CORS).
    pub config: Arc<ServerConfig>,
    /// TTL'd account lookup cache used by the auth extractor.
    pub account_cache: Arc<AccountCache>,
}
