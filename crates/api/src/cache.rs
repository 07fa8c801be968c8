//! TTL'd account lookup cache.
//!
//! An explicit, injectable collaborator held in [`crate::state::AppState`],
//! never a process-wide singleton. Entries expire after a fixed TTL and are
//! invalidated eagerly on every mutation that changes what a cached read
//! could observe (password reset, deactivation). The login path itself
//! always reads the account row fresh -- lockout counters must never be
//! served stale.

use std::time::{Duration, Instant};

use dashmap::DashMap;
use vfix_core::types::DbId;
use vfix_db::models::account::Account;

/// Default cache entry lifetime.
const DEFAULT_TTL: Duration = Duration::from_secs(600);

struct CacheEntry {
    account: Account,
    inserted_at: Instant,
}

/// Concurrent account cache keyed by account id.
pub struct AccountCache {
    entries: DashMap<DbId, CacheEntry>,
    ttl: Duration,
}

impl Default for AccountCache {
    fn default() -> Self {
        Self::with_ttl(DEFAULT_TTL)
    }
}

impl AccountCache {
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
        }
    }

    /// Fetch a cached account. Expired entries are removed and miss.
    pub fn get(&self, id: DbId) -> Option<Account> {
        let expired = match self.entries.get(&id) {
            Some(entry) if entry.inserted_at.elapsed() < self.ttl => {
                return Some(entry.account.clone());
            }
            Some(_) => true,
            None => false,
        };
        if expired {
            self.entries.remove(&id);
        }
        None
    }

    /// Insert or refresh a cached account.
    pub fn insert(&self, account: Account) {
        self.entries.insert(
            account.id,
            CacheEntry {
                account,
                inserted_at: Instant::now(),
            },
        );
    }

    /// Drop the entry for an account. Called on every mutation a cached
    /// read could otherwise observe stale.
    pub fn invalidate(&self, id: DbId) {
        self.entries.remove(&id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn account(id: DbId) -> Account {
        let now = Utc::now();
        Account {
            id,
            email: format!("acct{id}@test.com"),
            username: format!("acct{id}"),
            password_hash: None,
            full_name: None,
            role: "user".to_string(),
            enterprise_role: None,
            gdpr_consent: true,
            is_active: true,
            failed_login_count: 0,
            locked_until: None,
            last_login_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_insert_get_invalidate() {
        let cache = AccountCache::default();
        assert!(cache.get(1).is_none());

        cache.insert(account(1));
        assert_eq!(cache.get(1).unwrap().username, "acct1");

        cache.invalidate(1);
        assert!(cache.get(1).is_none());
    }

    #[test]
    fn test_expired_entry_misses() {
        let cache = AccountCache::with_ttl(Duration::from_millis(0));
        cache.insert(account(2));
        assert!(cache.get(2).is_none(), "zero-TTL entry must expire immediately");
    }

    #[test]
    fn test_insert_refreshes_existing_entry() {
        let cache = AccountCache::default();
        cache.insert(account(3));

        let mut updated = account(3);
        updated.username = "renamed".to_string();
        cache.insert(updated);

        assert_eq!(cache.get(3).unwrap().username, "renamed");
    }
}
