use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;

use crate::utils::constants::TOKEN_TTL_SECS;

/// One cached token grant for an (origin, identity) pair.
///
/// Records are immutable once stored and replaced wholesale on refresh;
/// readers never observe a partially updated record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenRecord {
    pub token: String,
    pub cookie: Option<String>,
    /// UNIX seconds at which the token was fetched.
    pub fetched_at: i64,
}

impl TokenRecord {
    pub fn new(token: String, cookie: Option<String>) -> Self {
        Self {
            token,
            cookie,
            fetched_at: Utc::now().timestamp(),
        }
    }

    pub fn is_fresh(&self, now: i64) -> bool {
        now - self.fetched_at < TOKEN_TTL_SECS
    }
}

/// In-memory token cache: cache key -> token record.
///
/// Staleness is checked lazily on read; there is no eviction loop, so a
/// stale entry stays resident until a fresh fetch overwrites it. The key
/// space is one entry per (origin, identity) pair actually used, which
/// keeps unbounded growth acceptable for a process-lifetime cache.
#[derive(Debug, Clone, Default)]
pub struct TokenCache {
    inner: Arc<RwLock<HashMap<String, TokenRecord>>>,
}

impl TokenCache {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Insert or replace the record for a key.
    pub async fn put(&self, key: &str, record: TokenRecord) {
        let mut map = self.inner.write().await;
        map.insert(key.to_owned(), record);
    }

    /// Get the record for a key if it exists and is still within its TTL.
    pub async fn get(&self, key: &str) -> Option<TokenRecord> {
        let map = self.inner.read().await;
        map.get(key)
            .cloned()
            .filter(|record| record.is_fresh(Utc::now().timestamp()))
    }
}
