use std::collections::HashMap;
use std::sync::Arc;

use reqwest::Client;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::auth::{AuthError, AuthIdentity};
use crate::token::cache::{TokenCache, TokenRecord};
use crate::token::fetcher::TokenFetcher;

/// Token and cookie pair handed to a tool handler. The cookie is what the
/// handler must attach as the `Cookie` header of the authenticated request
/// that consumes the token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenGrant {
    pub token: String,
    pub cookie: Option<String>,
}

impl From<TokenRecord> for TokenGrant {
    fn from(record: TokenRecord) -> Self {
        Self {
            token: record.token,
            cookie: record.cookie,
        }
    }
}

/// Facade over the token cache and the session-priming fetcher.
///
/// One instance is constructed at startup and shared by all tool
/// invocations; there is no ambient singleton. Concurrent misses on the
/// same key coalesce onto a single in-flight fetch, so a burst of writes
/// against one origin authenticates once. Fetches run outside the cache
/// lock.
pub struct TokenManager {
    cache: TokenCache,
    fetcher: TokenFetcher,
    flights: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl TokenManager {
    pub fn new(client: Client) -> Self {
        Self {
            cache: TokenCache::new(),
            fetcher: TokenFetcher::new(client),
            flights: Mutex::new(HashMap::new()),
        }
    }

    pub fn cache(&self) -> &TokenCache {
        &self.cache
    }

    /// Obtain a CSRF token and cookie header for the given origin and
    /// caller identity, from cache when fresh, otherwise via the remote
    /// token-request protocol.
    ///
    /// An identity with an empty payload fails before any I/O. A fetch
    /// failure is returned as-is and nothing is cached for the key; it is
    /// the caller's responsibility to abort the write operation that
    /// needed the token.
    pub async fn get_token(
        &self,
        origin: &str,
        identity: &AuthIdentity,
    ) -> Result<TokenGrant, AuthError> {
        if identity.is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        let key = identity.cache_key(origin);
        if let Some(record) = self.cache.get(&key).await {
            debug!("token cache hit for '{}'", origin);
            return Ok(record.into());
        }

        let flight = self.flight(&key).await;
        let _leader = flight.lock().await;

        // A coalesced waiter lands here after the leader finished; the
        // record it wrote is fresh, so take it without another fetch.
        if let Some(record) = self.cache.get(&key).await {
            debug!("token cache hit for '{}' after in-flight fetch", origin);
            return Ok(record.into());
        }

        let fetched = self.fetcher.fetch(origin, identity).await?;

        // Preserve session continuity: when the fetch did not return a
        // cookie, the caller's original one keeps being the session state.
        let cookie = fetched
            .cookie
            .or_else(|| identity.cookie().map(str::to_owned));

        let record = TokenRecord::new(fetched.token, cookie);
        self.cache.put(&key, record.clone()).await;
        info!("fetched new csrf token for '{}'", origin);

        Ok(record.into())
    }

    async fn flight(&self, key: &str) -> Arc<Mutex<()>> {
        let mut flights = self.flights.lock().await;
        flights
            .entry(key.to_owned())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}
