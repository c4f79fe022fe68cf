use sha2::{Digest, Sha256};

/// Authentication material supplied by the caller of a tool invocation.
///
/// Exactly one mode is in play per call: either a full `Authorization`
/// header value, or a full `Cookie` header value. An empty payload is a
/// caller error and is rejected before any network I/O.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthIdentity {
    /// Verbatim `Authorization` header value, e.g. `Bearer <jwt>`.
    Bearer(String),
    /// Verbatim `Cookie` header value, e.g. `a=1; wiki_session=x`.
    CookieHeader(String),
}

impl AuthIdentity {
    pub fn is_empty(&self) -> bool {
        match self {
            AuthIdentity::Bearer(value) => value.is_empty(),
            AuthIdentity::CookieHeader(value) => value.is_empty(),
        }
    }

    /// The caller-supplied cookie header, if this identity carries one.
    pub fn cookie(&self) -> Option<&str> {
        match self {
            AuthIdentity::CookieHeader(value) => Some(value.as_str()),
            AuthIdentity::Bearer(_) => None,
        }
    }

    /// Derive the token-cache key for this identity at the given origin.
    ///
    /// The variant tag keeps a bearer value and a cookie value with the same
    /// literal text in separate namespaces, and the digest bounds the key
    /// length without leaking raw credentials into cache keys or logs.
    pub fn cache_key(&self, origin: &str) -> String {
        let identifier = match self {
            AuthIdentity::Bearer(value) => format!("bearer::{}", value),
            AuthIdentity::CookieHeader(value) => format!("cookie::{}", value),
        };
        let digest = Sha256::digest(format!("{}::{}", origin, identifier).as_bytes());
        hex::encode(digest)
    }
}
