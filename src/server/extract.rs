use axum::http::{header, HeaderMap};

use crate::auth::AuthIdentity;

/// Passthrough header some clients use to forward a wiki cookie when their
/// own transport reserves the `Cookie` header.
pub const COOKIE_PASSTHROUGH_HEADER: &str = "reqcookie";

/// Build the caller's auth identity from inbound request headers.
///
/// `Authorization` wins over cookies; the `reqcookie` passthrough wins
/// over a plain `Cookie` header. Returns `None` when no usable credential
/// is present, which write tools treat as authentication unavailable.
pub fn identity_from_headers(headers: &HeaderMap) -> Option<AuthIdentity> {
    if let Some(value) = header_str(headers, header::AUTHORIZATION.as_str()) {
        return Some(AuthIdentity::Bearer(value.to_owned()));
    }
    if let Some(value) = header_str(headers, COOKIE_PASSTHROUGH_HEADER) {
        return Some(AuthIdentity::CookieHeader(value.to_owned()));
    }
    if let Some(value) = header_str(headers, header::COOKIE.as_str()) {
        return Some(AuthIdentity::CookieHeader(value.to_owned()));
    }
    None
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
}
