//! Shared constants and invariants

/// Product identifier sent as User-Agent on every outbound wiki request.
pub const USER_AGENT: &str = concat!("mediawiki-agent/", env!("CARGO_PKG_VERSION"));

/// Absolute validity window for a cached token record.
pub const TOKEN_TTL_SECS: i64 = 20 * 60;

pub const DEFAULT_HTTP_TIMEOUT_MS: u64 = 5000;

// Wiki entry points, relative to the origin
pub const ACTION_SCRIPT: &str = "api.php";
pub const REST_SCRIPT: &str = "rest.php";
