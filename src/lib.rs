//! # MediaWiki Agent Library
//!
//! Provides wiki page-management tools over HTTP, backed by a cache of
//! CSRF edit tokens and session cookies so that authenticated write
//! operations do not re-authenticate against the remote wiki on every call.
//!
//! Modules:
//! - `config` — service configuration
//! - `auth` — caller identity, cookie jar, error taxonomy
//! - `token` — token cache, session-priming fetcher, manager facade
//! - `api` — remote wiki API client (Action API + REST)
//! - `tools` — page read/write/search/list tool handlers
//! - `server` — axum transport exposing the tools

pub mod api;
pub mod auth;
pub mod config;
pub mod server;
pub mod tests;
pub mod token;
pub mod tools;
pub mod utils;

pub use crate::auth::identity::AuthIdentity;
pub use crate::config::settings::ServiceConfig;
pub use crate::token::manager::TokenManager;
