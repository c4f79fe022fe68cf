//! Tool handlers.
//!
//! Each handler turns validated parameters plus the caller's auth context
//! into one remote wiki interaction and renders the outcome as text
//! content. Write handlers obtain a token grant first and abort when
//! authentication is unavailable.

pub mod batch;
pub mod create_page;
pub mod get_file;
pub mod get_page;
pub mod list_pages;
pub mod page_history;
pub mod search_page;
pub mod update_page;

use serde::{Deserialize, Serialize};

use crate::auth::AuthIdentity;

/// Result of one tool invocation: text content blocks plus an error flag.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ToolResult {
    pub content: Vec<String>,
    pub is_error: bool,
}

impl ToolResult {
    pub fn ok(content: Vec<String>) -> Self {
        Self {
            content,
            is_error: false,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            content: vec![message.into()],
            is_error: true,
        }
    }
}

/// Per-invocation context extracted from the inbound request.
#[derive(Debug, Clone, Default)]
pub struct ToolContext {
    pub identity: Option<AuthIdentity>,
}

impl ToolContext {
    pub fn new(identity: Option<AuthIdentity>) -> Self {
        Self { identity }
    }

    /// Cookie header for read requests; bearer callers browse anonymously.
    pub fn cookie(&self) -> Option<&str> {
        self.identity.as_ref().and_then(AuthIdentity::cookie)
    }
}

pub(crate) fn or_na<T: ToString>(value: Option<T>) -> String {
    value
        .map(|inner| inner.to_string())
        .unwrap_or_else(|| "N/A".to_owned())
}
