use thiserror::Error;

/// Why a token could not be obtained.
///
/// `Transport` and `MalformedResponse` are equivalent to callers (the
/// dependent write operation must abort either way) but stay distinct so
/// logs and tests can tell them apart. Credential values never appear in
/// these messages.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("no bearer or cookie credentials were provided")]
    MissingCredentials,

    #[error("token request to {url} failed: {reason}")]
    Transport { url: String, reason: String },

    #[error("token response from {url} carried no csrf token")]
    MalformedResponse { url: String },
}

impl AuthError {
    pub fn transport(url: &str, reason: impl ToString) -> Self {
        AuthError::Transport {
            url: url.to_owned(),
            reason: reason.to_string(),
        }
    }

    pub fn malformed(url: &str) -> Self {
        AuthError::MalformedResponse { url: url.to_owned() }
    }
}
