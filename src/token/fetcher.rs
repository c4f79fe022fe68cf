use reqwest::header;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::auth::{AuthError, AuthIdentity, CookieJar};
use crate::utils::constants::USER_AGENT;
use crate::utils::wiki_url::action_endpoint;

/// Body sent on every token request.
const TOKEN_QUERY: [(&str, &str); 3] = [
    ("action", "query"),
    ("meta", "tokens"),
    ("format", "json"),
];

/// Outcome of one remote token fetch. The token is always non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedToken {
    pub token: String,
    pub cookie: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TokenQueryResponse {
    query: Option<TokenQueryBody>,
}

#[derive(Debug, Deserialize)]
struct TokenQueryBody {
    tokens: Option<TokenSet>,
}

#[derive(Debug, Deserialize)]
struct TokenSet {
    csrftoken: Option<String>,
}

impl TokenQueryResponse {
    fn csrftoken(self) -> Option<String> {
        self.query?
            .tokens?
            .csrftoken
            .filter(|token| !token.is_empty())
    }
}

/// Executes the remote token-request protocol against `<origin>api.php`.
///
/// The bearer path is a single request with no cookie handling. The cookie
/// path may need two: when the first response rotates a session cookie, the
/// token it returned is not yet bound to that session, so the request is
/// repeated with the merged cookie state and the second token wins.
#[derive(Debug, Clone)]
pub struct TokenFetcher {
    client: Client,
}

impl TokenFetcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub async fn fetch(
        &self,
        origin: &str,
        identity: &AuthIdentity,
    ) -> Result<FetchedToken, AuthError> {
        match identity {
            AuthIdentity::Bearer(bearer) => self.fetch_with_bearer(origin, bearer).await,
            AuthIdentity::CookieHeader(cookie) => self.fetch_with_cookies(origin, cookie).await,
        }
    }

    async fn fetch_with_bearer(
        &self,
        origin: &str,
        bearer: &str,
    ) -> Result<FetchedToken, AuthError> {
        let url = action_endpoint(origin);
        let response = self
            .client
            .post(&url)
            .header(header::USER_AGENT, USER_AGENT)
            .header(header::AUTHORIZATION, bearer)
            .form(&TOKEN_QUERY)
            .send()
            .await
            .map_err(|err| {
                warn!("token request to '{}' failed: {}", url, err);
                AuthError::transport(&url, err)
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!("token request to '{}' returned status {}", url, status);
            return Err(AuthError::transport(&url, format!("status {}", status)));
        }

        let body: TokenQueryResponse = response.json().await.map_err(|err| {
            warn!("token response from '{}' was not valid json: {}", url, err);
            AuthError::malformed(&url)
        })?;

        let token = body.csrftoken().ok_or_else(|| {
            warn!("token response from '{}' carried no csrf token", url);
            AuthError::malformed(&url)
        })?;

        Ok(FetchedToken {
            token,
            cookie: None,
        })
    }

    async fn fetch_with_cookies(
        &self,
        origin: &str,
        cookie: &str,
    ) -> Result<FetchedToken, AuthError> {
        let url = action_endpoint(origin);
        let mut jar = CookieJar::parse(cookie);

        let (set_cookies, first_body) = self.token_request(&url, jar.header_value()).await?;
        jar.merge(&set_cookies);
        let mut token = first_body.csrftoken();

        // A rotated session cookie invalidates the first token: repeat the
        // request with the merged cookie state and take the second token.
        if CookieJar::names_session(&set_cookies) {
            debug!("session cookie observed from '{}', priming second request", url);
            let (second_cookies, second_body) =
                self.token_request(&url, jar.header_value()).await?;
            jar.merge(&second_cookies);
            token = second_body.csrftoken();
        }

        let token = token.ok_or_else(|| {
            warn!("token response from '{}' carried no csrf token", url);
            AuthError::malformed(&url)
        })?;

        let cookie = jar
            .header()
            .or_else(|| (!cookie.is_empty()).then(|| cookie.to_owned()));

        Ok(FetchedToken { token, cookie })
    }

    async fn token_request(
        &self,
        url: &str,
        cookie_header: String,
    ) -> Result<(Vec<String>, TokenQueryResponse), AuthError> {
        let response = self
            .client
            .post(url)
            .header(header::USER_AGENT, USER_AGENT)
            .header(header::COOKIE, cookie_header)
            .form(&TOKEN_QUERY)
            .send()
            .await
            .map_err(|err| {
                warn!("token request to '{}' failed: {}", url, err);
                AuthError::transport(url, err)
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!("token request to '{}' returned status {}", url, status);
            return Err(AuthError::transport(url, format!("status {}", status)));
        }

        let set_cookies = response
            .headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .map(str::to_owned)
            .collect();

        let body = response.json().await.map_err(|err| {
            warn!("token response from '{}' was not valid json: {}", url, err);
            AuthError::malformed(url)
        })?;

        Ok((set_cookies, body))
    }
}
