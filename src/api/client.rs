use anyhow::{anyhow, bail, Result};
use reqwest::header;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use crate::utils::constants::USER_AGENT;
use crate::utils::wiki_url::{action_endpoint, rest_endpoint};

/// Thin client over the two remote wiki entry points: the form-encoded
/// Action API (`api.php`) and the REST API (`rest.php/v1/...`).
///
/// Tool handlers attach the cookie header they were granted; the client
/// itself holds no session state.
#[derive(Debug, Clone)]
pub struct WikiClient {
    http: Client,
}

impl WikiClient {
    pub fn new(http: Client) -> Self {
        Self { http }
    }

    /// Form-encoded POST to the Action API.
    pub async fn action_post<T: DeserializeOwned>(
        &self,
        origin: &str,
        params: &[(&str, String)],
        cookie: Option<&str>,
    ) -> Result<T> {
        let url = action_endpoint(origin);
        let mut request = self
            .http
            .post(&url)
            .header(header::USER_AGENT, USER_AGENT)
            .form(params);
        if let Some(cookie) = cookie {
            request = request.header(header::COOKIE, cookie);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            bail!("wiki request to {} failed: {}", url, response.status());
        }
        Ok(response.json::<T>().await?)
    }

    /// GET against the Action API with url query parameters.
    pub async fn action_get<T: DeserializeOwned>(
        &self,
        origin: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let url = action_endpoint(origin);
        let response = self
            .http
            .get(&url)
            .header(header::USER_AGENT, USER_AGENT)
            .query(query)
            .send()
            .await?;
        if !response.status().is_success() {
            bail!("wiki request to {} failed: {}", url, response.status());
        }
        Ok(response.json::<T>().await?)
    }

    /// GET against the REST API. Path segments are percent-encoded, so page
    /// titles can be passed verbatim.
    pub async fn rest_get<T: DeserializeOwned>(
        &self,
        origin: &str,
        segments: &[&str],
        query: &[(&str, String)],
        cookie: Option<&str>,
    ) -> Result<T> {
        let mut url = Url::parse(&rest_endpoint(origin))?;
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| anyhow!("origin '{}' cannot be a base url", origin))?;
            for segment in segments {
                path.push(segment);
            }
        }
        for (name, value) in query {
            url.query_pairs_mut().append_pair(name, value);
        }

        let mut request = self.http.get(url.clone()).header(header::USER_AGENT, USER_AGENT);
        if let Some(cookie) = cookie {
            request = request.header(header::COOKIE, cookie);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            bail!("wiki request to {} failed: {}", url, response.status());
        }
        Ok(response.json::<T>().await?)
    }
}
