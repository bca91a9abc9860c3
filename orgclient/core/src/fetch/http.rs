//! reqwest JSON Fetcher
//!
//! GETs a URL with a shared `reqwest::Client`, rejects non-success
//! statuses and decodes the body as JSON. There are no retries.

use std::fmt;

use async_trait::async_trait;
use serde_json::Value;

use super::traits::{FetchError, JsonFetcher};
use crate::config::ClientConfig;

/// HTTP JSON fetcher backed by `reqwest`
#[derive(Clone)]
pub struct HttpJsonFetcher {
    /// HTTP client
    http_client: reqwest::Client,
    /// Bearer token sent with every request
    token: Option<String>,
}

impl HttpJsonFetcher {
    /// Create a fetcher using the timeout, user agent and token from `config`
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::ClientBuild`] if the HTTP client cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self, FetchError> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(FetchError::ClientBuild)?;

        Ok(Self::from_client(http_client, config.token.clone()))
    }

    /// Wrap an existing client
    #[must_use]
    pub fn from_client(http_client: reqwest::Client, token: Option<String>) -> Self {
        Self { http_client, token }
    }

    /// Whether requests carry a bearer token
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

impl fmt::Debug for HttpJsonFetcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpJsonFetcher")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl JsonFetcher for HttpJsonFetcher {
    fn name(&self) -> &'static str {
        "reqwest"
    }

    async fn get_json(&self, url: &str) -> Result<Value, FetchError> {
        tracing::debug!(url, "Fetching JSON");

        let mut request = self
            .http_client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json");
        if let Some(ref token) = self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|source| FetchError::Request {
            url: url.to_string(),
            source,
        })?;

        // Check for HTTP errors
        let status = response.status();
        if !status.is_success() {
            tracing::warn!(url, status = status.as_u16(), "Non-success response");
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|source| FetchError::Decode {
                url: url.to_string(),
                source,
            })
    }
}

/// GET `url` once with a default-configured [`HttpJsonFetcher`]
///
/// # Errors
///
/// Any [`FetchError`] from building the client or performing the request.
pub async fn get_json(url: &str) -> Result<Value, FetchError> {
    HttpJsonFetcher::new(&ClientConfig::default())?
        .get_json(url)
        .await
}
