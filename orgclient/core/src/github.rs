//! GitHub Organization Client
//!
//! Reads an organization's metadata and its public repositories through a
//! [`JsonFetcher`]. The organization document and the repository listing are
//! each fetched at most once per client; later calls reuse the cached JSON.
//!
//! # Usage
//!
//! ```ignore
//! use orgclient_core::{GithubOrgClient, MockJsonFetcher};
//!
//! let client = GithubOrgClient::new("google", fetcher);
//! let apache = client.public_repos(Some("apache-2.0")).await?;
//! ```

use serde_json::Value;
use thiserror::Error;

use crate::access::{access_nested_map, access_nested_str, AccessError};
use crate::config::ClientConfig;
use crate::fetch::{FetchError, JsonFetcher};
use crate::memo::AsyncMemoized;

/// Organization URL template; `{org}` is replaced by the organization name
pub const ORG_URL: &str = "https://api.github.com/orgs/{org}";

/// Errors returned by [`GithubOrgClient`]
#[derive(Debug, Error)]
pub enum ClientError {
    /// Fetching a document failed
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// A required field is missing from a fetched document
    #[error("Unexpected response: {0}")]
    Access(#[from] AccessError),

    /// A fetched document has the wrong top-level type
    #[error("Expected {expected} in {document}")]
    UnexpectedShape {
        /// Which document was malformed
        document: &'static str,
        /// What was expected instead
        expected: &'static str,
    },
}

/// Client for a single GitHub organization
#[derive(Debug)]
pub struct GithubOrgClient<F> {
    /// Organization login
    org_name: String,
    /// Resolved organization URL
    org_url: String,
    /// Transport
    fetcher: F,
    /// Organization document
    org: AsyncMemoized<Value>,
    /// Public repository listing
    repos_payload: AsyncMemoized<Value>,
}

impl<F: JsonFetcher> GithubOrgClient<F> {
    /// Create a client for `org_name` against the public GitHub API
    pub fn new(org_name: impl Into<String>, fetcher: F) -> Self {
        let org_name = org_name.into();
        let org_url = ORG_URL.replace("{org}", &org_name);
        Self::with_org_url(org_name, org_url, fetcher)
    }

    /// Create a client using the API base URL from `config`
    pub fn with_config(org_name: impl Into<String>, fetcher: F, config: &ClientConfig) -> Self {
        let org_name = org_name.into();
        let org_url = format!(
            "{}/orgs/{}",
            config.api_base_url.trim_end_matches('/'),
            org_name
        );
        Self::with_org_url(org_name, org_url, fetcher)
    }

    fn with_org_url(org_name: String, org_url: String, fetcher: F) -> Self {
        Self {
            org_name,
            org_url,
            fetcher,
            org: AsyncMemoized::new(),
            repos_payload: AsyncMemoized::new(),
        }
    }

    /// Organization login
    #[must_use]
    pub fn org_name(&self) -> &str {
        &self.org_name
    }

    /// URL of the organization document
    #[must_use]
    pub fn org_url(&self) -> &str {
        &self.org_url
    }

    /// The underlying fetcher
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Organization document, fetched on first call
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Fetch`] if the fetch fails. A failed fetch is
    /// not cached; the next call tries again.
    pub async fn org(&self) -> Result<&Value, ClientError> {
        self.org
            .get_or_try_init(|| async move {
                tracing::debug!(org = %self.org_name, url = %self.org_url, "Fetching organization");
                Ok::<_, ClientError>(self.fetcher.get_json(&self.org_url).await?)
            })
            .await
    }

    /// The `repos_url` field of the organization document
    ///
    /// # Errors
    ///
    /// Fails if the organization cannot be fetched or has no string
    /// `repos_url`.
    pub async fn public_repos_url(&self) -> Result<&str, ClientError> {
        let org = self.org().await?;
        Ok(access_nested_str(org, &["repos_url"])?)
    }

    /// Public repository listing, fetched on first call
    ///
    /// # Errors
    ///
    /// Fails if [`Self::public_repos_url`] fails or the listing cannot be
    /// fetched. Failures are not cached.
    pub async fn repos_payload(&self) -> Result<&Value, ClientError> {
        self.repos_payload
            .get_or_try_init(|| async move {
                let url = self.public_repos_url().await?;
                tracing::debug!(org = %self.org_name, url, "Fetching repository listing");
                Ok::<_, ClientError>(self.fetcher.get_json(url).await?)
            })
            .await
    }

    /// Names of the public repositories, in listing order
    ///
    /// With `Some(license)`, only repositories whose `license.key` equals
    /// `license` are returned.
    ///
    /// # Errors
    ///
    /// Fails if the listing cannot be fetched, is not an array, or contains a
    /// selected repository without a string `name`.
    pub async fn public_repos(&self, license: Option<&str>) -> Result<Vec<String>, ClientError> {
        let repos = self
            .repos_payload()
            .await?
            .as_array()
            .ok_or(ClientError::UnexpectedShape {
                document: "repository listing",
                expected: "an array",
            })?;

        let mut names = Vec::with_capacity(repos.len());
        for repo in repos {
            if license.is_none_or(|key| Self::has_license(repo, key)) {
                names.push(access_nested_str(repo, &["name"])?.to_string());
            }
        }
        Ok(names)
    }

    /// Whether `repo` declares the license `license_key`
    ///
    /// A repository with no `license` object, a `null` license, or no
    /// `license.key` does not match.
    #[must_use]
    pub fn has_license(repo: &Value, license_key: &str) -> bool {
        matches!(
            access_nested_map(repo, &["license", "key"]),
            Ok(Value::String(key)) if key == license_key
        )
    }
}
