//! JSON Fetcher Traits
//!
//! The [`JsonFetcher`] trait is the only network boundary in the crate. It
//! performs a GET and returns the decoded JSON body verbatim; transport,
//! status handling and decoding are the implementation's concern.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Errors returned by a [`JsonFetcher`]
#[derive(Debug, Error)]
pub enum FetchError {
    /// The HTTP client could not be constructed
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    /// The request could not be sent or the connection failed
    #[error("Request to {url} failed: {source}")]
    Request {
        /// Requested URL
        url: String,
        /// Underlying transport error
        source: reqwest::Error,
    },

    /// The server answered with a non-success status
    #[error("{url} returned HTTP {status}")]
    Status {
        /// Requested URL
        url: String,
        /// HTTP status code
        status: u16,
    },

    /// The response body is not valid JSON
    #[error("Response from {url} is not valid JSON: {source}")]
    Decode {
        /// Requested URL
        url: String,
        /// Underlying decode error
        source: reqwest::Error,
    },

    /// A mock fetcher has no response registered for the URL
    #[error("No mocked response for {url}")]
    NotMocked {
        /// Requested URL
        url: String,
    },
}

impl FetchError {
    /// HTTP status code, if the failure was a non-success response
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// JSON fetcher trait
///
/// Implement this trait to plug in a different HTTP client or a test double.
#[async_trait]
pub trait JsonFetcher: Send + Sync {
    /// Get the fetcher name (e.g., "reqwest", "mock")
    fn name(&self) -> &str;

    /// GET `url` and return the decoded JSON body
    async fn get_json(&self, url: &str) -> Result<Value, FetchError>;
}

#[async_trait]
impl<T: JsonFetcher + ?Sized> JsonFetcher for Arc<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    async fn get_json(&self, url: &str) -> Result<Value, FetchError> {
        (**self).get_json(url).await
    }
}
