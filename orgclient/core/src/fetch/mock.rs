//! Mock JSON Fetcher
//!
//! Canned-response fetcher for testing consumers of [`JsonFetcher`] without
//! network access. Clones share state, so a test can hand one clone to the
//! code under test and inspect the recorded calls through another.
//!
//! # Usage
//!
//! ```ignore
//! use orgclient_core::fetch::MockJsonFetcher;
//! use serde_json::json;
//!
//! let fetcher = MockJsonFetcher::new()
//!     .with_response("https://example.com", json!({"payload": true}));
//!
//! let client = GithubOrgClient::new("google", fetcher.clone());
//! // ...
//! assert_eq!(fetcher.call_count("https://example.com"), 1);
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;

use super::traits::{FetchError, JsonFetcher};

/// Programmed outcome for a URL
#[derive(Clone, Debug)]
enum MockResponse {
    /// Return this body
    Json(Value),
    /// Fail with this HTTP status
    Status(u16),
}

/// Mock fetcher returning pre-programmed responses
#[derive(Clone, Debug, Default)]
pub struct MockJsonFetcher {
    /// Responses keyed by exact URL
    responses: Arc<Mutex<HashMap<String, MockResponse>>>,
    /// Every requested URL, in call order
    history: Arc<Mutex<Vec<String>>>,
}

impl MockJsonFetcher {
    /// Create a mock with no responses
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Self::set_response`]
    #[must_use]
    pub fn with_response(self, url: impl Into<String>, body: Value) -> Self {
        self.set_response(url, body);
        self
    }

    /// Builder form of [`Self::set_status`]
    #[must_use]
    pub fn with_status(self, url: impl Into<String>, status: u16) -> Self {
        self.set_status(url, status);
        self
    }

    /// Return `body` for every GET of `url`
    pub fn set_response(&self, url: impl Into<String>, body: Value) {
        self.responses
            .lock()
            .insert(url.into(), MockResponse::Json(body));
    }

    /// Fail every GET of `url` with `status`
    pub fn set_status(&self, url: impl Into<String>, status: u16) {
        self.responses
            .lock()
            .insert(url.into(), MockResponse::Status(status));
    }

    /// URLs requested so far, in call order
    #[must_use]
    pub fn calls(&self) -> Vec<String> {
        self.history.lock().clone()
    }

    /// Number of requests made for `url`
    #[must_use]
    pub fn call_count(&self, url: &str) -> usize {
        self.history.lock().iter().filter(|u| *u == url).count()
    }

    /// Number of requests made for any URL
    #[must_use]
    pub fn total_calls(&self) -> usize {
        self.history.lock().len()
    }

    /// Forget recorded calls, keeping responses
    pub fn clear_history(&self) {
        self.history.lock().clear();
    }
}

#[async_trait]
impl JsonFetcher for MockJsonFetcher {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn get_json(&self, url: &str) -> Result<Value, FetchError> {
        self.history.lock().push(url.to_string());

        let response = self.responses.lock().get(url).cloned();
        match response {
            Some(MockResponse::Json(body)) => Ok(body),
            Some(MockResponse::Status(status)) => Err(FetchError::Status {
                url: url.to_string(),
                status,
            }),
            None => Err(FetchError::NotMocked {
                url: url.to_string(),
            }),
        }
    }
}
