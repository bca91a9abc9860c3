//! JSON Fetching
//!
//! This module provides abstracted access to JSON-over-HTTP endpoints through
//! a one-method trait, so callers never depend on a concrete HTTP client.
//!
//! # Available Fetchers
//!
//! - **HttpJsonFetcher**: `reqwest`-backed GET with status and decode checks
//! - **MockJsonFetcher**: Canned responses with call recording, for tests
//!
//! # Usage
//!
//! ```ignore
//! use orgclient_core::fetch::{HttpJsonFetcher, JsonFetcher};
//!
//! let fetcher = HttpJsonFetcher::new(&ClientConfig::default())?;
//! let org = fetcher.get_json("https://api.github.com/orgs/google").await?;
//! ```

mod http;
mod mock;
mod traits;

pub use http::{get_json, HttpJsonFetcher};
pub use mock::MockJsonFetcher;
pub use traits::{FetchError, JsonFetcher};
