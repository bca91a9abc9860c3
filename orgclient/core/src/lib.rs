//! orgclient Core - Nested JSON Access, Memoization and an Organization Client
//!
//! This crate provides a small set of JSON utilities and the organization
//! client built on top of them. Network access is always behind the
//! [`JsonFetcher`] trait so every consumer can be driven by canned responses.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                      GithubOrgClient<F>                      │
//! │  ┌──────────────┐  ┌────────────────┐  ┌──────────────────┐  │
//! │  │ org()        │  │ repos_payload()│  │ public_repos()   │  │
//! │  │ (memoized)   │  │ (memoized)     │  │ has_license()    │  │
//! │  └──────┬───────┘  └───────┬────────┘  └────────┬─────────┘  │
//! └─────────┼──────────────────┼────────────────────┼────────────┘
//!           │                  │                    │
//!    ┌──────┴──────┐    ┌──────┴──────┐     ┌───────┴────────┐
//!    │ JsonFetcher │    │ AsyncMemo-  │     │ access_nested_ │
//!    │ (reqwest /  │    │ ized<Value> │     │ map            │
//!    │  mock)      │    └─────────────┘     └────────────────┘
//!    └─────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```ignore
//! use orgclient_core::{GithubOrgClient, HttpJsonFetcher, ClientConfig};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = orgclient_core::load_config()?;
//!     let fetcher = HttpJsonFetcher::new(&config)?;
//!     let client = GithubOrgClient::with_config("google", fetcher, &config);
//!
//!     for name in client.public_repos(Some("apache-2.0")).await? {
//!         println!("{name}");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Module Overview
//!
//! - [`access`]: Key-path traversal over nested JSON values
//! - [`memo`]: Per-instance lazily computed values
//! - [`fetch`]: JSON-over-HTTP abstraction (reqwest backend and mock)
//! - [`github`]: Organization client built on the three utilities above
//! - [`config`]: Client settings from TOML, environment and overrides
//! - [`logging`]: Tracing subscriber setup
//! - [`exercises`]: Standalone numeric and timing helpers

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod access;
pub mod config;
pub mod exercises;
pub mod fetch;
pub mod github;
pub mod logging;
pub mod memo;

// Re-exports for convenience
pub use access::{access_nested_map, access_nested_str, AccessError, KeyPath};
pub use fetch::{get_json, FetchError, HttpJsonFetcher, JsonFetcher, MockJsonFetcher};
pub use github::{ClientError, GithubOrgClient, ORG_URL};
pub use memo::{AsyncMemoized, Memoized};

// Config exports
pub use config::{
    default_config_path, load_config, load_config_from_path, load_config_with_env, ClientConfig,
    ClientToml, ConfigError, ConfigOverrides, ConfigSource,
};

// Exercise exports
pub use exercises::annotations::{floor, sum_mixed_list, zoom_array, Number};
pub use exercises::timing::{measure_time, wait_n, wait_random, TimingError};
