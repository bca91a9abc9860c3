//! TOML Configuration File Support
//!
//! Client settings are loaded from `~/.config/orgclient/client.toml`, the
//! environment, and explicit overrides.
//!
//! # Configuration Priority
//!
//! Configuration values are loaded with the following priority (highest first):
//! 1. Explicit overrides ([`ConfigOverrides`])
//! 2. Environment variables
//! 3. TOML configuration file
//! 4. Default values
//!
//! # Example Configuration
//!
//! ```toml
//! [http]
//! api_base_url = "https://api.github.com"
//! user_agent = "orgclient/0.1"
//! timeout_secs = 30
//! token = "ghp_..."
//! ```
//!
//! # Environment Variables
//!
//! - `ORGCLIENT_API_BASE_URL`
//! - `ORGCLIENT_USER_AGENT`
//! - `ORGCLIENT_TIMEOUT_SECS`
//! - `GITHUB_TOKEN`

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default REST API base URL
pub const DEFAULT_API_BASE_URL: &str = "https://api.github.com";

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

// =============================================================================
// Error Types
// =============================================================================

/// Errors that can occur when loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file at {path}: {source}")]
    ReadError {
        /// The path that was attempted
        path: PathBuf,
        /// The underlying IO error
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("Failed to parse TOML config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

// =============================================================================
// Configuration Source Tracking
// =============================================================================

/// Tracks where the configuration came from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Explicit override
    Override,
    /// Value from environment variable
    Env,
    /// Value from TOML configuration file
    File,
    /// Default value
    Default,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Override => write!(f, "override"),
            Self::Env => write!(f, "environment"),
            Self::File => write!(f, "config file"),
            Self::Default => write!(f, "default"),
        }
    }
}

// =============================================================================
// TOML Configuration Structures
// =============================================================================

/// HTTP section of the TOML configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpToml {
    /// REST API base URL
    pub api_base_url: Option<String>,

    /// User-Agent header value
    pub user_agent: Option<String>,

    /// Request timeout in seconds
    pub timeout_secs: Option<u64>,

    /// Bearer token
    pub token: Option<String>,
}

/// Top-level TOML configuration structure
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientToml {
    /// HTTP configuration section
    pub http: HttpToml,
}

// =============================================================================
// Main Configuration Struct
// =============================================================================

/// Resolved client configuration
#[derive(Clone)]
pub struct ClientConfig {
    /// REST API base URL, without trailing slash
    pub api_base_url: String,

    /// User-Agent header value
    pub user_agent: String,

    /// Request timeout
    pub timeout: Duration,

    /// Bearer token
    pub token: Option<String>,

    /// Path to the config file that was loaded (if any)
    pub config_file_path: Option<PathBuf>,

    /// Source of configuration values
    source: ConfigSource,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            user_agent: format!("orgclient/{}", env!("CARGO_PKG_VERSION")),
            timeout: DEFAULT_TIMEOUT,
            token: None,
            config_file_path: None,
            source: ConfigSource::Default,
        }
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_base_url", &self.api_base_url)
            .field("user_agent", &self.user_agent)
            .field("timeout", &self.timeout)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("config_file_path", &self.config_file_path)
            .field("source", &self.source)
            .finish()
    }
}

impl ClientConfig {
    /// Create a new configuration with default values
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the highest-priority source that contributed a value
    #[must_use]
    pub fn source(&self) -> ConfigSource {
        self.source
    }

    /// Set the configuration source
    pub fn set_source(&mut self, source: ConfigSource) {
        self.source = source;
    }

    /// Check values that would make every request fail
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] for a base URL without an
    /// `http(s)://` scheme or a zero timeout.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.api_base_url.starts_with("http://") || self.api_base_url.starts_with("https://"))
        {
            return Err(ConfigError::ValidationError(format!(
                "api_base_url must start with http:// or https://, got {:?}",
                self.api_base_url
            )));
        }
        if self.timeout.is_zero() {
            return Err(ConfigError::ValidationError(
                "timeout must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

// =============================================================================
// Configuration Loading
// =============================================================================

/// Get the default configuration file path
///
/// Returns `$XDG_CONFIG_HOME/orgclient/client.toml` or
/// `~/.config/orgclient/client.toml` if `XDG_CONFIG_HOME` is not set.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("orgclient").join("client.toml"))
}

/// Load configuration from the default file and the environment
///
/// # Errors
///
/// Returns an error if the config file exists but cannot be parsed, or if
/// the resulting configuration is invalid. A missing config file is not an
/// error (defaults are used).
pub fn load_config() -> Result<ClientConfig, ConfigError> {
    load_config_from_path(default_config_path())
}

/// Load configuration from a specific path and the environment
///
/// # Arguments
///
/// * `path` - Optional path to the configuration file. If `None`, only defaults
///   and environment variables are used.
///
/// # Errors
///
/// Returns an error if the specified config file cannot be read or parsed,
/// or if the resulting configuration is invalid.
pub fn load_config_from_path(path: Option<PathBuf>) -> Result<ClientConfig, ConfigError> {
    load_config_with_env(path, |name| std::env::var(name).ok())
}

/// Load configuration reading environment variables through `lookup`
///
/// # Errors
///
/// Same as [`load_config_from_path`].
pub fn load_config_with_env<F>(
    path: Option<PathBuf>,
    lookup: F,
) -> Result<ClientConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    // Start with defaults
    let mut config = ClientConfig::default();

    if let Some(ref config_path) = path {
        if config_path.exists() {
            let toml_content =
                std::fs::read_to_string(config_path).map_err(|e| ConfigError::ReadError {
                    path: config_path.clone(),
                    source: e,
                })?;

            let toml_config: ClientToml = toml::from_str(&toml_content)?;
            apply_toml_config(&mut config, &toml_config);
            config.config_file_path = Some(config_path.clone());
            config.source = ConfigSource::File;

            tracing::info!(
                path = %config_path.display(),
                "Loaded configuration from file"
            );
        } else {
            tracing::debug!(
                path = %config_path.display(),
                "Config file not found, using defaults"
            );
        }
    }

    // Environment overrides file values
    apply_env_config(&mut config, lookup)?;

    config.validate()?;
    Ok(config)
}

/// Apply TOML configuration values to the config struct
fn apply_toml_config(config: &mut ClientConfig, toml: &ClientToml) {
    if let Some(ref url) = toml.http.api_base_url {
        config.api_base_url = url.trim_end_matches('/').to_string();
    }
    if let Some(ref agent) = toml.http.user_agent {
        config.user_agent.clone_from(agent);
    }
    if let Some(secs) = toml.http.timeout_secs {
        config.timeout = Duration::from_secs(secs);
    }
    if toml.http.token.is_some() {
        config.token.clone_from(&toml.http.token);
    }
}

/// Apply environment variable overrides to the config
fn apply_env_config<F>(config: &mut ClientConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup("ORGCLIENT_API_BASE_URL") {
        config.api_base_url = url.trim_end_matches('/').to_string();
        config.source = ConfigSource::Env;
    }
    if let Some(agent) = lookup("ORGCLIENT_USER_AGENT") {
        config.user_agent = agent;
        config.source = ConfigSource::Env;
    }
    if let Some(timeout) = lookup("ORGCLIENT_TIMEOUT_SECS") {
        let secs = timeout.trim().parse::<u64>().map_err(|_| {
            ConfigError::ValidationError(format!(
                "ORGCLIENT_TIMEOUT_SECS must be a whole number of seconds, got {timeout:?}"
            ))
        })?;
        config.timeout = Duration::from_secs(secs);
        config.source = ConfigSource::Env;
    }
    if let Some(token) = lookup("GITHUB_TOKEN").filter(|t| !t.is_empty()) {
        config.token = Some(token);
        config.source = ConfigSource::Env;
    }
    Ok(())
}

// =============================================================================
// Explicit Override Support
// =============================================================================

/// Builder for applying explicit overrides to configuration
///
/// Use this after [`load_config`] to apply caller-supplied values.
#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    /// API base URL override
    pub api_base_url: Option<String>,

    /// Timeout override (seconds)
    pub timeout_secs: Option<u64>,

    /// Token override
    pub token: Option<String>,
}

impl ConfigOverrides {
    /// Create a new empty set of overrides
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set API base URL override
    #[must_use]
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = Some(url.into());
        self
    }

    /// Set timeout override
    #[must_use]
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    /// Set token override
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Apply overrides to a configuration
    ///
    /// The result is validated before it replaces `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] if the overridden
    /// configuration is invalid; `config` is left unchanged.
    pub fn apply(&self, config: &mut ClientConfig) -> Result<(), ConfigError> {
        if self.api_base_url.is_none() && self.timeout_secs.is_none() && self.token.is_none() {
            return Ok(());
        }

        let mut updated = config.clone();
        updated.source = ConfigSource::Override;

        if let Some(ref url) = self.api_base_url {
            updated.api_base_url = url.trim_end_matches('/').to_string();
        }

        if let Some(secs) = self.timeout_secs {
            updated.timeout = Duration::from_secs(secs);
        }

        if self.token.is_some() {
            updated.token.clone_from(&self.token);
        }

        updated.validate()?;
        *config = updated;
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
