//! Configuration for the Chainbase API clients
//!
//! All settings are resolved once, at startup, into an explicit
//! [`ChainbaseConfig`] that client constructors take by value. Nothing in the
//! request path reads the environment.

use crate::error::{Error, Result};
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;
use url::Url;

/// Chainbase API key environment variable name
pub const CHAINBASE_API_KEY_ENV: &str = "CHAINBASE_API_KEY";

/// Default Chainbase API endpoint
pub const DEFAULT_API_URL: &str = "https://api.chainbase.com/api/v1";

/// Interval between polls of the query-execution status endpoint
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(1000);

/// Maximum number of status polls before a query is considered timed out
const DEFAULT_MAX_POLL_ATTEMPTS: u32 = 30;

/// Page size requested from the token-balance endpoint
const DEFAULT_BALANCE_PAGE_LIMIT: u32 = 100;

/// Configuration shared by the query and balance clients
#[derive(Debug, Clone)]
pub struct ChainbaseConfig {
    /// Chainbase API key, sent as the `X-API-KEY` header
    api_key: SecretString,
    /// Base URL of the Chainbase API
    pub api_url: Url,
    /// Fixed delay between status polls
    pub poll_interval: Duration,
    /// Poll budget; `poll_interval * max_poll_attempts` is the total timeout
    pub max_poll_attempts: u32,
    /// `limit` query parameter for token-balance requests
    pub balance_page_limit: u32,
}

impl ChainbaseConfig {
    /// Create a configuration with an explicit API key and default endpoints
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::from(api_key.into()),
            api_url: Url::parse(DEFAULT_API_URL).expect("default API URL is valid"),
            poll_interval: DEFAULT_POLL_INTERVAL,
            max_poll_attempts: DEFAULT_MAX_POLL_ATTEMPTS,
            balance_page_limit: DEFAULT_BALANCE_PAGE_LIMIT,
        }
    }

    /// Read the API key from `CHAINBASE_API_KEY`
    pub fn from_env() -> Result<Self> {
        match std::env::var(CHAINBASE_API_KEY_ENV) {
            Ok(key) if !key.is_empty() => Ok(Self::new(key)),
            _ => Err(Error::Config(format!(
                "{CHAINBASE_API_KEY_ENV} is not set"
            ))),
        }
    }

    /// Resolve the API key once at the boundary: an explicit setting wins over
    /// the environment variable.
    pub fn resolve(explicit: Option<&str>) -> Result<Self> {
        match explicit {
            Some(key) if !key.is_empty() => Ok(Self::new(key)),
            _ => Self::from_env(),
        }
    }

    /// Override the API base URL (used by tests against a mock server)
    pub fn with_api_url(mut self, api_url: Url) -> Self {
        self.api_url = api_url;
        self
    }

    /// Override the poll interval
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Override the poll budget
    pub fn with_max_poll_attempts(mut self, attempts: u32) -> Self {
        self.max_poll_attempts = attempts;
        self
    }

    /// The configured API key
    pub fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }

    /// Total polling budget in seconds, for timeout reporting
    pub fn timeout_seconds(&self) -> u64 {
        (self.poll_interval * self.max_poll_attempts).as_secs()
    }

    /// Build an endpoint URL from path segments
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.api_url.clone();
        url.path_segments_mut()
            .map_err(|_| Error::Config(format!("API URL cannot be a base: {}", self.api_url)))?
            .extend(segments);
        Ok(url)
    }
}
