use std::time::Duration;

use crate::error::{Error, Result};

/// Production CLOB endpoint
pub const DEFAULT_HOST: &str = "https://clob.polymarket.com";

/// User agent sent with every request
pub const DEFAULT_USER_AGENT: &str = "polymarket_clob";

/// Connection settings for [`HttpClient`](crate::http::HttpClient)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL, without a trailing slash (e.g., "https://clob.polymarket.com")
    pub host: String,
    pub user_agent: String,
    /// Whole-request timeout
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl ClientConfig {
    /// Create a config for the given host with default settings
    pub fn new(host: impl Into<String>) -> Self {
        let host: String = host.into();
        Self {
            host: host.trim_end_matches('/').to_string(),
            ..Self::default()
        }
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Check the settings before a client is built from them
    pub fn validate(&self) -> Result<()> {
        if self.host.is_empty() {
            return Err(Error::Config("host must not be empty".to_string()));
        }
        if !(self.host.starts_with("http://") || self.host.starts_with("https://")) {
            return Err(Error::Config(format!(
                "host must use http or https: {}",
                self.host
            )));
        }
        if self.timeout.is_zero() {
            return Err(Error::Config("timeout must be non-zero".to_string()));
        }
        Ok(())
    }
}
