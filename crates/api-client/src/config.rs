//! Configuration for the Open Food Facts client
//!
//! Supports environment-based configuration with sensible defaults. The
//! dev-vs-prod transport decision is threaded through here as an explicit
//! value rather than read ambiently mid-call.

use crate::error::{ClientError, ClientResult};
use crate::retry::RetryConfig;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Default dev-server base: a front-end dev proxy rewrites this prefix to
/// the upstream host
const DEFAULT_DIRECT_URL: &str = "http://localhost:5173/offapi";

/// Default production relay mount point
const DEFAULT_PROXY_URL: &str = "https://foodfacts.tools/api/off";

/// Deployment environments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development: requests go through the dev-server rewrite rule
    Development,
    /// Production: requests go through the CORS-workaround relay
    Production,
}

impl Default for Environment {
    fn default() -> Self {
        Self::Production
    }
}

impl Environment {
    /// Parse from the `FOODFACTS_ENV` environment variable
    pub fn from_env() -> Self {
        match env::var("FOODFACTS_ENV")
            .unwrap_or_default()
            .to_lowercase()
            .as_str()
        {
            "development" | "dev" | "local" => Self::Development,
            _ => Self::Production,
        }
    }
}

/// Client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL for the chosen transport path
    pub base_url: String,
    /// Request timeout for the real call
    #[serde(with = "duration_secs")]
    pub timeout: Duration,
    /// Timeout for the availability probe (kept short to fail fast)
    #[serde(with = "duration_secs")]
    pub probe_timeout: Duration,
    /// Retry configuration
    pub retry: RetryConfig,
    /// Current environment
    pub environment: Environment,
}

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        duration.as_secs().serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_PROXY_URL.to_string(),
            timeout: Duration::from_secs(30),
            probe_timeout: Duration::from_secs(5),
            retry: RetryConfig::default(),
            environment: Environment::default(),
        }
    }
}

impl ClientConfig {
    /// Create configuration from environment variables
    ///
    /// Reads the following environment variables:
    /// - `FOODFACTS_ENV`: Environment (development/production)
    /// - `FOODFACTS_DIRECT_URL`: dev-server base for the direct path
    /// - `FOODFACTS_PROXY_URL`: relay mount point for the proxied path
    /// - `FOODFACTS_TIMEOUT_SECS`: request timeout in seconds
    pub fn from_env() -> ClientResult<Self> {
        let environment = Environment::from_env();

        let base_url = match environment {
            Environment::Development => env::var("FOODFACTS_DIRECT_URL")
                .unwrap_or_else(|_| DEFAULT_DIRECT_URL.to_string()),
            Environment::Production => env::var("FOODFACTS_PROXY_URL")
                .unwrap_or_else(|_| DEFAULT_PROXY_URL.to_string()),
        };

        let timeout = env::var("FOODFACTS_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(30));

        let retry = match environment {
            Environment::Development => RetryConfig::quick(),
            Environment::Production => RetryConfig::default(),
        };

        Ok(Self {
            base_url,
            timeout,
            probe_timeout: Duration::from_secs(5),
            retry,
            environment,
        })
    }

    /// Create development configuration (direct path via dev-server rewrite)
    #[must_use]
    pub fn development() -> Self {
        Self {
            base_url: DEFAULT_DIRECT_URL.to_string(),
            timeout: Duration::from_secs(10),
            probe_timeout: Duration::from_secs(5),
            retry: RetryConfig::quick(),
            environment: Environment::Development,
        }
    }

    /// Create production configuration (relay path)
    #[must_use]
    pub fn production() -> Self {
        Self {
            base_url: DEFAULT_PROXY_URL.to_string(),
            timeout: Duration::from_secs(30),
            probe_timeout: Duration::from_secs(5),
            retry: RetryConfig::default(),
            environment: Environment::Production,
        }
    }

    /// Builder-style method to set the base URL
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Builder-style method to set the request timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builder-style method to set the probe timeout
    #[must_use]
    pub fn with_probe_timeout(mut self, timeout: Duration) -> Self {
        self.probe_timeout = timeout;
        self
    }

    /// Builder-style method to set the retry config
    #[must_use]
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> ClientResult<()> {
        if self.base_url.is_empty() {
            return Err(ClientError::invalid_argument("base_url cannot be empty"));
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ClientError::invalid_argument(
                "base_url must start with http:// or https://",
            ));
        }

        if self.timeout.is_zero() || self.probe_timeout.is_zero() {
            return Err(ClientError::invalid_argument("timeouts cannot be zero"));
        }

        Ok(())
    }
}
