//! Configuration Module
//!
//! Client settings, loadable from environment variables or built fluently.

use std::env;
use std::time::Duration;

use crate::retry::{RetryPolicy, DEFAULT_BASE_DELAY, DEFAULT_MAX_ATTEMPTS, DEFAULT_MAX_DELAY};

/// Public Grokipedia host.
pub const DEFAULT_BASE_URL: &str = "https://grokipedia.com";
/// Per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
/// Lifetime of cached responses.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(3600);

/// Client configuration.
///
/// Fixed once the client is built; derive a differently configured client
/// instead of mutating one.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Scheme and host of the upstream service, without a trailing slash
    pub base_url: String,
    /// Timeout applied to each individual HTTP request
    pub timeout: Duration,
    /// Whether successful responses are cached
    pub cache_enabled: bool,
    /// Time-to-live of cached responses
    pub cache_ttl: Duration,
    /// Value of the `User-Agent` header
    pub user_agent: String,
    /// Retry behaviour for transient failures
    pub retry: RetryPolicy,
}

impl ClientConfig {
    /// Creates a new ClientConfig by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `GROKIPEDIA_BASE_URL` - Upstream host (default: https://grokipedia.com)
    /// - `GROKIPEDIA_TIMEOUT_SECS` - Request timeout in seconds (default: 30)
    /// - `GROKIPEDIA_CACHE_ENABLED` - `true`/`false` (default: true)
    /// - `GROKIPEDIA_CACHE_TTL_SECS` - Cache TTL in seconds (default: 3600)
    /// - `GROKIPEDIA_MAX_ATTEMPTS` - Attempts per request (default: 3)
    /// - `GROKIPEDIA_RETRY_BASE_MS` - First backoff delay in ms (default: 1000)
    /// - `GROKIPEDIA_RETRY_MAX_MS` - Backoff ceiling in ms (default: 10000)
    ///
    /// Unset or unparsable variables fall back to their defaults.
    pub fn from_env() -> Self {
        let retry = RetryPolicy::new(
            env_parse("GROKIPEDIA_MAX_ATTEMPTS").unwrap_or(DEFAULT_MAX_ATTEMPTS),
            env_parse("GROKIPEDIA_RETRY_BASE_MS")
                .map(Duration::from_millis)
                .unwrap_or(DEFAULT_BASE_DELAY),
            env_parse("GROKIPEDIA_RETRY_MAX_MS")
                .map(Duration::from_millis)
                .unwrap_or(DEFAULT_MAX_DELAY),
        );

        Self {
            base_url: env::var("GROKIPEDIA_BASE_URL")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(|v| normalize_base_url(&v))
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            timeout: env_parse("GROKIPEDIA_TIMEOUT_SECS")
                .map(Duration::from_secs)
                .unwrap_or(DEFAULT_TIMEOUT),
            cache_enabled: env_parse("GROKIPEDIA_CACHE_ENABLED").unwrap_or(true),
            cache_ttl: env_parse("GROKIPEDIA_CACHE_TTL_SECS")
                .map(Duration::from_secs)
                .unwrap_or(DEFAULT_CACHE_TTL),
            user_agent: default_user_agent(),
            retry,
        }
    }

    /// Starts a builder from the defaults.
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder {
            config: Self::default(),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            cache_enabled: true,
            cache_ttl: DEFAULT_CACHE_TTL,
            user_agent: default_user_agent(),
            retry: RetryPolicy::default(),
        }
    }
}

// == Builder ==
/// Fluent construction of a [`ClientConfig`].
#[derive(Debug, Clone)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    pub fn base_url(mut self, base_url: impl AsRef<str>) -> Self {
        self.config.base_url = normalize_base_url(base_url.as_ref());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    pub fn cache_enabled(mut self, enabled: bool) -> Self {
        self.config.cache_enabled = enabled;
        self
    }

    pub fn cache_ttl(mut self, ttl: Duration) -> Self {
        self.config.cache_ttl = ttl;
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    pub fn retry(mut self, retry: RetryPolicy) -> Self {
        self.config.retry = retry;
        self
    }

    pub fn build(self) -> ClientConfig {
        self.config
    }
}

fn default_user_agent() -> String {
    format!("grokipedia-rs/{}", env!("CARGO_PKG_VERSION"))
}

fn normalize_base_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_string()
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    const VARS: [&str; 7] = [
        "GROKIPEDIA_BASE_URL",
        "GROKIPEDIA_TIMEOUT_SECS",
        "GROKIPEDIA_CACHE_ENABLED",
        "GROKIPEDIA_CACHE_TTL_SECS",
        "GROKIPEDIA_MAX_ATTEMPTS",
        "GROKIPEDIA_RETRY_BASE_MS",
        "GROKIPEDIA_RETRY_MAX_MS",
    ];

    #[test]
    fn test_config_default() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "https://grokipedia.com");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.cache_enabled);
        assert_eq!(config.cache_ttl, Duration::from_secs(3600));
        assert_eq!(config.retry, RetryPolicy::default());
        assert!(config.user_agent.starts_with("grokipedia-rs/"));
    }

    // Single test touching the environment so parallel tests cannot race on it
    #[test]
    fn test_config_from_env() {
        for var in VARS {
            env::remove_var(var);
        }
        let config = ClientConfig::from_env();
        assert_eq!(config, ClientConfig::default());

        env::set_var("GROKIPEDIA_BASE_URL", "http://localhost:8080/");
        env::set_var("GROKIPEDIA_TIMEOUT_SECS", "5");
        env::set_var("GROKIPEDIA_CACHE_ENABLED", "false");
        env::set_var("GROKIPEDIA_CACHE_TTL_SECS", "not-a-number");
        env::set_var("GROKIPEDIA_MAX_ATTEMPTS", "0");
        env::set_var("GROKIPEDIA_RETRY_BASE_MS", "50");
        env::set_var("GROKIPEDIA_RETRY_MAX_MS", "200");

        let config = ClientConfig::from_env();
        for var in VARS {
            env::remove_var(var);
        }

        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert!(!config.cache_enabled);
        assert_eq!(config.cache_ttl, DEFAULT_CACHE_TTL);
        assert_eq!(config.retry.max_attempts(), 1);
        assert_eq!(config.retry.base_delay(), Duration::from_millis(50));
        assert_eq!(config.retry.max_delay(), Duration::from_millis(200));
    }

    #[test]
    fn test_builder_overrides() {
        let config = ClientConfig::builder()
            .base_url("https://mirror.example.org///")
            .timeout(Duration::from_secs(2))
            .cache_enabled(false)
            .cache_ttl(Duration::from_secs(60))
            .user_agent("tests/1.0")
            .retry(RetryPolicy::no_retry())
            .build();

        assert_eq!(config.base_url, "https://mirror.example.org");
        assert_eq!(config.timeout, Duration::from_secs(2));
        assert!(!config.cache_enabled);
        assert_eq!(config.cache_ttl, Duration::from_secs(60));
        assert_eq!(config.user_agent, "tests/1.0");
        assert_eq!(config.retry.max_attempts(), 1);
    }
}
