//! Client configuration with environment overrides.

use std::time::Duration;

use crate::{endpoints, policy::RetryPolicy};

/// Default backend base URL when none is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Settings for a pipeline [`Client`](crate::Client).
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Base URL prefixed to every request path, e.g. `https://portal.example.com/api`.
    pub base_url: String,
    pub timeout: Duration,
    pub retry: RetryPolicy,
    /// Requests to this path never carry the session token.
    pub login_path: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            retry: RetryPolicy::default(),
            login_path: endpoints::auth::LOGIN.to_string(),
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            ..Default::default()
        }
    }

    /// Reads `BIZPORTAL_API_URL`, `BIZPORTAL_TIMEOUT_MS`, `BIZPORTAL_RETRY_MAX`
    /// and `BIZPORTAL_RETRY_BASE_MS`, falling back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: std::env::var("BIZPORTAL_API_URL")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.base_url),
            timeout: Duration::from_millis(env_u64(
                "BIZPORTAL_TIMEOUT_MS",
                defaults.timeout.as_millis() as u64,
            )),
            retry: RetryPolicy {
                max_retries: env_u64("BIZPORTAL_RETRY_MAX", defaults.retry.max_retries as u64)
                    as u32,
                base_delay: Duration::from_millis(env_u64(
                    "BIZPORTAL_RETRY_BASE_MS",
                    defaults.retry.base_delay.as_millis() as u64,
                )),
            },
            login_path: defaults.login_path,
        }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }
}

fn env_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|val| val.parse::<u64>().ok())
        .unwrap_or(default)
}
