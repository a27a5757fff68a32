//! Cross-cutting request/response policy applied by the pipeline.
//!
//! The request side decorates every attempt with auth and cache headers. The
//! response side decides whether a failed attempt may be retried and how long
//! to wait before the next one.

use std::time::Duration;

use reqwest::header::{HeaderName, HeaderValue, AUTHORIZATION, CACHE_CONTROL, EXPIRES, PRAGMA};
use reqwest::Method;

use crate::{request::RequestDescriptor, session::Session, Error};

/// Secondary token header understood by the legacy auth middleware.
pub const AUTH_TOKEN_HEADER: &str = "x-auth-token";

/// Cache directive for reads: fresh for 60s, servable stale for another 300s.
pub const READ_CACHE_CONTROL: &str = "max-age=60, stale-while-revalidate=300";

/// Cache directive for mutations.
pub const WRITE_CACHE_CONTROL: &str = "no-store, no-cache, must-revalidate";

/// Decorates an outgoing request. Never fails: headers that cannot be encoded
/// are skipped with a warning.
pub fn apply_request_policy(req: &mut RequestDescriptor, session: &Session, login_path: &str) {
    if !is_login_path(&req.path, login_path) {
        if let Some(token) = session.token() {
            attach_token(req, &token);
        }
    }

    if req.method == Method::GET {
        req.headers
            .insert(CACHE_CONTROL, HeaderValue::from_static(READ_CACHE_CONTROL));
        req.headers.remove(PRAGMA);
        req.headers.remove(EXPIRES);
    } else {
        req.headers
            .insert(CACHE_CONTROL, HeaderValue::from_static(WRITE_CACHE_CONTROL));
        req.headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));
        req.headers.insert(EXPIRES, HeaderValue::from_static("0"));
    }
}

fn attach_token(req: &mut RequestDescriptor, token: &str) {
    let bearer = HeaderValue::from_str(&format!("Bearer {}", token));
    let raw = HeaderValue::from_str(token);
    match (bearer, raw) {
        (Ok(bearer), Ok(raw)) => {
            req.headers.insert(AUTHORIZATION, bearer);
            req.headers
                .insert(HeaderName::from_static(AUTH_TOKEN_HEADER), raw);
        }
        _ => tracing::warn!("Session token is not a valid header value; sending request without it"),
    }
}

/// Whether `path` targets the login endpoint (query string and trailing slash ignored).
pub fn is_login_path(path: &str, login_path: &str) -> bool {
    let path = path.split('?').next().unwrap_or(path).trim_end_matches('/');
    let login = login_path.trim_end_matches('/');
    !login.is_empty() && (path == login || path.ends_with(login))
}

/// Bounded exponential backoff for idempotent reads.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 2,
            base_delay: Duration::from_millis(200),
        }
    }
}

impl RetryPolicy {
    /// Delay before retry number `attempt` (1-based): `base × 2^(attempt-1)`.
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let shift = attempt.saturating_sub(1).min(30);
        self.base_delay.saturating_mul(1u32 << shift)
    }

    /// Whether the failed request may be sent again.
    ///
    /// Only GET requests that failed without an HTTP response (network error or
    /// timeout) qualify, and only while retries remain.
    pub fn should_retry(&self, req: &RequestDescriptor, err: &Error) -> bool {
        req.is_get() && err.is_transport() && req.retry_count < self.max_retries
    }
}
