//! HTTP client pipeline for the portal backend.

use std::sync::Arc;

use reqwest::Method;
use serde::Serialize;

use crate::{
    config::ClientConfig,
    policy::{apply_request_policy, RetryPolicy},
    request::RequestDescriptor,
    session::Session,
    transport::{RawResponse, ReqwestTransport, Transport},
    Error,
};

/// Hook invoked after the session was evicted by a 401 response.
pub type LoginRedirect = Arc<dyn Fn() + Send + Sync>;

/// Single choke point for all outgoing calls.
///
/// Every attempt is decorated with auth and cache headers. Failed GET requests
/// without an HTTP response are retried with exponential backoff; a 401 while
/// a session is active clears the session and fires the login redirect hook.
/// The original failure always reaches the caller.
#[derive(Clone)]
pub struct Client {
    transport: Arc<dyn Transport>,
    session: Session,
    retry: RetryPolicy,
    login_path: String,
    on_unauthorized: Option<LoginRedirect>,
}

impl Client {
    /// Creates a client using the `reqwest` transport.
    pub fn new(config: ClientConfig, session: Session) -> Result<Self, Error> {
        let transport = ReqwestTransport::new(&config.base_url, config.timeout)?;
        Ok(Self::with_transport(Arc::new(transport), session, config))
    }

    /// Creates a client with default settings and a custom base URL. Used for testing with wiremock.
    pub fn with_base_url(base_url: &str, session: Session) -> Result<Self, Error> {
        Self::new(ClientConfig::new(base_url), session)
    }

    /// Creates a client over an arbitrary transport. The config's base URL and
    /// timeout are the transport's concern and are ignored here.
    pub fn with_transport(
        transport: Arc<dyn Transport>,
        session: Session,
        config: ClientConfig,
    ) -> Self {
        Self {
            transport,
            session,
            retry: config.retry,
            login_path: config.login_path,
            on_unauthorized: None,
        }
    }

    /// Registers the hook that sends the user back to the login entry point.
    pub fn on_unauthorized(mut self, hook: LoginRedirect) -> Self {
        self.on_unauthorized = Some(hook);
        self
    }

    /// A copy of this client that evicts on 401 but never fires the hook.
    pub fn without_unauthorized_hook(&self) -> Self {
        Self {
            on_unauthorized: None,
            ..self.clone()
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn login_path(&self) -> &str {
        &self.login_path
    }

    /// Sends a request through the pipeline.
    ///
    /// Non-2xx responses become [`Error::HttpStatus`].
    pub async fn execute(&self, mut req: RequestDescriptor) -> Result<RawResponse, Error> {
        loop {
            apply_request_policy(&mut req, &self.session, &self.login_path);
            tracing::debug!(
                "{} {} (retry {})",
                req.method,
                req.path,
                req.retry_count
            );

            let err = match self.transport.send(&req).await {
                Ok(resp) if resp.is_success() => return Ok(resp),
                Ok(resp) => Error::HttpStatus {
                    status: resp.status,
                    body: resp.body,
                },
                Err(err) => err,
            };

            if err.status() == Some(401) {
                self.evict_session();
            }

            if !self.retry.should_retry(&req, &err) {
                return Err(err);
            }

            req.retry_count += 1;
            let delay = self.retry.delay_for_attempt(req.retry_count);
            tracing::warn!(
                "{} {} failed (attempt {}/{}): {}, retrying in {}ms",
                req.method,
                req.path,
                req.retry_count,
                self.retry.max_retries,
                err,
                delay.as_millis()
            );
            tokio::time::sleep(delay).await;
        }
    }

    fn evict_session(&self) {
        if self.session.clear() {
            tracing::warn!("Session rejected by the server; signing out");
            if let Some(hook) = &self.on_unauthorized {
                hook();
            }
        }
    }

    /// Sends a request and decodes the JSON reply.
    ///
    /// An empty body decodes to `Value::Null`. A body of the form
    /// `{"success": false, ...}` is reported as [`Error::Application`].
    pub async fn execute_json(&self, req: RequestDescriptor) -> Result<serde_json::Value, Error> {
        let resp = self.execute(req).await?;
        let value = decode_body(&resp.body)?;
        check_application_failure(value)
    }

    /// GET `path` with query pairs.
    pub async fn get_json(
        &self,
        path: &str,
        query: Vec<(String, String)>,
    ) -> Result<serde_json::Value, Error> {
        self.execute_json(RequestDescriptor::get(path).with_query(query))
            .await
    }

    /// Sends a mutating request with an optional JSON body.
    pub async fn send_json<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<serde_json::Value, Error> {
        let mut req = RequestDescriptor::new(method, path);
        if let Some(body) = body {
            let body = serde_json::to_value(body).map_err(|e| {
                tracing::error!("Failed to encode request body for {}: {}", path, e);
                Error::Encode(e.to_string())
            })?;
            req = req.with_body(body);
        }
        self.execute_json(req).await
    }
}

fn decode_body(body: &str) -> Result<serde_json::Value, Error> {
    if body.trim().is_empty() {
        return Ok(serde_json::Value::Null);
    }
    serde_json::from_str(body).map_err(|e| {
        let snippet = truncate_body(body);
        tracing::error!("Failed to parse response: {} | body: {}", e, snippet);
        Error::Decode(e.to_string())
    })
}

fn check_application_failure(value: serde_json::Value) -> Result<serde_json::Value, Error> {
    let failed = value
        .get("success")
        .and_then(|s| s.as_bool())
        .map(|ok| !ok)
        .unwrap_or(false);
    if !failed {
        return Ok(value);
    }
    let message = value
        .get("message")
        .or_else(|| value.get("error"))
        .and_then(|m| m.as_str())
        .unwrap_or("The operation could not be completed")
        .to_string();
    Err(Error::Application {
        message,
        body: value,
    })
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        body.to_string()
    } else {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...[truncated]", &body[..end])
    }
}
