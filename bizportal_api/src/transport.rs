//! The network seam below the pipeline.

use std::time::Duration;

use async_trait::async_trait;
use url::Url;

use crate::{request::RequestDescriptor, Error};

/// Status and body of an HTTP exchange, whatever the status.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends one attempt of a request.
///
/// Implementations report any HTTP status as `Ok`; `Err` is reserved for
/// failures without a response ([`Error::Network`], [`Error::Timeout`]) and
/// for URLs that cannot be built ([`Error::InvalidUrl`]).
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, req: &RequestDescriptor) -> Result<RawResponse, Error>;
}

/// `reqwest`-backed transport with a fixed base URL and timeout.
pub struct ReqwestTransport {
    client: reqwest::Client,
    base_url: String,
}

impl ReqwestTransport {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                Error::Network(e.to_string())
            })?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url_for(&self, req: &RequestDescriptor) -> Result<Url, Error> {
        let path = if req.path.starts_with('/') {
            req.path.clone()
        } else {
            format!("/{}", req.path)
        };
        let mut url = Url::parse(&format!("{}{}", self.base_url, path)).map_err(|e| {
            tracing::error!("Invalid URL constructed: {}", e);
            Error::InvalidUrl(format!("{}{}: {}", self.base_url, path, e))
        })?;
        if !req.query.is_empty() {
            url.query_pairs_mut().extend_pairs(req.query.iter());
        }
        Ok(url)
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, req: &RequestDescriptor) -> Result<RawResponse, Error> {
        let url = self.url_for(req)?;
        let mut builder = self
            .client
            .request(req.method.clone(), url)
            .headers(req.headers.clone())
            .header("accept", "application/json, text/plain, */*");
        if let Some(body) = &req.body {
            builder = builder.json(body);
        }

        let resp = builder.send().await.map_err(map_reqwest_error)?;
        let status = resp.status().as_u16();
        let body = resp.text().await.map_err(map_reqwest_error)?;
        Ok(RawResponse { status, body })
    }
}

fn map_reqwest_error(e: reqwest::Error) -> Error {
    if e.is_timeout() {
        Error::Timeout
    } else {
        Error::Network(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_base_path_and_query() {
        let transport =
            ReqwestTransport::new("https://portal.example.com/api/", Duration::from_secs(1))
                .unwrap();
        let req = RequestDescriptor::get("sales/customers")
            .with_query(vec![("page".into(), "2".into()), ("search".into(), "a b".into())]);
        let url = transport.url_for(&req).unwrap();
        assert_eq!(url.path(), "/api/sales/customers");
        assert_eq!(url.query(), Some("page=2&search=a+b"));
    }

    #[test]
    fn invalid_base_url_is_reported() {
        let transport = ReqwestTransport::new("not a url", Duration::from_secs(1)).unwrap();
        let err = transport
            .url_for(&RequestDescriptor::get("/x"))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidUrl(_)));
    }

    #[test]
    fn success_range() {
        assert!(RawResponse::new(204, "").is_success());
        assert!(!RawResponse::new(302, "").is_success());
    }
}
