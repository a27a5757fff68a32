//! Error types for the API client.

/// Errors that can occur when sending a request through the pipeline.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The request never produced an HTTP response (connection refused, DNS, reset).
    #[error("Network error: {0}")]
    Network(String),
    /// The client-side timeout elapsed before a response arrived.
    #[error("Request timed out")]
    Timeout,
    /// The API returned a non-success status with a body snippet.
    #[error("Request failed with status {status}")]
    HttpStatus { status: u16, body: String },
    /// The API answered 2xx but flagged the operation as failed (`success: false`).
    #[error("{message}")]
    Application {
        message: String,
        body: serde_json::Value,
    },
    /// A request URL could not be constructed from the base URL and path.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
    /// The response body was not valid JSON.
    #[error("Failed to parse response: {0}")]
    Decode(String),
    /// The request body could not be serialized to JSON.
    #[error("Failed to encode request body: {0}")]
    Encode(String),
}

impl Error {
    /// HTTP status of the failed response, if one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Failures without an HTTP response. Only these are eligible for retry.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Timeout)
    }

    /// Decoded JSON body carried by the failure, if any.
    pub fn body_json(&self) -> Option<serde_json::Value> {
        match self {
            Self::HttpStatus { body, .. } => serde_json::from_str(body).ok(),
            Self::Application { body, .. } => Some(body.clone()),
            _ => None,
        }
    }
}
