//! Error types for the library layer.

use std::fmt;

/// Coarse classification of a failed backend call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailureKind {
    /// No HTTP response arrived.
    Network,
    /// The client-side timeout elapsed.
    Timeout,
    /// 401: the session is missing or expired.
    Unauthorized,
    /// 403: the user lacks permission.
    Forbidden,
    /// 404.
    NotFound,
    /// 400/422, or a 500 that carries field-level details.
    Validation,
    /// 5xx without field-level details.
    Server,
    /// 2xx with `success: false`.
    Application,
    /// Any other status, or an unparseable reply.
    Other,
}

/// A field-level validation message extracted from a backend reply.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Errors produced by the library layer. Backend failures are classified and
/// carry a message ready to show to the user.
#[derive(Debug)]
pub enum PortalError {
    /// A backend call failed.
    Request {
        kind: FailureKind,
        status: Option<u16>,
        message: String,
        field_errors: Vec<FieldError>,
        source: bizportal_api::Error,
    },
    /// JSON serialization or deserialization of a record failed.
    Serialization(serde_json::Error),
    /// User-provided input failed a guard before any request was sent.
    InvalidInput(String),
}

impl PortalError {
    pub fn kind(&self) -> Option<FailureKind> {
        match self {
            Self::Request { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Request { status, .. } => *status,
            _ => None,
        }
    }

    /// Field-level messages, empty unless the backend reported some.
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            Self::Request { field_errors, .. } => field_errors,
            _ => &[],
        }
    }
}

impl fmt::Display for PortalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Request { message, .. } => write!(f, "{}", message),
            Self::Serialization(e) => write!(f, "Serialization error: {}", e),
            Self::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
        }
    }
}

impl std::error::Error for PortalError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Request { source, .. } => Some(source),
            Self::Serialization(e) => Some(e),
            Self::InvalidInput(_) => None,
        }
    }
}

impl From<bizportal_api::Error> for PortalError {
    fn from(e: bizportal_api::Error) -> Self {
        crate::messages::classify_error(e)
    }
}

impl From<serde_json::Error> for PortalError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e)
    }
}
