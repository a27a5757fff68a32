//! HTTP client pipeline for the BizPortal backend.
//!
//! Provides the request/response policy (auth headers, cache directives,
//! bounded GET retry, 401 session eviction), the session context, response
//! envelope normalization and the record types of every department.

mod client;
pub mod config;
pub mod endpoints;
pub mod envelope;
mod errors;
pub mod policy;
mod query;
pub mod request;
pub mod session;
pub mod transport;
pub mod types;

pub use self::client::{Client, LoginRedirect};
pub use self::config::ClientConfig;
pub use self::envelope::{normalize, unwrap_record, Envelope, Listing, PageMeta};
pub use self::errors::Error;
pub use self::policy::RetryPolicy;
pub use self::query::{ListQuery, SortDirection, DEFAULT_PAGE_SIZE};
pub use self::request::RequestDescriptor;
pub use self::session::{MemorySessionStore, Session, SessionStore};
pub use self::transport::{RawResponse, ReqwestTransport, Transport};
