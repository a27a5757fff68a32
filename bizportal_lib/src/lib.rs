//! Library layer for the business portal: department API groups, error
//! classification and user-facing messages, pagination reconciliation, input
//! validation and a file-backed session store.
//!
//! Wraps the `bizportal_api` pipeline crate, which owns transport, headers,
//! retries and envelope normalization.

pub mod client;
pub mod error;
pub mod messages;
pub mod pagination;
pub mod portal;
pub mod resource;
pub mod session_file;
pub mod validation;

pub use bizportal_api;
pub use bizportal_api::types;
pub use bizportal_api::{ClientConfig, ListQuery, Session, SortDirection};

pub use client::PortalClient;
pub use error::{FailureKind, FieldError, PortalError};
pub use pagination::{load_page, reconcile, PaginationMode, PaginationState, Reconciled};
pub use resource::Resource;
pub use session_file::{FileSessionStore, SessionFileError};
