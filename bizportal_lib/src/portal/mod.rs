//! Department API groups. Each group borrows the shared [`bizportal_api::Client`]
//! and exposes its collections as [`Resource`](crate::resource::Resource)s plus
//! the operations that do not fit plain CRUD.

pub mod accounting;
pub mod auth;
pub mod dashboard;
pub mod hr;
pub mod it;
pub mod marketing;
pub mod operations;
pub mod sales;

pub use accounting::Accounting;
pub use auth::Auth;
pub use dashboard::Dashboard;
pub use hr::Hr;
pub use it::It;
pub use marketing::Marketing;
pub use operations::Operations;
pub use sales::Sales;
