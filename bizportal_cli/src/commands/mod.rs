pub mod auth;
pub mod dashboard;
pub mod fetch;
pub mod list;
pub mod records;
pub mod reports;
pub mod resources;
pub mod transfer;
