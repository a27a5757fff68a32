use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::envelope::{Listing, PageMeta};

/// A decoded page of records with the resolved total.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    #[serde(skip)]
    pub meta: PageMeta,
}

impl<T> Page<T> {
    /// A page with no items and zero counts.
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
            meta: PageMeta::default(),
        }
    }
}

impl<T: DeserializeOwned> Page<T> {
    pub fn from_listing(listing: Listing) -> Result<Self, serde_json::Error> {
        let total = listing.total;
        let meta = listing.meta;
        Ok(Self {
            items: listing.decode()?,
            total,
            meta,
        })
    }
}
