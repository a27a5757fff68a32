//! Sales: customers, orders and the revenue report.

use bizportal_api::endpoints::sales;
use bizportal_api::types::{Customer, Order, Page, SalesReportRow};
use bizportal_api::Client;

use crate::error::PortalError;
use crate::resource::{optional_listing, Resource};

pub struct Sales<'a> {
    client: &'a Client,
}

impl<'a> Sales<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    pub fn customers(&self) -> Resource<'a, Customer> {
        Resource::new(self.client, sales::CUSTOMERS, "customers")
    }

    pub fn orders(&self) -> Resource<'a, Order> {
        Resource::new(self.client, sales::ORDERS, "orders")
    }

    /// Revenue for `period` (e.g. `monthly`, `2024-Q1`). Empty when the report
    /// is not available.
    pub async fn report(&self, period: Option<&str>) -> Result<Page<SalesReportRow>, PortalError> {
        let query = period
            .map(|p| vec![("period".to_string(), p.to_string())])
            .unwrap_or_default();
        optional_listing(self.client, sales::REPORT, "sales report", query).await
    }
}
