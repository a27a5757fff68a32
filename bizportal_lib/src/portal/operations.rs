//! Operations: inventory, suppliers and purchase orders.

use bizportal_api::endpoints::operations;
use bizportal_api::types::{InventoryItem, PurchaseOrder, Supplier};
use bizportal_api::Client;

use crate::resource::Resource;

pub struct Operations<'a> {
    client: &'a Client,
}

impl<'a> Operations<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    pub fn inventory(&self) -> Resource<'a, InventoryItem> {
        Resource::new(self.client, operations::INVENTORY, "inventory")
    }

    pub fn suppliers(&self) -> Resource<'a, Supplier> {
        Resource::new(self.client, operations::SUPPLIERS, "suppliers")
    }

    pub fn purchase_orders(&self) -> Resource<'a, PurchaseOrder> {
        Resource::new(self.client, operations::PURCHASE_ORDERS, "purchase orders")
    }
}
