//! IT: asset register and support tickets.

use bizportal_api::endpoints::it;
use bizportal_api::types::{Asset, Ticket};
use bizportal_api::Client;

use crate::resource::Resource;

pub struct It<'a> {
    client: &'a Client,
}

impl<'a> It<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    pub fn assets(&self) -> Resource<'a, Asset> {
        Resource::new(self.client, it::ASSETS, "assets")
    }

    pub fn tickets(&self) -> Resource<'a, Ticket> {
        Resource::new(self.client, it::TICKETS, "tickets")
    }
}
