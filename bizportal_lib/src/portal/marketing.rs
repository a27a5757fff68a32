//! Marketing: campaigns, leads and campaign performance.

use bizportal_api::endpoints::marketing;
use bizportal_api::types::{Campaign, CampaignPerformance, Lead, Page};
use bizportal_api::Client;

use crate::error::PortalError;
use crate::resource::{optional_listing, Resource};

pub struct Marketing<'a> {
    client: &'a Client,
}

impl<'a> Marketing<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    pub fn campaigns(&self) -> Resource<'a, Campaign> {
        Resource::new(self.client, marketing::CAMPAIGNS, "campaigns")
    }

    pub fn leads(&self) -> Resource<'a, Lead> {
        Resource::new(self.client, marketing::LEADS, "leads")
    }

    /// Per-campaign results. Empty when analytics are not available.
    pub async fn performance(&self) -> Result<Page<CampaignPerformance>, PortalError> {
        optional_listing(
            self.client,
            marketing::PERFORMANCE,
            "campaign performance",
            Vec::new(),
        )
        .await
    }
}
