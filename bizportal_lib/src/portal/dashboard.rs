//! Landing page data. Both calls degrade to empty results so the dashboard
//! renders even when a module is unavailable to the user.

use bizportal_api::endpoints::dashboard;
use bizportal_api::types::{ActivityEntry, DashboardSummary, Page};
use bizportal_api::{unwrap_record, Client};

use crate::error::PortalError;
use crate::messages::report;
use crate::resource::{optional_listing, OPTIONAL_READ_STATUSES};

pub struct Dashboard<'a> {
    client: &'a Client,
}

impl<'a> Dashboard<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Headline counters; all `None` when the endpoint answers 403/404/500.
    pub async fn summary(&self) -> Result<DashboardSummary, PortalError> {
        match self.client.get_json(dashboard::SUMMARY, Vec::new()).await {
            Ok(value) => Ok(serde_json::from_value(unwrap_record(value))?),
            Err(e) if e.status().is_some_and(|s| OPTIONAL_READ_STATUSES.contains(&s)) => {
                tracing::warn!("Dashboard summary unavailable ({}), showing defaults", e);
                Ok(DashboardSummary::default())
            }
            Err(e) => Err(report("dashboard summary", e)),
        }
    }

    /// Most recent `limit` activity entries.
    pub async fn recent_activity(&self, limit: u64) -> Result<Page<ActivityEntry>, PortalError> {
        optional_listing(
            self.client,
            dashboard::ACTIVITY,
            "recent activity",
            vec![("limit".to_string(), limit.max(1).to_string())],
        )
        .await
    }
}
