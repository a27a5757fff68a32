//! Generic collection endpoint: one method per CRUD operation, each a single
//! HTTP call with envelope normalization and error classification.

use std::marker::PhantomData;

use bizportal_api::endpoints::record_path;
use bizportal_api::types::{Page, RecordId};
use bizportal_api::{normalize, unwrap_record, Client, ListQuery};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;

use crate::error::PortalError;
use crate::messages::report;

/// Statuses a read-only report endpoint may answer with when it is not
/// deployed or not visible to the user; treated as "no data".
pub(crate) const OPTIONAL_READ_STATUSES: &[u16] = &[403, 404, 500];

/// A typed collection endpoint such as `/sales/customers`.
pub struct Resource<'a, T> {
    client: &'a Client,
    path: &'static str,
    label: &'static str,
    _record: PhantomData<T>,
}

impl<'a, T> Resource<'a, T>
where
    T: DeserializeOwned + Serialize,
{
    pub fn new(client: &'a Client, path: &'static str, label: &'static str) -> Self {
        Self {
            client,
            path,
            label,
            _record: PhantomData,
        }
    }

    /// Fetches one page of records.
    pub async fn list(&self, query: &ListQuery) -> Result<Page<T>, PortalError> {
        let value = self
            .client
            .get_json(self.path, query.to_query_pairs())
            .await
            .map_err(|e| report(&format!("list {}", self.label), e))?;
        Ok(Page::from_listing(normalize(value).into_listing())?)
    }

    pub async fn get(&self, id: &RecordId) -> Result<T, PortalError> {
        let value = self
            .client
            .get_json(&record_path(self.path, id), Vec::new())
            .await
            .map_err(|e| report(&format!("get {} {}", self.label, id), e))?;
        Ok(serde_json::from_value(unwrap_record(value))?)
    }

    pub async fn create<B: Serialize + ?Sized>(&self, body: &B) -> Result<T, PortalError> {
        let value = self
            .client
            .send_json(Method::POST, self.path, Some(body))
            .await
            .map_err(|e| report(&format!("create {}", self.label), e))?;
        Ok(serde_json::from_value(unwrap_record(value))?)
    }

    pub async fn update<B: Serialize + ?Sized>(
        &self,
        id: &RecordId,
        body: &B,
    ) -> Result<T, PortalError> {
        let value = self
            .client
            .send_json(Method::PUT, &record_path(self.path, id), Some(body))
            .await
            .map_err(|e| report(&format!("update {} {}", self.label, id), e))?;
        Ok(serde_json::from_value(unwrap_record(value))?)
    }

    /// Moves a record to a new workflow status via `PATCH {path}/{id}/status`.
    /// The backend decides whether the transition is allowed.
    pub async fn update_status(&self, id: &RecordId, status: &str) -> Result<T, PortalError> {
        let path = format!("{}/status", record_path(self.path, id));
        let value = self
            .client
            .send_json(Method::PATCH, &path, Some(&json!({ "status": status })))
            .await
            .map_err(|e| report(&format!("update {} {} status", self.label, id), e))?;
        Ok(serde_json::from_value(unwrap_record(value))?)
    }

    pub async fn delete(&self, id: &RecordId) -> Result<(), PortalError> {
        self.client
            .send_json::<()>(Method::DELETE, &record_path(self.path, id), None)
            .await
            .map_err(|e| report(&format!("delete {} {}", self.label, id), e))?;
        Ok(())
    }
}

/// Fetches a read-only listing that may be missing for the current user.
///
/// HTTP 403/404/500 are logged and yield an empty page with zero counts; any
/// other failure is classified and returned.
pub(crate) async fn optional_listing<T: DeserializeOwned>(
    client: &Client,
    path: &str,
    label: &str,
    query: Vec<(String, String)>,
) -> Result<Page<T>, PortalError> {
    match client.get_json(path, query).await {
        Ok(value) => Ok(Page::from_listing(normalize(value).into_listing())?),
        Err(e) if e.status().is_some_and(|s| OPTIONAL_READ_STATUSES.contains(&s)) => {
            tracing::warn!("{} unavailable ({}), showing no data", label, e);
            Ok(Page::empty())
        }
        Err(e) => Err(report(label, e)),
    }
}
