use anyhow::Result;
use bizportal_lib::types::RecordId;
use bizportal_lib::{validation, PortalClient, PortalError, Resource};
use clap::Args;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::resources::{with_resource, ResourceKind};
use crate::output::{print_record, OutputFormat};

#[derive(Args)]
pub struct RecordArgs {
    /// Collection the record belongs to
    #[arg(value_enum)]
    pub resource: ResourceKind,

    /// Record id
    pub id: String,
}

#[derive(Args)]
pub struct SetStatusArgs {
    /// Collection the record belongs to
    #[arg(value_enum)]
    pub resource: ResourceKind,

    /// Record id
    pub id: String,

    /// New workflow status (e.g. approved, resolved, shipped)
    pub status: String,
}

pub async fn show(args: &RecordArgs, client: &PortalClient, format: OutputFormat) -> Result<()> {
    let id = validation::validate_id(&args.id)?;
    let record = with_resource!(client, args.resource, |resource| {
        fetch_one(&resource, &id).await
    })?;
    print_record(&record, format)
}

pub async fn delete(args: &RecordArgs, client: &PortalClient) -> Result<()> {
    let id = validation::validate_id(&args.id)?;
    with_resource!(client, args.resource, |resource| resource.delete(&id).await)?;
    eprintln!("Deleted {} record {}", args.resource.label(), id);
    Ok(())
}

pub async fn set_status(
    args: &SetStatusArgs,
    client: &PortalClient,
    format: OutputFormat,
) -> Result<()> {
    let id = validation::validate_id(&args.id)?;
    let status = validation::validate_status(&args.status)?;
    let record = with_resource!(client, args.resource, |resource| {
        change_status(&resource, &id, &status).await
    })?;
    eprintln!("Status of {} record {} is now {}", args.resource.label(), id, status);
    print_record(&record, format)
}

async fn fetch_one<T>(resource: &Resource<'_, T>, id: &RecordId) -> Result<Value, PortalError>
where
    T: DeserializeOwned + Serialize,
{
    let record = resource.get(id).await?;
    Ok(serde_json::to_value(record)?)
}

async fn change_status<T>(
    resource: &Resource<'_, T>,
    id: &RecordId,
    status: &str,
) -> Result<Value, PortalError>
where
    T: DeserializeOwned + Serialize,
{
    let record = resource.update_status(id, status).await?;
    Ok(serde_json::to_value(record)?)
}
