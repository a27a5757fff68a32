use anyhow::Result;
use bizportal_lib::{
    load_page, validation, ListQuery, PaginationState, PortalClient, PortalError, Resource,
    SortDirection,
};
use clap::Args;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::resources::{with_resource, ResourceKind};
use crate::output::{print_records, to_values, OutputFormat};

/// Upper bound on pages fetched by `--all`.
const MAX_PAGES: u64 = 500;

#[derive(Args)]
pub struct ListArgs {
    /// Collection to list
    #[arg(value_enum)]
    pub resource: ResourceKind,

    /// Page number
    #[arg(long, default_value = "1")]
    pub page: u64,

    /// Results per page
    #[arg(long, default_value = "10")]
    pub page_size: u64,

    /// Free-text search
    #[arg(long)]
    pub search: Option<String>,

    /// Filter by workflow status (e.g. active, open, approved)
    #[arg(long)]
    pub status: Option<String>,

    /// Sort field, as named by the backend (e.g. createdAt, name)
    #[arg(long)]
    pub sort_by: Option<String>,

    /// Sort ascending instead of descending
    #[arg(long)]
    pub asc: bool,

    /// Keep fetching pages until the last one
    #[arg(long)]
    pub all: bool,

    /// Never issue the extra count request for a full first page without totals
    #[arg(long)]
    pub no_probe: bool,
}

pub async fn run(args: &ListArgs, client: &PortalClient, format: OutputFormat) -> Result<()> {
    let page = validation::validate_page(args.page)?;
    let page_size = validation::validate_page_size(args.page_size)?;

    let mut query = ListQuery::default().with_limit(page_size);
    if let Some(ref search) = args.search {
        query = query.with_search(&validation::validate_search(search)?);
    }
    if let Some(ref status) = args.status {
        query = query.with_filter("status", &validation::validate_status(status)?);
    }
    if let Some(ref sort_by) = args.sort_by {
        query = query.with_sort_by(&validation::validate_search(sort_by)?);
        if args.asc {
            query = query.with_sort_direction(SortDirection::Asc);
        }
    }

    let mut state = PaginationState::new(page_size);
    if args.no_probe {
        state = state.without_probe();
    }

    let records = with_resource!(client, args.resource, |resource| {
        fetch_pages(&resource, &mut state, &query, page, args.all).await
    })?;

    eprintln!("{}", page_summary(&state, args.resource.label()));
    print_records(&records, args.resource.columns(), format)
}

async fn fetch_pages<T>(
    resource: &Resource<'_, T>,
    state: &mut PaginationState,
    query: &ListQuery,
    first: u64,
    all: bool,
) -> Result<Vec<Value>, PortalError>
where
    T: DeserializeOwned + Serialize,
{
    let mut records = Vec::new();
    let mut page = first;
    loop {
        let items = load_page(state, page, |page, limit| {
            let query = query.clone().with_page(page).with_limit(limit);
            async move { resource.list(&query).await }
        })
        .await?;
        let fetched = items.len();
        records.extend(to_values(&items)?);

        if !all || fetched == 0 || page >= state.total_pages {
            break;
        }
        if page - first + 1 >= MAX_PAGES {
            tracing::warn!("Stopped after {} pages", MAX_PAGES);
            break;
        }
        page += 1;
    }
    Ok(records)
}

/// `Page 2/5 (47 total customers)`; estimated totals are marked as such.
fn page_summary(state: &PaginationState, label: &str) -> String {
    if state.is_authoritative() {
        format!(
            "Page {}/{} ({} total {})",
            state.page, state.total_pages, state.total_items, label
        )
    } else {
        format!(
            "Page {}/{} (about {} {}, estimated)",
            state.page, state.total_pages, state.total_items, label
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bizportal_lib::bizportal_api::PageMeta;

    #[test]
    fn summary_for_server_totals() {
        let mut state = PaginationState::new(10);
        state.apply(
            2,
            10,
            &PageMeta {
                total: Some(47),
                ..PageMeta::default()
            },
        );
        assert_eq!(
            page_summary(&state, "customers"),
            "Page 2/5 (47 total customers)"
        );
    }

    #[test]
    fn summary_for_estimates() {
        let mut state = PaginationState::new(10).without_probe();
        state.apply(1, 10, &PageMeta::default());
        assert_eq!(
            page_summary(&state, "tickets"),
            "Page 1/2 (about 11 tickets, estimated)"
        );
    }
}
