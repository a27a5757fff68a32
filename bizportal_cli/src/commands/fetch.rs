use anyhow::Result;
use bizportal_lib::bizportal_api::endpoints::ENDPOINTS;
use bizportal_lib::{validation, ListQuery, PortalClient};
use clap::Args;

use crate::output::{print_json, render_detail, OutputFormat};

#[derive(Args)]
pub struct FetchArgs {
    /// Logical endpoint name, e.g. sales.orders (see --names)
    #[arg(required_unless_present = "names")]
    pub endpoint: Option<String>,

    /// Page number
    #[arg(long, default_value = "1")]
    pub page: u64,

    /// Results per page
    #[arg(long, default_value = "10")]
    pub page_size: u64,

    /// Print the known endpoint names and exit
    #[arg(long)]
    pub names: bool,
}

pub async fn run(args: &FetchArgs, client: &PortalClient, format: OutputFormat) -> Result<()> {
    let Some(name) = args.endpoint.as_deref().filter(|_| !args.names) else {
        for (name, path) in ENDPOINTS {
            println!("{:<28} {}", name, path);
        }
        return Ok(());
    };

    let query = ListQuery::default()
        .with_page(validation::validate_page(args.page)?)
        .with_limit(validation::validate_page_size(args.page_size)?);
    let listing = client.list_named(name, &query).await?;

    eprintln!("{} records ({} total)", listing.items.len(), listing.total);
    match format {
        OutputFormat::Json => print_json(&listing.items),
        _ => {
            for item in &listing.items {
                println!("{}", render_detail(item));
            }
        }
    }
    Ok(())
}
