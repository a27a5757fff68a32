use anyhow::Result;
use bizportal_lib::{validation, PortalClient};
use clap::Args;

use crate::output::{print_record, OutputFormat};

#[derive(Args)]
pub struct TransferArgs {
    /// Source account id
    #[arg(long)]
    pub from: String,

    /// Destination account id
    #[arg(long)]
    pub to: String,

    /// Amount to move (at least 1)
    #[arg(long)]
    pub amount: String,

    /// Free-text memo stored with the transaction
    #[arg(long)]
    pub description: Option<String>,
}

pub async fn run(args: &TransferArgs, client: &PortalClient, format: OutputFormat) -> Result<()> {
    let from = validation::validate_id(&args.from)?;
    let to = validation::validate_id(&args.to)?;
    let amount = validation::validate_amount(&args.amount)?;
    let description = match &args.description {
        Some(d) => Some(validation::validate_search(d)?),
        None => None,
    };

    let tx = client
        .accounting()
        .transfer_funds(from, to, amount, description.as_deref())
        .await?;
    eprintln!("Transfer recorded");
    print_record(&serde_json::to_value(tx)?, format)
}
