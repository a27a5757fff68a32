use anyhow::Result;
use bizportal_lib::types::DashboardSummary;
use bizportal_lib::PortalClient;
use clap::Args;
use serde_json::json;

use crate::output::{
    date, money, print_json, print_records, text, to_values, Column, OutputFormat,
};

const ACTIVITY_COLUMNS: &[Column] = &[
    date("timestamp", "When"),
    text("user", "User"),
    text("module", "Module"),
    text("action", "Action"),
];

const SUMMARY_COLUMNS: &[Column] = &[
    text("employees", "Employees"),
    text("customers", "Customers"),
    text("openTickets", "Open Tickets"),
    text("activeCampaigns", "Active Campaigns"),
    money("monthlyRevenue", "Monthly Revenue"),
];

#[derive(Args)]
pub struct DashboardArgs {
    /// Number of recent activity entries to show (0 to skip)
    #[arg(long, default_value = "10")]
    pub activity: u64,
}

pub async fn run(args: &DashboardArgs, client: &PortalClient, format: OutputFormat) -> Result<()> {
    let dashboard = client.dashboard();
    let summary = dashboard.summary().await?;
    let activity = if args.activity > 0 {
        dashboard.recent_activity(args.activity).await?.items
    } else {
        Vec::new()
    };

    if format == OutputFormat::Json {
        print_json(&json!({ "summary": summary, "activity": activity }));
        return Ok(());
    }

    print_records(&[summary_row(&summary)], SUMMARY_COLUMNS, format)?;
    if !activity.is_empty() {
        println!();
        print_records(&to_values(&activity)?, ACTIVITY_COLUMNS, format)?;
    }
    Ok(())
}

/// Counters the backend did not send show as `-`.
fn summary_row(summary: &DashboardSummary) -> serde_json::Value {
    fn count(v: Option<u64>) -> serde_json::Value {
        v.map(|n| json!(n)).unwrap_or_else(|| json!("-"))
    }
    json!({
        "employees": count(summary.total_employees),
        "customers": count(summary.total_customers),
        "openTickets": count(summary.open_tickets),
        "activeCampaigns": count(summary.active_campaigns),
        "monthlyRevenue": summary.monthly_revenue.map(|r| json!(r)).unwrap_or_else(|| json!("-")),
    })
}
