use anyhow::Result;
use bizportal_lib::PortalClient;
use clap::{Args, ValueEnum};

use crate::output::{money, print_records, text, to_values, Column, OutputFormat};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportKind {
    /// Headcount and payroll per department
    Hr,
    /// Revenue per period and product
    Sales,
    /// Per-campaign reach and spend
    Marketing,
    /// Revenue, expenses and profit per period
    Financial,
}

const HR_COLUMNS: &[Column] = &[
    text("department", "Department"),
    text("headcount", "Headcount"),
    money("payroll", "Payroll"),
];

const SALES_COLUMNS: &[Column] = &[
    text("period", "Period"),
    text("product", "Product"),
    text("units", "Units"),
    money("revenue", "Revenue"),
];

const MARKETING_COLUMNS: &[Column] = &[
    text("campaign", "Campaign"),
    text("impressions", "Impressions"),
    text("clicks", "Clicks"),
    text("conversions", "Conversions"),
    money("spend", "Spend"),
];

const FINANCIAL_COLUMNS: &[Column] = &[
    text("period", "Period"),
    money("revenue", "Revenue"),
    money("expenses", "Expenses"),
    money("profit", "Profit"),
];

#[derive(Args)]
pub struct ReportArgs {
    /// Report to show
    #[arg(value_enum)]
    pub kind: ReportKind,

    /// Reporting period, e.g. monthly or 2024-Q1 (sales and financial only)
    #[arg(long)]
    pub period: Option<String>,
}

pub async fn run(args: &ReportArgs, client: &PortalClient, format: OutputFormat) -> Result<()> {
    let period = args.period.as_deref();
    let (rows, columns) = match args.kind {
        ReportKind::Hr => (to_values(&client.hr().headcount_report().await?.items)?, HR_COLUMNS),
        ReportKind::Sales => (
            to_values(&client.sales().report(period).await?.items)?,
            SALES_COLUMNS,
        ),
        ReportKind::Marketing => (
            to_values(&client.marketing().performance().await?.items)?,
            MARKETING_COLUMNS,
        ),
        ReportKind::Financial => (
            to_values(&client.accounting().financial_report(period).await?.items)?,
            FINANCIAL_COLUMNS,
        ),
    };

    if rows.is_empty() {
        eprintln!("No report data available");
    }
    print_records(&rows, columns, format)
}
