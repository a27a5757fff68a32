mod commands;
mod output;

use std::sync::Arc;

use anyhow::{Context, Result};
use bizportal_lib::{ClientConfig, FileSessionStore, PortalClient, Session};
use clap::{Parser, Subcommand};

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "bizportal")]
#[command(about = "Work with the business admin portal from the terminal")]
struct Cli {
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table, global = true)]
    output: OutputFormat,

    /// Backend base URL (overrides BIZPORTAL_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and store the session token
    Login(commands::auth::LoginArgs),
    /// Sign out and forget the stored token
    Logout,
    /// Show the signed-in user
    Whoami(commands::auth::WhoamiArgs),
    /// List records of a collection
    List(commands::list::ListArgs),
    /// Show a single record
    Show(commands::records::RecordArgs),
    /// Delete a record
    Delete(commands::records::RecordArgs),
    /// Move a record to a new workflow status
    SetStatus(commands::records::SetStatusArgs),
    /// Move money between two accounts
    Transfer(commands::transfer::TransferArgs),
    /// Headline counters and recent activity
    Dashboard(commands::dashboard::DashboardArgs),
    /// Department reports
    Report(commands::reports::ReportArgs),
    /// Fetch any collection by its endpoint name as raw records
    Fetch(commands::fetch::FetchArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("bizportal=info".parse()?),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let format = cli.output;

    let mut config = ClientConfig::from_env();
    if let Some(ref url) = cli.api_url {
        config = config.with_base_url(url);
    }

    let session_path = FileSessionStore::default_path();
    let store = FileSessionStore::open(&session_path)
        .with_context(|| format!("cannot load session from {}", session_path.display()))?;
    let client = PortalClient::new(config, Session::new(Arc::new(store)))?.on_unauthorized(
        Arc::new(|| eprintln!("Your session has expired. Run `bizportal login` to sign in again.")),
    );

    match &cli.command {
        Commands::Login(args) => commands::auth::login(args, &client, format).await?,
        Commands::Logout => commands::auth::logout(&client).await?,
        Commands::Whoami(args) => commands::auth::whoami(args, &client, format).await?,
        Commands::List(args) => commands::list::run(args, &client, format).await?,
        Commands::Show(args) => commands::records::show(args, &client, format).await?,
        Commands::Delete(args) => commands::records::delete(args, &client).await?,
        Commands::SetStatus(args) => commands::records::set_status(args, &client, format).await?,
        Commands::Transfer(args) => commands::transfer::run(args, &client, format).await?,
        Commands::Dashboard(args) => commands::dashboard::run(args, &client, format).await?,
        Commands::Report(args) => commands::reports::run(args, &client, format).await?,
        Commands::Fetch(args) => commands::fetch::run(args, &client, format).await?,
    }

    Ok(())
}
