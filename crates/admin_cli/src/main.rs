//! Operator CLI for the remittance desk's remote store.
//!
//! Three operations: probe connectivity, pull the remote datasets, and push
//! a local data file as one best-effort sync batch.

use std::{error::Error, path::PathBuf, process::ExitCode};

use api_types::{ClientRecord, InvoiceRecord};
use clap::{Args, Parser, Subcommand};
use gateway::{HttpStore, RemoteStore};
use serde::Deserialize;

mod settings;

#[derive(Parser, Debug)]
#[command(name = "remit_admin")]
#[command(about = "Admin utilities for the remittance desk (connectivity, pull, sync)")]
struct Cli {
    /// Optional config file path (TOML).
    #[arg(long)]
    config: Option<String>,
    /// Override the remote store base URL.
    #[arg(long)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Probe the remote store and report the result.
    TestConnection,
    /// Fetch every remote dataset and print per-category counts.
    Pull,
    /// Push a local data file to the remote store.
    Sync(SyncArgs),
}

#[derive(Args, Debug)]
struct SyncArgs {
    /// JSON file holding the desk's local data.
    #[arg(long)]
    file: PathBuf,
}

/// On-disk shape of the desk's local data file.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct LocalData {
    transactions: Vec<engine::Transaction>,
    clients: Vec<ClientRecord>,
    invoices: Vec<InvoiceRecord>,
    exchange_rates: Vec<engine::ExchangeRate>,
}

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<ExitCode, Box<dyn Error + Send + Sync>> {
    let cli = Cli::parse();

    let config_path = cli
        .config
        .as_deref()
        .unwrap_or(settings::DEFAULT_CONFIG_PATH);
    let mut settings = settings::load(config_path)?;
    if let Some(base_url) = cli.base_url {
        settings.base_url = base_url;
    }

    let level = &settings.log;
    tracing_subscriber::fmt()
        .with_env_filter(format!("admin_cli={level},gateway={level},engine={level}"))
        .init();

    let store = HttpStore::new(&settings.base_url)?;

    match cli.command {
        Command::TestConnection => {
            let status = gateway::test_connection(&store).await;
            println!("{}", status.message);
            if !status.success {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Pull => {
            let transactions = store.fetch_transactions().await?;
            let clients = store.fetch_clients().await?;
            let invoices = store.fetch_invoices().await?;
            let rates = store.fetch_rates().await?;

            println!("transactions:   {}", transactions.len());
            println!("clients:        {}", clients.len());
            println!("invoices:       {}", invoices.len());
            println!("exchange rates: {}", rates.len());
        }
        Command::Sync(args) => {
            let raw = std::fs::read_to_string(&args.file)?;
            let data: LocalData = serde_json::from_str(&raw)?;
            let request = gateway::batch(
                &data.transactions,
                &data.clients,
                &data.invoices,
                &data.exchange_rates,
            );

            let report = gateway::sync(&store, &request).await;
            println!("synced {} records", report.synced());
            for error in &report.errors {
                eprintln!("failed: {error}");
            }
            if !report.success() {
                return Ok(ExitCode::FAILURE);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
