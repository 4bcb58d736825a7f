//! Shared implementation for the prodcfg-fetch command.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use prodcfg_client::{ApiClient, ReferenceData};
use prodcfg_core::EntityId;
use std::io::{self, Write};
use std::process::ExitCode;

/// Pull reference data or a product configuration from a live API.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Base URL of the back-office API
    #[arg(long, value_name = "URL")]
    pub base_url: String,

    /// What to fetch
    #[command(subcommand)]
    pub target: Target,

    /// Print raw JSON instead of one line per entity
    #[arg(long)]
    pub json: bool,
}

/// Fetch targets.
#[derive(Subcommand, Debug)]
pub enum Target {
    /// Active chart-of-accounts entries
    ChartOfAccounts,
    /// Active ledger accounts
    LedgerAccounts,
    /// A product's full configuration row set
    Configuration {
        /// The product id
        #[arg(value_name = "PRODUCT_ID")]
        product_id: EntityId,
    },
}

/// Main entry point for the fetch command.
pub fn main() -> ExitCode {
    crate::cmd::init_logging();
    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(1)
        }
    }
}

/// Run the fetch command.
pub fn run(args: &Args) -> Result<()> {
    let client = ApiClient::new(&args.base_url);
    let stdout = io::stdout();
    let mut handle = stdout.lock();

    match &args.target {
        Target::ChartOfAccounts => {
            let mut reference = ReferenceData::new();
            reference
                .refresh(&client)
                .context("failed to fetch reference data")?;
            if args.json {
                let json = serde_json::to_string_pretty(reference.chart_of_accounts())?;
                writeln!(handle, "{json}")?;
            } else {
                for entry in reference.chart_of_accounts() {
                    writeln!(
                        handle,
                        "{:<20} {:<10} L{} {}",
                        entry.code, entry.account_type, entry.level, entry.name
                    )?;
                }
            }
        }
        Target::LedgerAccounts => {
            let mut reference = ReferenceData::new();
            reference
                .refresh(&client)
                .context("failed to fetch reference data")?;
            if args.json {
                let json = serde_json::to_string_pretty(reference.ledger_accounts())?;
                writeln!(handle, "{json}")?;
            } else {
                for account in reference.ledger_accounts() {
                    writeln!(
                        handle,
                        "{:<20} {:<10} {} {} {}",
                        account.code,
                        account.account_type,
                        account.currency,
                        account.balance,
                        account.name
                    )?;
                }
            }
        }
        Target::Configuration { product_id } => {
            let configuration = client
                .product_configuration(*product_id)
                .with_context(|| format!("failed to fetch configuration for {product_id}"))?;
            let json = serde_json::to_string_pretty(&configuration)?;
            writeln!(handle, "{json}")?;
        }
    }

    Ok(())
}
