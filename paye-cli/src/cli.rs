use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::cmd::{CalculateCommand, HistoryCommand, RatesCommand, RemindersCommand, StatsCommand};

/// Nigerian PAYE calculator.
///
/// Reads income and expenses from a ledger CSV, applies the statutory
/// bands (or a flat rate), and keeps a short history of results.
#[derive(Debug, Parser)]
#[command(name = "paye", version, about)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Flags accepted before or after any subcommand. Each one overrides the
/// matching `paye.toml` key.
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalArgs {
    /// Config file (defaults to ./paye.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Storage backend: memory or sqlite
    #[arg(long, global = true)]
    pub backend: Option<String>,

    /// Database path for the sqlite backend (implies --backend sqlite)
    #[arg(long, global = true)]
    pub db: Option<String>,

    /// Display currency: NGN, USD, GBP or EUR
    #[arg(long, global = true)]
    pub currency: Option<String>,

    /// Also append logs to this file
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Owner of reminders
    #[arg(long, global = true)]
    pub user: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Calculate PAYE for a ledger file
    Calculate(CalculateCommand),
    /// Show or manage saved calculations
    #[command(subcommand)]
    History(HistoryCommand),
    /// Manage filing reminders
    #[command(subcommand)]
    Reminders(RemindersCommand),
    /// Show the usage counter
    Stats(StatsCommand),
    /// List the statutory bands and flat rates
    Rates(RatesCommand),
}
