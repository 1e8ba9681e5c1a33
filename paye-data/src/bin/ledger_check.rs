use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use paye_core::{CategoryTable, validate_request};
use paye_data::{LedgerLoader, PeriodMode};

/// Check a ledger CSV without running a calculation.
///
/// The CSV file should have the following columns:
/// - period: month name (Jan or January); ignored with --annual
/// - kind: income or expense
/// - description: income description or expense category
/// - amount: thousands separators allowed
/// - tax_deductible, bank, date, receipt_ref: optional
#[derive(Parser, Debug)]
#[command(name = "paye-ledger-check")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the ledger CSV file
    #[arg(short, long)]
    file: PathBuf,

    /// Treat every row as part of one full-year period
    #[arg(short, long, default_value_t = false)]
    annual: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let file = File::open(&args.file)
        .with_context(|| format!("Failed to open: {}", args.file.display()))?;

    let mode = if args.annual {
        PeriodMode::Annual
    } else {
        PeriodMode::Monthly
    };

    let periods = LedgerLoader::load(file, mode, &CategoryTable::common())
        .with_context(|| format!("Failed to load ledger: {}", args.file.display()))?;

    for period in &periods {
        println!(
            "{:<10} {} income, {} expense",
            period.label,
            period.income_sources.len(),
            period.expenses.len()
        );
    }

    validate_request(&periods, None).context("Ledger is not ready for calculation")?;
    println!("Ledger OK: {} period(s).", periods.len());

    Ok(())
}
