//! Calculate command - loads a ledger, computes PAYE, and records the run

use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use paye_core::{TaxMode, TaxResult, compute_checked};
use paye_data::{LedgerLoader, PeriodMode};
use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::app::AppContext;
use crate::report;
use crate::utils::parse_decimal;

#[derive(Args, Debug)]
pub struct CalculateCommand {
    /// Ledger CSV (period, kind, description, amount, ...)
    #[arg(short, long)]
    pub file: PathBuf,

    /// Treat every row as part of one full-year period
    #[arg(short, long)]
    pub annual: bool,

    /// Flat percentage of gross instead of the statutory bands
    #[arg(long, value_parser = parse_decimal, conflicts_with = "special")]
    pub rate: Option<Decimal>,

    /// Named flat rate, e.g. "VAT (Sales Tax)" (see `paye rates`)
    #[arg(long)]
    pub special: Option<String>,

    /// Print the full result as JSON
    #[arg(long)]
    pub json: bool,

    /// Also print the ledger table
    #[arg(long)]
    pub ledger: bool,

    /// Do not add the result to history
    #[arg(long)]
    pub no_save: bool,
}

/// Outcome of one calculate run.
#[derive(Debug)]
pub struct Calculation {
    pub result: TaxResult,
    pub saved_id: Option<i64>,
    /// `None` when the counter could not be updated.
    pub usage_count: Option<u64>,
}

impl CalculateCommand {
    pub fn tax_mode(&self) -> TaxMode {
        match (&self.rate, &self.special) {
            (Some(rate), _) => TaxMode::Flat(*rate),
            (None, Some(label)) => TaxMode::Special(label.clone()),
            (None, None) => TaxMode::Statutory,
        }
    }

    fn period_mode(&self) -> PeriodMode {
        if self.annual {
            PeriodMode::Annual
        } else {
            PeriodMode::Monthly
        }
    }

    pub async fn calculate(
        &self,
        ctx: &AppContext,
    ) -> Result<Calculation> {
        let override_rate = self.tax_mode().override_rate()?;

        let file = File::open(&self.file)
            .with_context(|| format!("Failed to open: {}", self.file.display()))?;
        let periods = LedgerLoader::load(file, self.period_mode(), &ctx.settings.categories)
            .with_context(|| format!("Failed to load ledger: {}", self.file.display()))?;
        debug!(periods = periods.len(), "loaded ledger");

        let result =
            compute_checked(&periods, override_rate).context("Ledger is not ready for calculation")?;

        // Bookkeeping failures below do not invalidate the calculation
        let usage_count = match ctx.usage().increment().await {
            Ok(count) => Some(count),
            Err(e) => {
                warn!(error = %e, "could not update usage counter");
                None
            }
        };

        let saved_id = if self.no_save {
            None
        } else {
            match ctx.history().save(result.clone()).await {
                Ok(saved) => Some(saved.id),
                Err(e) => {
                    warn!(error = %e, "could not save calculation to history");
                    None
                }
            }
        };

        Ok(Calculation {
            result,
            saved_id,
            usage_count,
        })
    }

    pub async fn exec(
        &self,
        ctx: &AppContext,
    ) -> Result<()> {
        let calculation = self.calculate(ctx).await?;
        let result = &calculation.result;

        if self.json {
            println!("{}", serde_json::to_string_pretty(result)?);
            return Ok(());
        }

        let currency = ctx.settings.currency;
        println!("{}", report::summary_table(result, currency, Some(&self.tax_mode().describe())));
        println!("{}", report::breakdown_table(result, currency));
        if self.ledger {
            println!("{}", report::ledger_table(result, currency));
        }
        if let Some(id) = calculation.saved_id {
            println!("Saved as #{id}");
        }
        Ok(())
    }
}
