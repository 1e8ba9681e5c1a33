use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Args, Subcommand};
use paye_core::services::{REMINDER_TAX_TYPES, suggest_due_date};
use paye_core::{NewTaxReminder, TaxReminder};
use rust_decimal::Decimal;
use tracing::warn;

use crate::app::AppContext;
use crate::report;
use crate::utils::{parse_date, parse_decimal};

#[derive(Debug, Subcommand)]
pub enum RemindersCommand {
    /// Add a filing reminder
    Add(AddReminder),
    /// List your reminders by due date
    List,
    /// Known tax types and their next suggested due date
    Types,
    /// Mark a reminder as done
    Complete { id: i64 },
    /// Mark a reminder as pending again
    Reopen { id: i64 },
    /// Delete a reminder
    Delete { id: i64 },
}

#[derive(Args, Debug)]
pub struct AddReminder {
    /// e.g. "PAYE Tax" or "VAT (Sales Tax)"
    #[arg(long)]
    pub tax_type: String,

    /// YYYY-MM-DD; defaults to the next filing deadline for the tax type
    #[arg(long, value_parser = parse_date)]
    pub due: Option<NaiveDate>,

    #[arg(long, value_parser = parse_decimal)]
    pub amount: Option<Decimal>,

    #[arg(long)]
    pub notes: Option<String>,
}

impl AddReminder {
    pub fn into_new(
        &self,
        user_id: &str,
        today: NaiveDate,
    ) -> NewTaxReminder {
        if !REMINDER_TAX_TYPES.contains(&self.tax_type.as_str()) {
            warn!(tax_type = %self.tax_type, "not a known tax type");
        }

        NewTaxReminder {
            user_id: user_id.to_string(),
            tax_type: self.tax_type.clone(),
            due_date: self
                .due
                .unwrap_or_else(|| suggest_due_date(&self.tax_type, today)),
            amount: self.amount,
            notes: self.notes.clone(),
        }
    }
}

impl RemindersCommand {
    pub async fn exec(
        &self,
        ctx: &AppContext,
    ) -> Result<()> {
        let reminders = ctx.reminders();
        let user = ctx.settings.user.as_str();
        let currency = ctx.settings.currency;
        let today = Local::now().date_naive();

        match self {
            Self::Add(add) => {
                let added = reminders.add(add.into_new(user, today)).await?;
                println!("Added #{} {} due {}", added.id, added.tax_type, added.due_date);
            }
            Self::List => {
                let listed = reminders.list_for_user(user).await?;
                println!("{}", report::reminders_table(&listed, currency));
                let outstanding = reminders.outstanding_total(user).await?;
                println!("Outstanding: {}", currency.format(outstanding));
            }
            Self::Types => {
                for tax_type in REMINDER_TAX_TYPES {
                    println!("{tax_type:<20} next due {}", suggest_due_date(tax_type, today));
                }
            }
            Self::Complete { id } => {
                let updated = set_completed(ctx, *id, true).await?;
                println!("Completed #{} {}", updated.id, updated.tax_type);
            }
            Self::Reopen { id } => {
                let updated = set_completed(ctx, *id, false).await?;
                println!("Reopened #{} {}", updated.id, updated.tax_type);
            }
            Self::Delete { id } => {
                if reminders.delete(*id).await? {
                    println!("Deleted #{id}");
                } else {
                    anyhow::bail!("No reminder #{id}");
                }
            }
        }
        Ok(())
    }
}

async fn set_completed(
    ctx: &AppContext,
    id: i64,
    is_completed: bool,
) -> Result<TaxReminder> {
    ctx.reminders()
        .set_completed(id, is_completed)
        .await
        .with_context(|| format!("No reminder #{id}"))
}
