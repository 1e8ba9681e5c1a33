use anyhow::{Context, Result};
use clap::Subcommand;

use crate::app::AppContext;
use crate::report;

#[derive(Debug, Subcommand)]
pub enum HistoryCommand {
    /// List saved calculations, newest first
    List,
    /// Show one saved calculation
    Show {
        id: i64,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete one saved calculation
    Delete { id: i64 },
    /// Delete every saved calculation
    Clear,
}

impl HistoryCommand {
    pub async fn exec(
        &self,
        ctx: &AppContext,
    ) -> Result<()> {
        let history = ctx.history();
        let currency = ctx.settings.currency;

        match self {
            Self::List => {
                let entries = history.list().await?;
                println!("{}", report::history_table(&entries, currency));
            }
            Self::Show { id, json } => {
                let entry = history
                    .get(*id)
                    .await
                    .with_context(|| format!("No saved calculation #{id}"))?;

                if *json {
                    println!("{}", serde_json::to_string_pretty(&entry)?);
                } else {
                    println!("Saved {}", entry.timestamp.format("%Y-%m-%d %H:%M:%S"));
                    println!("{}", report::summary_table(&entry.result, currency, None));
                    println!("{}", report::breakdown_table(&entry.result, currency));
                    println!("{}", report::ledger_table(&entry.result, currency));
                }
            }
            Self::Delete { id } => {
                if history.delete(*id).await? {
                    println!("Deleted #{id}");
                } else {
                    anyhow::bail!("No saved calculation #{id}");
                }
            }
            Self::Clear => {
                history.clear().await?;
                println!("History cleared");
            }
        }
        Ok(())
    }
}
