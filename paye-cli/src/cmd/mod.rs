pub mod calculate;
pub mod history;
pub mod rates;
pub mod reminders;
pub mod stats;

pub use calculate::{CalculateCommand, Calculation};
pub use history::HistoryCommand;
pub use rates::RatesCommand;
pub use reminders::{AddReminder, RemindersCommand};
pub use stats::StatsCommand;

use anyhow::Result;

use crate::app::AppContext;
use crate::cli::Command;

pub async fn run(
    command: &Command,
    ctx: &AppContext,
) -> Result<()> {
    match command {
        Command::Calculate(cmd) => cmd.exec(ctx).await,
        Command::History(cmd) => cmd.exec(ctx).await,
        Command::Reminders(cmd) => cmd.exec(ctx).await,
        Command::Stats(cmd) => cmd.exec(ctx).await,
        Command::Rates(cmd) => cmd.exec(ctx),
    }
}
