use clap::Parser;
use tracing::debug;

use paye_cli::app::AppContext;
use paye_cli::cli::Cli;
use paye_cli::cmd;
use paye_cli::config::{FileConfig, Settings};
use paye_cli::logging::init_logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let file = FileConfig::load(cli.global.config.as_deref())?;
    let settings = Settings::resolve(file, &cli.global)?;
    init_logging(&settings.log_level, cli.global.log_file.as_deref())?;
    debug!(db = ?settings.db, currency = %settings.currency, "resolved settings");

    let ctx = AppContext::open(settings).await?;
    cmd::run(&cli.command, &ctx).await
}
