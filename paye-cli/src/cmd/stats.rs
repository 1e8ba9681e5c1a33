use anyhow::Result;
use clap::Args;

use crate::app::AppContext;

#[derive(Args, Debug)]
pub struct StatsCommand {}

impl StatsCommand {
    pub async fn exec(
        &self,
        ctx: &AppContext,
    ) -> Result<()> {
        let count = ctx.usage().count().await?;
        println!("{count} calculations run");
        Ok(())
    }
}
