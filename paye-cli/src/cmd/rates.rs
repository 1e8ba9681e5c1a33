use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::report;

#[derive(Args, Debug)]
pub struct RatesCommand {}

impl RatesCommand {
    pub fn exec(
        &self,
        ctx: &AppContext,
    ) -> Result<()> {
        println!("Statutory PAYE bands (annual)");
        println!("{}", report::bands_table(ctx.settings.currency));
        println!("Flat rates (use with --special)");
        println!("{}", report::rates_table());
        Ok(())
    }
}
