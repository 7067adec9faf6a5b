//! `meraki-rma switch` handler.

use meraki_rma_core::Rma;

use super::{RunContext, aborted};
use crate::cli::{GlobalOpts, SwitchArgs};
use crate::error::CliError;

pub async fn handle(args: SwitchArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let ctx = RunContext::new(
        global,
        args.source_serial,
        args.target_serial,
        args.network_name,
    )?;
    let what = format!("switch {}", ctx.request.source_serial);

    run(&ctx).await.map_err(|e| aborted(&what, ctx.color, e))
}

async fn run(ctx: &RunContext) -> Result<(), CliError> {
    let rma = Rma::prepare(&ctx.client, &ctx.progress, ctx.request.clone()).await?;
    rma.replace_switch().await?;
    Ok(())
}
