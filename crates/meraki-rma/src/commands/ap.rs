//! `meraki-rma ap` handler.

use meraki_rma_core::Rma;

use super::{RunContext, aborted};
use crate::cli::{ApArgs, GlobalOpts};
use crate::error::CliError;

pub async fn handle(args: ApArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let ctx = RunContext::new(
        global,
        args.source_serial,
        args.target_serial,
        args.network_name,
    )?;
    let what = format!("ap {}", ctx.request.source_serial);

    run(&ctx, args.rf_profile.as_deref())
        .await
        .map_err(|e| aborted(&what, ctx.color, e))
}

async fn run(ctx: &RunContext, rf_profile: Option<&str>) -> Result<(), CliError> {
    let rma = Rma::prepare(&ctx.client, &ctx.progress, ctx.request.clone()).await?;
    rma.replace_access_point(rf_profile).await?;
    Ok(())
}
