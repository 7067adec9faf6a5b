//! Command handlers and shared replacement setup.

pub mod ap;
pub mod config_cmd;
pub mod switch;

use meraki_rma_core::{DashboardClient, RmaRequest};

use crate::cli::GlobalOpts;
use crate::config;
use crate::error::CliError;
use crate::output::{self, ConsoleProgress};

/// Everything a replacement handler needs before talking to the Dashboard.
pub(crate) struct RunContext {
    pub client: DashboardClient,
    pub progress: ConsoleProgress,
    pub request: RmaRequest,
    pub color: bool,
}

impl RunContext {
    pub fn new(
        global: &GlobalOpts,
        source_serial: String,
        target_serial: String,
        network_name: String,
    ) -> Result<Self, CliError> {
        let rma_config = config::build_rma_config(global)?;
        let client = rma_config.connect()?;
        tracing::debug!(base_url = %client.base_url(), "dashboard client ready");

        let color = output::should_color(&global.color);
        Ok(Self {
            client,
            progress: ConsoleProgress::new(color),
            request: RmaRequest {
                organization_id: rma_config.organization_id,
                network_name,
                source_serial,
                target_serial,
            },
            color,
        })
    }
}

/// Announce a stopped run, then hand the error back for diagnostics.
pub(crate) fn aborted(what: &str, color: bool, err: CliError) -> CliError {
    output::print_failure(&format!("RMA of {what} aborted."), color);
    err
}
