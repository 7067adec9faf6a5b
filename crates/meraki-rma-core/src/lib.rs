//! Device replacement (RMA) workflow for Meraki switches and access points.
//!
//! This crate sits between `meraki-rma-api` and the CLI:
//!
//! - **[`Dashboard`]**: the remote calls the workflow needs. Implemented
//!   for [`meraki_rma_api::DashboardClient`]; tests substitute an in-memory
//!   fake.
//!
//! - **Operation groups** ([`ops`]): [`OrganizationOps`], [`NetworkOps`],
//!   [`SwitchOps`] and [`AccessPointOps`], each borrowing one `Dashboard`.
//!   The decisions they make (stack match, aggregation repair, retired
//!   names) are exposed as pure functions.
//!
//! - **[`Rma`]**: resolves the network once, then runs the switch or
//!   access point replacement step by step, reporting each completed step
//!   as an [`RmaEvent`] to a [`Progress`] sink. The first failure ends the
//!   run.

pub mod config;
pub mod dashboard;
pub mod error;
pub mod ops;
pub mod progress;
pub mod workflow;

#[cfg(test)]
mod test_support;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{RmaConfig, TlsVerification};
pub use dashboard::Dashboard;
pub use error::CoreError;
pub use ops::{
    AccessPointOps, AggregateAction, NetworkOps, OrganizationOps, ResolvedNetwork, SwitchOps,
};
pub use progress::{DeviceClass, Progress, RmaEvent, Tone};
pub use workflow::{Rma, RmaRequest};

// Wire types callers need to drive individual operations.
pub use meraki_rma_api::{DEFAULT_BASE_URL, DashboardClient};
pub use meraki_rma_api::types::{Device, LinkAggregation, SwitchPort, SwitchStack};
