// meraki-rma-api: Async Rust client for the Meraki Dashboard API v1
//
// Covers the calls a device replacement needs: organization inventory,
// network membership, switch stacks and link aggregations, device
// attributes, and wireless radio settings.

pub mod client;
pub mod devices;
pub mod error;
pub mod networks;
pub mod organizations;
pub mod switch;
pub mod transport;
pub mod types;
pub mod wireless;

pub use client::{DEFAULT_BASE_URL, DashboardClient};
pub use error::Error;
pub use transport::{TlsMode, TransportConfig};
