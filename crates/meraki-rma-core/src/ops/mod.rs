// ── Domain operation groups ──
//
// One struct per Dashboard area, each borrowing the shared `Dashboard`
// and `Progress` sink. The `Rma` orchestrator composes them; they are also
// usable on their own for one-off calls.

pub mod access_point;
pub mod metadata;
pub mod network;
pub mod organization;
pub mod switch;

pub use access_point::AccessPointOps;
pub use metadata::{MetadataPlan, copy_metadata, plan_metadata_copy, retired_name};
pub use network::{NetworkOps, ResolvedNetwork, check_membership, find_network};
pub use organization::OrganizationOps;
pub use switch::{AggregateAction, SwitchOps, match_stack, plan_aggregate};
