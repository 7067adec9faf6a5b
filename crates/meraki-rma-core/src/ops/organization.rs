// ── Organization-scoped operations ──

use meraki_rma_api::types::{ClaimRequest, ClaimResponse, InventoryDevice};
use tracing::debug;

use crate::dashboard::Dashboard;
use crate::error::CoreError;
use crate::progress::{Progress, RmaEvent};

/// Claims and inventory lookups for one organization.
pub struct OrganizationOps<'a, D> {
    dashboard: &'a D,
    progress: &'a dyn Progress,
    organization_id: &'a str,
}

impl<'a, D: Dashboard> OrganizationOps<'a, D> {
    pub fn new(dashboard: &'a D, progress: &'a dyn Progress, organization_id: &'a str) -> Self {
        Self {
            dashboard,
            progress,
            organization_id,
        }
    }

    /// Claim a serial into the organization inventory.
    ///
    /// Claiming a serial the organization already owns succeeds.
    pub async fn claim_serial(&self, serial: &str) -> Result<ClaimResponse, CoreError> {
        let claimed = self
            .dashboard
            .claim_into_organization(self.organization_id, &ClaimRequest::serial(serial))
            .await?;
        debug!(serials = ?claimed.serials, "claim accepted");
        self.progress.report(RmaEvent::SerialClaimed {
            serial: serial.to_owned(),
        });
        Ok(claimed)
    }

    /// Claim every device of a purchase order.
    ///
    /// The Dashboard does not say which serials the order contained, so
    /// the result is of little use for a replacement run.
    pub async fn claim_order(&self, order: &str) -> Result<ClaimResponse, CoreError> {
        let claimed = self
            .dashboard
            .claim_into_organization(self.organization_id, &ClaimRequest::order(order))
            .await?;
        self.progress.report(RmaEvent::OrderClaimed {
            order: order.to_owned(),
        });
        Ok(claimed)
    }

    /// Release a serial from the organization.
    ///
    /// The Dashboard offers no way to unclaim a single device, so this
    /// always fails without issuing a request.
    #[allow(clippy::unused_async)]
    pub async fn release_serial(&self, serial: &str) -> Result<(), CoreError> {
        Err(CoreError::Unsupported {
            operation: format!("release {serial} from organization {}", self.organization_id),
            reason: "the Dashboard API cannot unclaim devices".into(),
        })
    }

    pub async fn inventory_device(&self, serial: &str) -> Result<InventoryDevice, CoreError> {
        self.dashboard
            .get_inventory_device(self.organization_id, serial)
            .await
    }
}
