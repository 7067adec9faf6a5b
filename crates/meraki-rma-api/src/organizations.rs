// Organization-scoped endpoints
//
// Network listing, inventory claims, and the switch clone call, which the
// Dashboard exposes under the organization rather than the network.

use tracing::debug;

use crate::client::DashboardClient;
use crate::error::Error;
use crate::types::{ClaimRequest, ClaimResponse, CloneRequest, InventoryDevice, Network};

impl DashboardClient {
    /// List every network in the organization, following pagination.
    ///
    /// `GET /organizations/{organizationId}/networks`
    pub async fn list_networks(&self, organization_id: &str) -> Result<Vec<Network>, Error> {
        debug!(organization_id, "listing networks");
        self.get_all(&["organizations", organization_id, "networks"])
            .await
    }

    /// Claim serials and/or orders into the organization inventory.
    ///
    /// `POST /organizations/{organizationId}/claim`
    pub async fn claim_into_organization(
        &self,
        organization_id: &str,
        request: &ClaimRequest,
    ) -> Result<ClaimResponse, Error> {
        debug!(organization_id, ?request, "claiming into organization");
        self.post(&["organizations", organization_id, "claim"], request)
            .await
    }

    /// Fetch a single inventory record.
    ///
    /// `GET /organizations/{organizationId}/inventory/devices/{serial}`
    pub async fn get_inventory_device(
        &self,
        organization_id: &str,
        serial: &str,
    ) -> Result<InventoryDevice, Error> {
        self.get(&[
            "organizations",
            organization_id,
            "inventory",
            "devices",
            serial,
        ])
        .await
    }

    /// Copy the full switch configuration of `source_serial` onto the targets.
    ///
    /// `POST /organizations/{organizationId}/switch/devices/clone`
    pub async fn clone_switch_devices(
        &self,
        organization_id: &str,
        source_serial: &str,
        target_serials: &[String],
    ) -> Result<(), Error> {
        debug!(organization_id, source_serial, ?target_serials, "cloning switch");
        self.post_no_response(
            &["organizations", organization_id, "switch", "devices", "clone"],
            &CloneRequest {
                source_serial,
                target_serials,
            },
        )
        .await
    }
}
