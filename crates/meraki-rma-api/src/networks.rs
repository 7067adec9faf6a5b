// Network-scoped device endpoints

use serde_json::json;
use tracing::debug;

use crate::client::DashboardClient;
use crate::error::Error;
use crate::types::Device;

impl DashboardClient {
    /// Claim already-inventoried serials into a network.
    ///
    /// `POST /networks/{networkId}/devices/claim`
    pub async fn claim_network_devices(
        &self,
        network_id: &str,
        serials: &[String],
    ) -> Result<(), Error> {
        debug!(network_id, ?serials, "claiming into network");
        self.post_no_response(
            &["networks", network_id, "devices", "claim"],
            &json!({ "serials": serials }),
        )
        .await
    }

    /// Remove a single device from a network (it stays in the inventory).
    ///
    /// `POST /networks/{networkId}/devices/remove`
    pub async fn remove_network_device(&self, network_id: &str, serial: &str) -> Result<(), Error> {
        debug!(network_id, serial, "removing from network");
        self.post_no_response(
            &["networks", network_id, "devices", "remove"],
            &json!({ "serial": serial }),
        )
        .await
    }

    /// List the devices currently in a network.
    ///
    /// `GET /networks/{networkId}/devices`
    pub async fn list_network_devices(&self, network_id: &str) -> Result<Vec<Device>, Error> {
        self.get(&["networks", network_id, "devices"]).await
    }
}
