// Switch endpoints: stacks and link aggregations

use serde_json::json;
use tracing::debug;

use crate::client::DashboardClient;
use crate::error::Error;
use crate::types::{LinkAggregation, SwitchPort, SwitchStack};

impl DashboardClient {
    // ── Stacks ───────────────────────────────────────────────────────

    /// `GET /networks/{networkId}/switch/stacks`
    pub async fn list_switch_stacks(&self, network_id: &str) -> Result<Vec<SwitchStack>, Error> {
        self.get(&["networks", network_id, "switch", "stacks"])
            .await
    }

    /// `POST /networks/{networkId}/switch/stacks/{switchStackId}/add`
    pub async fn add_to_switch_stack(
        &self,
        network_id: &str,
        stack_id: &str,
        serial: &str,
    ) -> Result<(), Error> {
        debug!(network_id, stack_id, serial, "adding switch to stack");
        self.post_no_response(
            &["networks", network_id, "switch", "stacks", stack_id, "add"],
            &json!({ "serial": serial }),
        )
        .await
    }

    /// `POST /networks/{networkId}/switch/stacks/{switchStackId}/remove`
    pub async fn remove_from_switch_stack(
        &self,
        network_id: &str,
        stack_id: &str,
        serial: &str,
    ) -> Result<(), Error> {
        debug!(network_id, stack_id, serial, "removing switch from stack");
        self.post_no_response(
            &["networks", network_id, "switch", "stacks", stack_id, "remove"],
            &json!({ "serial": serial }),
        )
        .await
    }

    // ── Link aggregations ────────────────────────────────────────────

    /// `GET /networks/{networkId}/switch/linkAggregations`
    pub async fn list_link_aggregations(
        &self,
        network_id: &str,
    ) -> Result<Vec<LinkAggregation>, Error> {
        self.get(&["networks", network_id, "switch", "linkAggregations"])
            .await
    }

    /// Replace the member ports of an aggregation.
    ///
    /// `PUT /networks/{networkId}/switch/linkAggregations/{linkAggregationId}`
    pub async fn update_link_aggregation(
        &self,
        network_id: &str,
        aggregation_id: &str,
        switch_ports: &[SwitchPort],
    ) -> Result<LinkAggregation, Error> {
        debug!(network_id, aggregation_id, "updating link aggregation");
        self.put(
            &["networks", network_id, "switch", "linkAggregations", aggregation_id],
            &json!({ "switchPorts": switch_ports }),
        )
        .await
    }

    /// `DELETE /networks/{networkId}/switch/linkAggregations/{linkAggregationId}`
    pub async fn delete_link_aggregation(
        &self,
        network_id: &str,
        aggregation_id: &str,
    ) -> Result<(), Error> {
        debug!(network_id, aggregation_id, "deleting link aggregation");
        self.delete(&["networks", network_id, "switch", "linkAggregations", aggregation_id])
        .await
    }
}
