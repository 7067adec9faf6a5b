// ── Dashboard abstraction ──
//
// The seam between the workflow and the remote API. The operation groups
// in `ops` only talk to a `Dashboard`; production code plugs in the
// `DashboardClient`, tests plug in an in-memory fake.

use std::future::Future;

use meraki_rma_api::DashboardClient;
use meraki_rma_api::types::{
    ClaimRequest, ClaimResponse, Device, DeviceUpdate, InventoryDevice, LinkAggregation,
    Network, RadioSettings, SwitchPort, SwitchStack,
};

use crate::error::CoreError;

/// Remote calls the replacement workflow needs, keyed by organization id,
/// network id, and device serial.
pub trait Dashboard: Send + Sync {
    // ── Organization ────────────────────────────────────────────────

    fn list_networks(
        &self,
        organization_id: &str,
    ) -> impl Future<Output = Result<Vec<Network>, CoreError>> + Send;

    fn claim_into_organization(
        &self,
        organization_id: &str,
        request: &ClaimRequest,
    ) -> impl Future<Output = Result<ClaimResponse, CoreError>> + Send;

    fn get_inventory_device(
        &self,
        organization_id: &str,
        serial: &str,
    ) -> impl Future<Output = Result<InventoryDevice, CoreError>> + Send;

    fn clone_switch(
        &self,
        organization_id: &str,
        source_serial: &str,
        target_serial: &str,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;

    // ── Network ─────────────────────────────────────────────────────

    fn claim_network_device(
        &self,
        network_id: &str,
        serial: &str,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;

    fn remove_network_device(
        &self,
        network_id: &str,
        serial: &str,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;

    fn list_network_devices(
        &self,
        network_id: &str,
    ) -> impl Future<Output = Result<Vec<Device>, CoreError>> + Send;

    // ── Switch ──────────────────────────────────────────────────────

    fn list_switch_stacks(
        &self,
        network_id: &str,
    ) -> impl Future<Output = Result<Vec<SwitchStack>, CoreError>> + Send;

    fn add_to_switch_stack(
        &self,
        network_id: &str,
        stack_id: &str,
        serial: &str,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;

    fn remove_from_switch_stack(
        &self,
        network_id: &str,
        stack_id: &str,
        serial: &str,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;

    fn list_link_aggregations(
        &self,
        network_id: &str,
    ) -> impl Future<Output = Result<Vec<LinkAggregation>, CoreError>> + Send;

    fn update_link_aggregation(
        &self,
        network_id: &str,
        aggregation_id: &str,
        switch_ports: &[SwitchPort],
    ) -> impl Future<Output = Result<(), CoreError>> + Send;

    fn delete_link_aggregation(
        &self,
        network_id: &str,
        aggregation_id: &str,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;

    // ── Device ──────────────────────────────────────────────────────

    fn get_device(&self, serial: &str) -> impl Future<Output = Result<Device, CoreError>> + Send;

    fn update_device(
        &self,
        serial: &str,
        update: &DeviceUpdate,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;

    // ── Wireless ────────────────────────────────────────────────────

    fn get_radio_settings(
        &self,
        serial: &str,
    ) -> impl Future<Output = Result<RadioSettings, CoreError>> + Send;

    fn update_radio_settings(
        &self,
        serial: &str,
        rf_profile_id: &str,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;
}

impl Dashboard for DashboardClient {
    async fn list_networks(&self, organization_id: &str) -> Result<Vec<Network>, CoreError> {
        Ok(DashboardClient::list_networks(self, organization_id).await?)
    }

    async fn claim_into_organization(
        &self,
        organization_id: &str,
        request: &ClaimRequest,
    ) -> Result<ClaimResponse, CoreError> {
        Ok(DashboardClient::claim_into_organization(self, organization_id, request).await?)
    }

    async fn get_inventory_device(
        &self,
        organization_id: &str,
        serial: &str,
    ) -> Result<InventoryDevice, CoreError> {
        DashboardClient::get_inventory_device(self, organization_id, serial)
            .await
            .map_err(|e| not_found_as_device(e, serial))
    }

    async fn clone_switch(
        &self,
        organization_id: &str,
        source_serial: &str,
        target_serial: &str,
    ) -> Result<(), CoreError> {
        let targets = [target_serial.to_owned()];
        Ok(self
            .clone_switch_devices(organization_id, source_serial, &targets)
            .await?)
    }

    async fn claim_network_device(&self, network_id: &str, serial: &str) -> Result<(), CoreError> {
        let serials = [serial.to_owned()];
        Ok(self.claim_network_devices(network_id, &serials).await?)
    }

    async fn remove_network_device(&self, network_id: &str, serial: &str) -> Result<(), CoreError> {
        Ok(DashboardClient::remove_network_device(self, network_id, serial).await?)
    }

    async fn list_network_devices(&self, network_id: &str) -> Result<Vec<Device>, CoreError> {
        Ok(DashboardClient::list_network_devices(self, network_id).await?)
    }

    async fn list_switch_stacks(&self, network_id: &str) -> Result<Vec<SwitchStack>, CoreError> {
        Ok(DashboardClient::list_switch_stacks(self, network_id).await?)
    }

    async fn add_to_switch_stack(
        &self,
        network_id: &str,
        stack_id: &str,
        serial: &str,
    ) -> Result<(), CoreError> {
        Ok(DashboardClient::add_to_switch_stack(self, network_id, stack_id, serial).await?)
    }

    async fn remove_from_switch_stack(
        &self,
        network_id: &str,
        stack_id: &str,
        serial: &str,
    ) -> Result<(), CoreError> {
        Ok(DashboardClient::remove_from_switch_stack(self, network_id, stack_id, serial).await?)
    }

    async fn list_link_aggregations(
        &self,
        network_id: &str,
    ) -> Result<Vec<LinkAggregation>, CoreError> {
        Ok(DashboardClient::list_link_aggregations(self, network_id).await?)
    }

    async fn update_link_aggregation(
        &self,
        network_id: &str,
        aggregation_id: &str,
        switch_ports: &[SwitchPort],
    ) -> Result<(), CoreError> {
        DashboardClient::update_link_aggregation(self, network_id, aggregation_id, switch_ports)
            .await?;
        Ok(())
    }

    async fn delete_link_aggregation(
        &self,
        network_id: &str,
        aggregation_id: &str,
    ) -> Result<(), CoreError> {
        Ok(DashboardClient::delete_link_aggregation(self, network_id, aggregation_id).await?)
    }

    async fn get_device(&self, serial: &str) -> Result<Device, CoreError> {
        DashboardClient::get_device(self, serial)
            .await
            .map_err(|e| not_found_as_device(e, serial))
    }

    async fn update_device(&self, serial: &str, update: &DeviceUpdate) -> Result<(), CoreError> {
        DashboardClient::update_device(self, serial, update).await?;
        Ok(())
    }

    async fn get_radio_settings(&self, serial: &str) -> Result<RadioSettings, CoreError> {
        DashboardClient::get_radio_settings(self, serial)
            .await
            .map_err(|e| not_found_as_device(e, serial))
    }

    async fn update_radio_settings(
        &self,
        serial: &str,
        rf_profile_id: &str,
    ) -> Result<(), CoreError> {
        DashboardClient::update_radio_settings(self, serial, rf_profile_id).await?;
        Ok(())
    }
}

/// A 404 on a serial-keyed read means the device does not exist.
fn not_found_as_device(err: meraki_rma_api::Error, serial: &str) -> CoreError {
    if err.is_not_found() {
        CoreError::DeviceNotFound {
            serial: serial.to_owned(),
        }
    } else {
        err.into()
    }
}
