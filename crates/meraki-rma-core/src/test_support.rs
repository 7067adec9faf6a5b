// In-memory Dashboard for unit tests. Serves fixed fixtures and records
// every call so tests can assert the exact request sequence.

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::collections::HashMap;
use std::sync::Mutex;

use meraki_rma_api::types::{
    ClaimRequest, ClaimResponse, Device, DeviceUpdate, InventoryDevice, LinkAggregation,
    Network, RadioSettings, SwitchPort, SwitchStack,
};

use crate::dashboard::Dashboard;
use crate::error::CoreError;
use crate::progress::{Progress, RmaEvent};

pub(crate) const ORG: &str = "O_1";
pub(crate) const NET: &str = "N_1";

/// One recorded Dashboard call.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    ListNetworks,
    ClaimIntoOrganization { serials: Vec<String>, orders: Vec<String> },
    GetInventoryDevice(String),
    CloneSwitch { source: String, target: String },
    ClaimNetworkDevice(String),
    RemoveNetworkDevice(String),
    ListNetworkDevices,
    ListSwitchStacks,
    AddToSwitchStack { stack_id: String, serial: String },
    RemoveFromSwitchStack { stack_id: String, serial: String },
    ListLinkAggregations,
    UpdateLinkAggregation { id: String, ports: Vec<SwitchPort> },
    DeleteLinkAggregation(String),
    GetDevice(String),
    UpdateDevice { serial: String, update: DeviceUpdate },
    GetRadioSettings(String),
    UpdateRadioSettings { serial: String, rf_profile_id: String },
}

#[derive(Default)]
pub(crate) struct FakeDashboard {
    pub networks: Vec<Network>,
    pub network_devices: Vec<Device>,
    pub stacks: Vec<SwitchStack>,
    pub aggregations: Vec<LinkAggregation>,
    pub radio: HashMap<String, RadioSettings>,
    /// Name of the call that should fail with a 500, e.g. `"clone_switch"`.
    pub fail_on: Option<&'static str>,
    pub calls: Mutex<Vec<Call>>,
}

impl FakeDashboard {
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// Recorded calls that change Dashboard state.
    pub fn mutations(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| {
                !matches!(
                    c,
                    Call::ListNetworks
                        | Call::GetInventoryDevice(_)
                        | Call::ListNetworkDevices
                        | Call::ListSwitchStacks
                        | Call::ListLinkAggregations
                        | Call::GetDevice(_)
                        | Call::GetRadioSettings(_)
                )
            })
            .collect()
    }

    fn record(&self, name: &'static str, call: Call) -> Result<(), CoreError> {
        self.calls.lock().unwrap().push(call);
        if self.fail_on == Some(name) {
            return Err(CoreError::Api {
                message: format!("{name} failed"),
                status: Some(500),
            });
        }
        Ok(())
    }

    fn device(&self, serial: &str) -> Result<Device, CoreError> {
        self.network_devices
            .iter()
            .find(|d| d.serial == serial)
            .cloned()
            .ok_or_else(|| CoreError::DeviceNotFound {
                serial: serial.to_owned(),
            })
    }
}

impl Dashboard for FakeDashboard {
    async fn list_networks(&self, _organization_id: &str) -> Result<Vec<Network>, CoreError> {
        self.record("list_networks", Call::ListNetworks)?;
        Ok(self.networks.clone())
    }

    async fn claim_into_organization(
        &self,
        _organization_id: &str,
        request: &ClaimRequest,
    ) -> Result<ClaimResponse, CoreError> {
        self.record(
            "claim_into_organization",
            Call::ClaimIntoOrganization {
                serials: request.serials.clone(),
                orders: request.orders.clone(),
            },
        )?;
        Ok(ClaimResponse {
            orders: request.orders.clone(),
            serials: request.serials.clone(),
            licenses: Vec::new(),
        })
    }

    async fn get_inventory_device(
        &self,
        _organization_id: &str,
        serial: &str,
    ) -> Result<InventoryDevice, CoreError> {
        self.record("get_inventory_device", Call::GetInventoryDevice(serial.into()))?;
        let device = self.device(serial)?;
        Ok(InventoryDevice {
            serial: device.serial,
            mac: device.mac,
            model: device.model,
            name: device.name,
            network_id: device.network_id,
            product_type: None,
            order_number: None,
            claimed_at: None,
            tags: device.tags,
            extra: serde_json::Map::new(),
        })
    }

    async fn clone_switch(
        &self,
        _organization_id: &str,
        source_serial: &str,
        target_serial: &str,
    ) -> Result<(), CoreError> {
        self.record(
            "clone_switch",
            Call::CloneSwitch {
                source: source_serial.into(),
                target: target_serial.into(),
            },
        )
    }

    async fn claim_network_device(&self, _network_id: &str, serial: &str) -> Result<(), CoreError> {
        self.record("claim_network_device", Call::ClaimNetworkDevice(serial.into()))
    }

    async fn remove_network_device(&self, _network_id: &str, serial: &str) -> Result<(), CoreError> {
        self.record("remove_network_device", Call::RemoveNetworkDevice(serial.into()))
    }

    async fn list_network_devices(&self, _network_id: &str) -> Result<Vec<Device>, CoreError> {
        self.record("list_network_devices", Call::ListNetworkDevices)?;
        Ok(self.network_devices.clone())
    }

    async fn list_switch_stacks(&self, _network_id: &str) -> Result<Vec<SwitchStack>, CoreError> {
        self.record("list_switch_stacks", Call::ListSwitchStacks)?;
        Ok(self.stacks.clone())
    }

    async fn add_to_switch_stack(
        &self,
        _network_id: &str,
        stack_id: &str,
        serial: &str,
    ) -> Result<(), CoreError> {
        self.record(
            "add_to_switch_stack",
            Call::AddToSwitchStack {
                stack_id: stack_id.into(),
                serial: serial.into(),
            },
        )
    }

    async fn remove_from_switch_stack(
        &self,
        _network_id: &str,
        stack_id: &str,
        serial: &str,
    ) -> Result<(), CoreError> {
        self.record(
            "remove_from_switch_stack",
            Call::RemoveFromSwitchStack {
                stack_id: stack_id.into(),
                serial: serial.into(),
            },
        )
    }

    async fn list_link_aggregations(
        &self,
        _network_id: &str,
    ) -> Result<Vec<LinkAggregation>, CoreError> {
        self.record("list_link_aggregations", Call::ListLinkAggregations)?;
        Ok(self.aggregations.clone())
    }

    async fn update_link_aggregation(
        &self,
        _network_id: &str,
        aggregation_id: &str,
        switch_ports: &[SwitchPort],
    ) -> Result<(), CoreError> {
        self.record(
            "update_link_aggregation",
            Call::UpdateLinkAggregation {
                id: aggregation_id.into(),
                ports: switch_ports.to_vec(),
            },
        )
    }

    async fn delete_link_aggregation(
        &self,
        _network_id: &str,
        aggregation_id: &str,
    ) -> Result<(), CoreError> {
        self.record(
            "delete_link_aggregation",
            Call::DeleteLinkAggregation(aggregation_id.into()),
        )
    }

    async fn get_device(&self, serial: &str) -> Result<Device, CoreError> {
        self.record("get_device", Call::GetDevice(serial.into()))?;
        self.device(serial)
    }

    async fn update_device(&self, serial: &str, update: &DeviceUpdate) -> Result<(), CoreError> {
        self.record(
            "update_device",
            Call::UpdateDevice {
                serial: serial.into(),
                update: update.clone(),
            },
        )
    }

    async fn get_radio_settings(&self, serial: &str) -> Result<RadioSettings, CoreError> {
        self.record("get_radio_settings", Call::GetRadioSettings(serial.into()))?;
        self.radio
            .get(serial)
            .cloned()
            .ok_or_else(|| CoreError::DeviceNotFound {
                serial: serial.to_owned(),
            })
    }

    async fn update_radio_settings(
        &self,
        serial: &str,
        rf_profile_id: &str,
    ) -> Result<(), CoreError> {
        self.record(
            "update_radio_settings",
            Call::UpdateRadioSettings {
                serial: serial.into(),
                rf_profile_id: rf_profile_id.into(),
            },
        )
    }
}

/// Collects events in order.
#[derive(Default)]
pub(crate) struct RecordingProgress {
    events: Mutex<Vec<RmaEvent>>,
}

impl RecordingProgress {
    pub fn events(&self) -> Vec<RmaEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Rendered messages, one per line.
    pub fn transcript(&self) -> String {
        self.events()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Progress for RecordingProgress {
    fn report(&self, event: RmaEvent) {
        self.events.lock().unwrap().push(event);
    }
}

// ── Fixture builders ─────────────────────────────────────────────────

pub(crate) fn network(id: &str, name: &str) -> Network {
    Network {
        id: id.into(),
        name: name.into(),
        organization_id: Some(ORG.into()),
        product_types: vec!["switch".into(), "wireless".into()],
        time_zone: None,
        tags: Vec::new(),
        extra: serde_json::Map::new(),
    }
}

pub(crate) fn device(serial: &str, name: Option<&str>, mac: &str) -> Device {
    Device {
        serial: serial.into(),
        name: name.map(str::to_owned),
        mac: Some(mac.into()),
        model: None,
        network_id: Some(NET.into()),
        address: Some("10 Downing Street, London".into()),
        tags: vec!["rack-a".into()],
        lat: None,
        lng: None,
        notes: None,
        lan_ip: None,
        firmware: None,
        extra: serde_json::Map::new(),
    }
}

pub(crate) fn stack(id: &str, serials: &[&str]) -> SwitchStack {
    SwitchStack {
        id: id.into(),
        name: None,
        serials: serials.iter().map(|s| (*s).to_owned()).collect(),
        extra: serde_json::Map::new(),
    }
}

pub(crate) fn port(serial: &str, port_id: &str) -> SwitchPort {
    SwitchPort {
        serial: serial.into(),
        port_id: port_id.into(),
    }
}

pub(crate) fn aggregation(id: &str, ports: Vec<SwitchPort>) -> LinkAggregation {
    LinkAggregation {
        id: id.into(),
        switch_ports: ports,
        switch_profile_ports: Vec::new(),
        extra: serde_json::Map::new(),
    }
}

pub(crate) fn radio(serial: &str, rf_profile_id: Option<&str>) -> RadioSettings {
    RadioSettings {
        serial: Some(serial.into()),
        rf_profile_id: rf_profile_id.map(str::to_owned),
        extra: serde_json::Map::new(),
    }
}
