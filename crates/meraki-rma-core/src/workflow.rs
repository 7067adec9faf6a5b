// ── Replacement orchestrator ──
//
// `Rma` threads the identifiers of one run through the operation groups in
// a fixed order. Each step is awaited before the next one starts, and the
// first failure ends the run; there is no rollback.

use tracing::{info, instrument};

use crate::dashboard::Dashboard;
use crate::error::CoreError;
use crate::ops::{
    AccessPointOps, NetworkOps, OrganizationOps, ResolvedNetwork, SwitchOps, copy_metadata,
};
use crate::progress::{DeviceClass, Progress};

/// Inputs of one replacement.
#[derive(Debug, Clone)]
pub struct RmaRequest {
    pub organization_id: String,
    pub network_name: String,
    /// Serial of the broken device.
    pub source_serial: String,
    /// Serial of the replacement device.
    pub target_serial: String,
}

/// A replacement run with its network already resolved.
pub struct Rma<'a, D> {
    dashboard: &'a D,
    progress: &'a dyn Progress,
    organization_id: String,
    network: ResolvedNetwork,
    source: String,
    target: String,
}

impl<'a, D: Dashboard> Rma<'a, D> {
    /// Resolve the network name. Fails with [`CoreError::NetworkNotFound`]
    /// before anything is changed.
    #[instrument(skip_all, fields(network = %request.network_name))]
    pub async fn prepare(
        dashboard: &'a D,
        progress: &'a dyn Progress,
        request: RmaRequest,
    ) -> Result<Self, CoreError> {
        let network = NetworkOps::resolve(
            dashboard,
            progress,
            &request.organization_id,
            &request.network_name,
        )
        .await?;

        Ok(Self {
            dashboard,
            progress,
            organization_id: request.organization_id,
            network,
            source: request.source_serial,
            target: request.target_serial,
        })
    }

    pub fn network(&self) -> &ResolvedNetwork {
        &self.network
    }

    pub fn organization(&self) -> OrganizationOps<'_, D> {
        OrganizationOps::new(self.dashboard, self.progress, &self.organization_id)
    }

    pub fn network_ops(&self) -> NetworkOps<'_, D> {
        NetworkOps::new(self.dashboard, self.progress, &self.network)
    }

    pub fn switch(&self) -> SwitchOps<'_, D> {
        SwitchOps::new(
            self.dashboard,
            self.progress,
            &self.organization_id,
            &self.network,
            &self.source,
            &self.target,
        )
    }

    pub fn access_point(&self) -> AccessPointOps<'_, D> {
        AccessPointOps::new(self.dashboard, self.progress, &self.source, &self.target)
    }

    /// Preflight, claim the target into the organization, add it to the network.
    async fn enroll_target(&self) -> Result<(), CoreError> {
        let network = self.network_ops();
        network.preflight(&self.source, &self.target).await?;
        self.organization().claim_serial(&self.target).await?;
        network.add_serial(&self.target).await
    }

    /// Replace a switch: stack membership, cloned configuration, link
    /// aggregations, metadata, and finally network membership.
    #[instrument(skip_all, fields(source = %self.source, target = %self.target))]
    pub async fn replace_switch(&self) -> Result<(), CoreError> {
        self.enroll_target().await?;

        let switch = self.switch();
        let stack_id = switch.find_stack().await?;
        switch.add_to_stack(stack_id.as_deref()).await?;
        switch.clone_config().await?;
        switch.repair_aggregates().await?;
        switch.remove_from_stack(stack_id.as_deref()).await?;
        copy_metadata(
            self.dashboard,
            self.progress,
            DeviceClass::Switch,
            &self.source,
            &self.target,
        )
        .await?;

        self.network_ops().remove_serial(&self.source).await?;
        info!("switch replacement complete");
        Ok(())
    }

    /// Replace an access point. `rf_override` takes precedence over the
    /// source's RF profile.
    #[instrument(skip_all, fields(source = %self.source, target = %self.target))]
    pub async fn replace_access_point(&self, rf_override: Option<&str>) -> Result<(), CoreError> {
        self.enroll_target().await?;

        self.access_point().copy_rf_profile(rf_override).await?;
        copy_metadata(
            self.dashboard,
            self.progress,
            DeviceClass::AccessPoint,
            &self.source,
            &self.target,
        )
        .await?;

        self.network_ops().remove_serial(&self.source).await?;
        info!("access point replacement complete");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use std::collections::HashMap;

    use meraki_rma_api::types::DeviceUpdate;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::progress::RmaEvent;
    use crate::test_support::{
        Call, FakeDashboard, NET, ORG, RecordingProgress, aggregation, device, network, port,
        radio, stack,
    };

    const SRC: &str = "Q234-ABCD-1111";
    const TGT: &str = "Q234-ABCD-2222";
    const PEER: &str = "Q234-ABCD-0002";

    fn request(network_name: &str) -> RmaRequest {
        RmaRequest {
            organization_id: ORG.into(),
            network_name: network_name.into(),
            source_serial: SRC.into(),
            target_serial: TGT.into(),
        }
    }

    fn switch_site() -> FakeDashboard {
        FakeDashboard {
            networks: vec![network("N_0", "Lab"), network(NET, "Paris HQ")],
            network_devices: vec![
                device(SRC, Some("core-sw"), "e0:55:3d:00:00:01"),
                device(PEER, Some("core-sw-2"), "e0:55:3d:00:00:02"),
            ],
            stacks: vec![stack("S0", &["Q234-ABCD-9999"]), stack("S1", &[PEER, SRC])],
            aggregations: vec![
                aggregation("LAG-SOLO", vec![port(SRC, "1"), port(SRC, "2")]),
                aggregation("LAG-MIXED", vec![port(SRC, "49"), port(PEER, "49")]),
                aggregation("LAG-PEER", vec![port(PEER, "1"), port(PEER, "2")]),
                aggregation("LAG-UPLINK", vec![port(PEER, "50"), port("Q234-ABCD-9999", "50")]),
            ],
            ..FakeDashboard::default()
        }
    }

    fn ap_site(name: Option<&str>, rf_profile_id: Option<&str>) -> FakeDashboard {
        FakeDashboard {
            networks: vec![network(NET, "Paris HQ")],
            network_devices: vec![device(SRC, name, "0c:8d:db:00:00:01")],
            radio: HashMap::from([(SRC.to_owned(), radio(SRC, rf_profile_id))]),
            ..FakeDashboard::default()
        }
    }

    #[tokio::test]
    async fn prepare_fails_for_unknown_network() {
        let dashboard = switch_site();
        let progress = RecordingProgress::default();

        let err = Rma::prepare(&dashboard, &progress, request("Lyon"))
            .await
            .err()
            .unwrap();

        assert!(matches!(err, CoreError::NetworkNotFound { ref name } if name == "Lyon"));
        assert_eq!(err.to_string(), "Non existing network 'Lyon'");
        assert_eq!(dashboard.calls(), vec![Call::ListNetworks]);
        assert!(progress.events().is_empty());
    }

    #[tokio::test]
    async fn prepare_resolves_network_id() {
        let dashboard = switch_site();
        let progress = RecordingProgress::default();

        let rma = Rma::prepare(&dashboard, &progress, request("Paris HQ"))
            .await
            .unwrap();

        assert_eq!(
            rma.network(),
            &ResolvedNetwork {
                id: NET.into(),
                name: "Paris HQ".into(),
            }
        );
    }

    #[tokio::test]
    async fn switch_replacement_end_to_end() {
        let dashboard = switch_site();
        let progress = RecordingProgress::default();

        let rma = Rma::prepare(&dashboard, &progress, request("Paris HQ"))
            .await
            .unwrap();
        rma.replace_switch().await.unwrap();

        assert_eq!(
            dashboard.mutations(),
            vec![
                Call::ClaimIntoOrganization {
                    serials: vec![TGT.into()],
                    orders: Vec::new(),
                },
                Call::ClaimNetworkDevice(TGT.into()),
                Call::AddToSwitchStack {
                    stack_id: "S1".into(),
                    serial: TGT.into(),
                },
                Call::CloneSwitch {
                    source: SRC.into(),
                    target: TGT.into(),
                },
                Call::DeleteLinkAggregation("LAG-SOLO".into()),
                Call::UpdateLinkAggregation {
                    id: "LAG-MIXED".into(),
                    ports: vec![port(TGT, "49"), port(PEER, "49")],
                },
                Call::DeleteLinkAggregation("LAG-PEER".into()),
                Call::RemoveFromSwitchStack {
                    stack_id: "S1".into(),
                    serial: SRC.into(),
                },
                Call::UpdateDevice {
                    serial: TGT.into(),
                    update: DeviceUpdate {
                        name: Some("core-sw".into()),
                        address: Some("10 Downing Street, London".into()),
                        tags: Some(vec!["rack-a".into()]),
                        move_map_marker: Some(true),
                    },
                },
                Call::UpdateDevice {
                    serial: SRC.into(),
                    update: DeviceUpdate {
                        name: Some("core-sw_broken".into()),
                        ..DeviceUpdate::default()
                    },
                },
                Call::RemoveNetworkDevice(SRC.into()),
            ]
        );

        insta::assert_snapshot!(progress.transcript(), @r"
        Network Paris HQ resolved to N_1.
        Serial Q234-ABCD-1111 is in the network and serial Q234-ABCD-2222 is not, proceeding.
        Serial Q234-ABCD-2222 added to the organization.
        Serial Q234-ABCD-2222 added to the network Paris HQ.
        Adding switch Q234-ABCD-2222 to the stack S1.
        New switch Q234-ABCD-2222 cloned with config from broken switch Q234-ABCD-1111.
        Removing aggregate LAG-SOLO as it is useless now.
        Replacing switch Q234-ABCD-1111 with switch Q234-ABCD-2222 in aggregate LAG-MIXED.
        Removing aggregate LAG-PEER as it is useless now.
        Removing switch Q234-ABCD-1111 from the stack S1.
        Adding name, address and tags from switch Q234-ABCD-1111 to switch Q234-ABCD-2222.
        Renaming switch Q234-ABCD-1111 to core-sw_broken.
        Serial Q234-ABCD-1111 removed from the network Paris HQ.
        ");
    }

    #[tokio::test]
    async fn unstacked_switch_still_clones_and_repairs() {
        let dashboard = FakeDashboard {
            stacks: vec![stack("S0", &["Q234-ABCD-9999"])],
            ..switch_site()
        };
        let progress = RecordingProgress::default();

        let rma = Rma::prepare(&dashboard, &progress, request("Paris HQ"))
            .await
            .unwrap();
        rma.replace_switch().await.unwrap();

        let mutations = dashboard.mutations();
        assert!(!mutations.iter().any(|c| matches!(
            c,
            Call::AddToSwitchStack { .. } | Call::RemoveFromSwitchStack { .. }
        )));
        assert!(mutations.contains(&Call::CloneSwitch {
            source: SRC.into(),
            target: TGT.into(),
        }));
        assert!(mutations.contains(&Call::DeleteLinkAggregation("LAG-SOLO".into())));
        assert!(progress.events().contains(&RmaEvent::NotStacked {
            serial: SRC.into(),
        }));
    }

    #[tokio::test]
    async fn preflight_rejects_target_already_in_network() {
        let mut dashboard = switch_site();
        dashboard
            .network_devices
            .push(device(TGT, None, "e0:55:3d:00:00:03"));
        let progress = RecordingProgress::default();

        let rma = Rma::prepare(&dashboard, &progress, request("Paris HQ"))
            .await
            .unwrap();
        let err = rma.replace_switch().await.unwrap_err();

        assert!(matches!(err, CoreError::Preflight { .. }));
        assert!(dashboard.mutations().is_empty());
    }

    #[tokio::test]
    async fn preflight_rejects_source_outside_network() {
        let dashboard = FakeDashboard {
            network_devices: vec![device(PEER, None, "e0:55:3d:00:00:02")],
            ..switch_site()
        };
        let progress = RecordingProgress::default();

        let rma = Rma::prepare(&dashboard, &progress, request("Paris HQ"))
            .await
            .unwrap();
        let err = rma.replace_access_point(None).await.unwrap_err();

        assert_eq!(
            err.to_string(),
            "Preflight check failed: serial Q234-ABCD-1111 is not part of the network"
        );
        assert!(dashboard.mutations().is_empty());
    }

    #[tokio::test]
    async fn failed_step_ends_the_run() {
        let dashboard = FakeDashboard {
            fail_on: Some("clone_switch"),
            ..switch_site()
        };
        let progress = RecordingProgress::default();

        let rma = Rma::prepare(&dashboard, &progress, request("Paris HQ"))
            .await
            .unwrap();
        let err = rma.replace_switch().await.unwrap_err();

        assert!(matches!(err, CoreError::Api { status: Some(500), .. }));
        let mutations = dashboard.mutations();
        assert!(matches!(mutations.last(), Some(Call::CloneSwitch { .. })));
        assert!(!mutations.contains(&Call::RemoveNetworkDevice(SRC.into())));
        assert!(matches!(
            progress.events().last(),
            Some(RmaEvent::AddedToStack { .. })
        ));
    }

    #[tokio::test]
    async fn access_point_replacement_end_to_end() {
        let dashboard = ap_site(Some("lobby-ap"), Some("RF_7"));
        let progress = RecordingProgress::default();

        let rma = Rma::prepare(&dashboard, &progress, request("Paris HQ"))
            .await
            .unwrap();
        rma.replace_access_point(None).await.unwrap();

        assert_eq!(
            dashboard.mutations(),
            vec![
                Call::ClaimIntoOrganization {
                    serials: vec![TGT.into()],
                    orders: Vec::new(),
                },
                Call::ClaimNetworkDevice(TGT.into()),
                Call::UpdateRadioSettings {
                    serial: TGT.into(),
                    rf_profile_id: "RF_7".into(),
                },
                Call::UpdateDevice {
                    serial: TGT.into(),
                    update: DeviceUpdate {
                        name: Some("lobby-ap".into()),
                        address: Some("10 Downing Street, London".into()),
                        tags: Some(vec!["rack-a".into()]),
                        move_map_marker: Some(true),
                    },
                },
                Call::UpdateDevice {
                    serial: SRC.into(),
                    update: DeviceUpdate {
                        name: Some("lobby-ap_broken".into()),
                        ..DeviceUpdate::default()
                    },
                },
                Call::RemoveNetworkDevice(SRC.into()),
            ]
        );
        assert!(dashboard.calls().contains(&Call::GetRadioSettings(SRC.into())));
    }

    #[tokio::test]
    async fn rf_override_wins_over_source_profile() {
        let dashboard = ap_site(Some("lobby-ap"), Some("RF_7"));
        let progress = RecordingProgress::default();

        let rma = Rma::prepare(&dashboard, &progress, request("Paris HQ"))
            .await
            .unwrap();
        let applied = rma.access_point().copy_rf_profile(Some("RF_9")).await.unwrap();

        assert_eq!(applied.as_deref(), Some("RF_9"));
        assert_eq!(
            dashboard.mutations(),
            vec![Call::UpdateRadioSettings {
                serial: TGT.into(),
                rf_profile_id: "RF_9".into(),
            }]
        );
        assert!(!dashboard.calls().contains(&Call::GetRadioSettings(SRC.into())));
    }

    #[tokio::test]
    async fn nameless_ap_without_profile() {
        let dashboard = ap_site(None, None);
        let progress = RecordingProgress::default();

        let rma = Rma::prepare(&dashboard, &progress, request("Paris HQ"))
            .await
            .unwrap();
        rma.replace_access_point(None).await.unwrap();

        let mutations = dashboard.mutations();
        assert!(!mutations
            .iter()
            .any(|c| matches!(c, Call::UpdateRadioSettings { .. })));
        assert!(mutations.contains(&Call::UpdateDevice {
            serial: SRC.into(),
            update: DeviceUpdate {
                name: Some("0c:8d:db:00:00:01_broken".into()),
                ..DeviceUpdate::default()
            },
        }));

        insta::assert_snapshot!(progress.transcript(), @r"
        Network Paris HQ resolved to N_1.
        Serial Q234-ABCD-1111 is in the network and serial Q234-ABCD-2222 is not, proceeding.
        Serial Q234-ABCD-2222 added to the organization.
        Serial Q234-ABCD-2222 added to the network Paris HQ.
        Ap Q234-ABCD-1111 has no RF profile assigned, leaving the new ap on the network default.
        Adding address and tags from ap Q234-ABCD-1111 to ap Q234-ABCD-2222, name was empty so keeping the mac address as name.
        Renaming ap Q234-ABCD-1111 to 0c:8d:db:00:00:01_broken.
        Serial Q234-ABCD-1111 removed from the network Paris HQ.
        ");
    }

    #[tokio::test]
    async fn organization_helpers() {
        let dashboard = switch_site();
        let progress = RecordingProgress::default();

        let rma = Rma::prepare(&dashboard, &progress, request("Paris HQ"))
            .await
            .unwrap();
        let org = rma.organization();

        org.claim_order("4CXXXXXXX").await.unwrap();
        let inventory = org.inventory_device(SRC).await.unwrap();
        let err = org.release_serial(SRC).await.unwrap_err();

        assert_eq!(inventory.name.as_deref(), Some("core-sw"));
        assert!(matches!(err, CoreError::Unsupported { .. }));
        assert_eq!(
            dashboard.mutations(),
            vec![Call::ClaimIntoOrganization {
                serials: Vec::new(),
                orders: vec!["4CXXXXXXX".into()],
            }]
        );
    }
}
