// ── Network-scoped operations ──
//
// Name resolution happens once per run; everything after that is keyed by
// the resolved id. The display name is kept for progress messages.

use meraki_rma_api::types::{Device, Network};
use tracing::debug;

use crate::dashboard::Dashboard;
use crate::error::CoreError;
use crate::progress::{Progress, RmaEvent};

/// A network whose name has been looked up in the organization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedNetwork {
    pub id: String,
    pub name: String,
}

/// First network whose name matches exactly.
pub fn find_network<'n>(networks: &'n [Network], name: &str) -> Option<&'n Network> {
    networks.iter().find(|n| n.name == name)
}

/// Enforce that `source` is a member of the network and `target` is not.
pub fn check_membership(devices: &[Device], source: &str, target: &str) -> Result<(), CoreError> {
    if source == target {
        return Err(CoreError::Preflight {
            message: format!("source and target are the same serial {source}"),
        });
    }
    if !devices.iter().any(|d| d.serial == source) {
        return Err(CoreError::Preflight {
            message: format!("serial {source} is not part of the network"),
        });
    }
    if devices.iter().any(|d| d.serial == target) {
        return Err(CoreError::Preflight {
            message: format!("serial {target} already belongs to the network"),
        });
    }
    Ok(())
}

/// Membership changes and checks for one resolved network.
pub struct NetworkOps<'a, D> {
    dashboard: &'a D,
    progress: &'a dyn Progress,
    network: &'a ResolvedNetwork,
}

impl<'a, D: Dashboard> NetworkOps<'a, D> {
    pub fn new(dashboard: &'a D, progress: &'a dyn Progress, network: &'a ResolvedNetwork) -> Self {
        Self {
            dashboard,
            progress,
            network,
        }
    }

    /// Look a network up by display name across every page of the
    /// organization's networks.
    pub async fn resolve(
        dashboard: &D,
        progress: &dyn Progress,
        organization_id: &str,
        name: &str,
    ) -> Result<ResolvedNetwork, CoreError> {
        let networks = dashboard.list_networks(organization_id).await?;
        debug!(count = networks.len(), "networks listed");

        let network = find_network(&networks, name).ok_or_else(|| CoreError::NetworkNotFound {
            name: name.to_owned(),
        })?;
        let resolved = ResolvedNetwork {
            id: network.id.clone(),
            name: network.name.clone(),
        };
        progress.report(RmaEvent::NetworkResolved {
            name: resolved.name.clone(),
            id: resolved.id.clone(),
        });
        Ok(resolved)
    }

    pub async fn add_serial(&self, serial: &str) -> Result<(), CoreError> {
        self.dashboard
            .claim_network_device(&self.network.id, serial)
            .await?;
        self.progress.report(RmaEvent::AddedToNetwork {
            serial: serial.to_owned(),
            network: self.network.name.clone(),
        });
        Ok(())
    }

    pub async fn remove_serial(&self, serial: &str) -> Result<(), CoreError> {
        self.dashboard
            .remove_network_device(&self.network.id, serial)
            .await?;
        self.progress.report(RmaEvent::RemovedFromNetwork {
            serial: serial.to_owned(),
            network: self.network.name.clone(),
        });
        Ok(())
    }

    /// Verify the replacement can start: source present, target absent.
    pub async fn preflight(&self, source: &str, target: &str) -> Result<(), CoreError> {
        let devices = self.dashboard.list_network_devices(&self.network.id).await?;
        check_membership(&devices, source, target)?;
        self.progress.report(RmaEvent::PreflightPassed {
            source: source.to_owned(),
            target: target.to_owned(),
        });
        Ok(())
    }
}
