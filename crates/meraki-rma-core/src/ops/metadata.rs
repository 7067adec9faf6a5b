// ── Device metadata copy ──
//
// Shared by switches and access points. The replacement inherits the
// broken device's name, address, and tags; the broken device is renamed
// with a `_broken` suffix so it stands out in the Dashboard until it is
// shipped back.

use meraki_rma_api::types::{Device, DeviceUpdate};

use crate::dashboard::Dashboard;
use crate::error::CoreError;
use crate::progress::{DeviceClass, Progress, RmaEvent};

const RETIRED_SUFFIX: &str = "_broken";

/// Name given to a device being retired: its own name, or its MAC when
/// it never had one, followed by `_broken`.
pub fn retired_name(device: &Device) -> Result<String, CoreError> {
    let base = match device.name.as_deref() {
        Some(name) if !name.is_empty() => name,
        _ => device
            .mac
            .as_deref()
            .filter(|mac| !mac.is_empty())
            .ok_or_else(|| {
                CoreError::Internal(format!(
                    "device {} has neither a name nor a MAC address",
                    device.serial
                ))
            })?,
    };
    Ok(format!("{base}{RETIRED_SUFFIX}"))
}

/// The two device updates a metadata copy issues.
#[derive(Debug, Clone, PartialEq)]
pub struct MetadataPlan {
    /// Applied to the replacement device.
    pub target: DeviceUpdate,
    /// Applied to the broken device.
    pub source: DeviceUpdate,
    /// Whether the name travels to the replacement.
    pub with_name: bool,
}

pub fn plan_metadata_copy(broken: &Device) -> Result<MetadataPlan, CoreError> {
    let name = broken.name.clone().filter(|n| !n.is_empty());
    let with_name = name.is_some();

    let target = DeviceUpdate {
        name,
        address: broken.address.clone(),
        tags: Some(broken.tags.clone()),
        move_map_marker: Some(true),
    };
    let source = DeviceUpdate {
        name: Some(retired_name(broken)?),
        ..DeviceUpdate::default()
    };

    Ok(MetadataPlan {
        target,
        source,
        with_name,
    })
}

/// Read the source device, push its metadata onto the target, and rename
/// the source.
pub async fn copy_metadata<D: Dashboard>(
    dashboard: &D,
    progress: &dyn Progress,
    class: DeviceClass,
    source: &str,
    target: &str,
) -> Result<(), CoreError> {
    let device = dashboard.get_device(source).await?;
    let plan = plan_metadata_copy(&device)?;

    dashboard.update_device(target, &plan.target).await?;
    progress.report(RmaEvent::MetadataCopied {
        class,
        source: source.to_owned(),
        target: target.to_owned(),
        with_name: plan.with_name,
    });

    dashboard.update_device(source, &plan.source).await?;
    progress.report(RmaEvent::DeviceRenamed {
        class,
        serial: source.to_owned(),
        name: plan.source.name.unwrap_or_default(),
    });
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use pretty_assertions::assert_eq;

    use super::*;

    fn device(name: Option<&str>, mac: Option<&str>) -> Device {
        Device {
            serial: "Q234-ABCD-1111".into(),
            name: name.map(str::to_owned),
            mac: mac.map(str::to_owned),
            model: Some("MS225-48FP".into()),
            network_id: Some("N_1".into()),
            address: Some("1 Rue de la Paix, Paris".into()),
            tags: vec!["core".into(), "floor-2".into()],
            lat: None,
            lng: None,
            notes: None,
            lan_ip: None,
            firmware: None,
            extra: serde_json::Map::new(),
        }
    }

    #[test]
    fn retired_name_prefers_device_name() {
        let d = device(Some("core-sw"), Some("e0:55:3d:00:00:01"));
        assert_eq!(retired_name(&d).unwrap(), "core-sw_broken");
    }

    #[test]
    fn retired_name_falls_back_to_mac() {
        let mac = "e0:55:3d:00:00:01";
        assert_eq!(retired_name(&device(None, Some(mac))).unwrap(), "e0:55:3d:00:00:01_broken");
        assert_eq!(
            retired_name(&device(Some(""), Some(mac))).unwrap(),
            "e0:55:3d:00:00:01_broken"
        );
    }

    #[test]
    fn retired_name_needs_some_identity() {
        let err = retired_name(&device(None, None)).unwrap_err();
        assert!(matches!(err, CoreError::Internal(_)));
    }

    #[test]
    fn named_source_moves_name_to_target() {
        let plan = plan_metadata_copy(&device(Some("core-sw"), Some("e0:55:3d:00:00:01"))).unwrap();
        assert!(plan.with_name);
        assert_eq!(
            plan.target,
            DeviceUpdate {
                name: Some("core-sw".into()),
                address: Some("1 Rue de la Paix, Paris".into()),
                tags: Some(vec!["core".into(), "floor-2".into()]),
                move_map_marker: Some(true),
            }
        );
        assert_eq!(plan.source.name.as_deref(), Some("core-sw_broken"));
    }

    #[test]
    fn nameless_source_keeps_target_name() {
        let plan = plan_metadata_copy(&device(None, Some("e0:55:3d:00:00:01"))).unwrap();
        assert!(!plan.with_name);
        assert_eq!(plan.target.name, None);
        assert_eq!(plan.target.move_map_marker, Some(true));
        assert_eq!(
            plan.source,
            DeviceUpdate {
                name: Some("e0:55:3d:00:00:01_broken".into()),
                ..DeviceUpdate::default()
            }
        );
    }
}
