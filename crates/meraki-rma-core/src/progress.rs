// ── Workflow progress events ──
//
// Every completed step emits one `RmaEvent`. The CLI renders them as
// styled console lines; tests collect them.

use std::fmt;

use strum::{Display, EnumString, IntoStaticStr};

/// Which kind of device is being replaced. Shapes the wording of events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, IntoStaticStr)]
pub enum DeviceClass {
    #[strum(serialize = "switch")]
    Switch,
    #[strum(serialize = "ap")]
    AccessPoint,
}

/// How an event should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// A step completed as expected.
    Good,
    /// A step completed on a fallback path worth pointing out.
    Info,
}

/// One completed workflow step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RmaEvent {
    NetworkResolved {
        name: String,
        id: String,
    },
    PreflightPassed {
        source: String,
        target: String,
    },
    SerialClaimed {
        serial: String,
    },
    OrderClaimed {
        order: String,
    },
    AddedToNetwork {
        serial: String,
        network: String,
    },
    RemovedFromNetwork {
        serial: String,
        network: String,
    },
    NotStacked {
        serial: String,
    },
    AddedToStack {
        serial: String,
        stack_id: String,
    },
    RemovedFromStack {
        serial: String,
        stack_id: String,
    },
    SwitchCloned {
        source: String,
        target: String,
    },
    AggregateDeleted {
        id: String,
    },
    AggregateRewritten {
        id: String,
        source: String,
        target: String,
    },
    MetadataCopied {
        class: DeviceClass,
        source: String,
        target: String,
        /// `false` when the source had no name and only address and tags moved.
        with_name: bool,
    },
    DeviceRenamed {
        class: DeviceClass,
        serial: String,
        name: String,
    },
    RfProfileCopied {
        target: String,
        rf_profile_id: String,
    },
    RfProfileSkipped {
        source: String,
    },
}

impl RmaEvent {
    pub fn tone(&self) -> Tone {
        match self {
            Self::NotStacked { .. }
            | Self::AggregateDeleted { .. }
            | Self::RfProfileSkipped { .. }
            | Self::MetadataCopied {
                with_name: false, ..
            } => Tone::Info,
            _ => Tone::Good,
        }
    }
}

impl fmt::Display for RmaEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NetworkResolved { name, id } => write!(f, "Network {name} resolved to {id}."),
            Self::PreflightPassed { source, target } => write!(
                f,
                "Serial {source} is in the network and serial {target} is not, proceeding."
            ),
            Self::SerialClaimed { serial } => {
                write!(f, "Serial {serial} added to the organization.")
            }
            Self::OrderClaimed { order } => write!(f, "Order {order} added to the organization."),
            Self::AddedToNetwork { serial, network } => {
                write!(f, "Serial {serial} added to the network {network}.")
            }
            Self::RemovedFromNetwork { serial, network } => {
                write!(f, "Serial {serial} removed from the network {network}.")
            }
            Self::NotStacked { serial } => {
                write!(f, "Switch {serial} is not part of any stack.")
            }
            Self::AddedToStack { serial, stack_id } => {
                write!(f, "Adding switch {serial} to the stack {stack_id}.")
            }
            Self::RemovedFromStack { serial, stack_id } => {
                write!(f, "Removing switch {serial} from the stack {stack_id}.")
            }
            Self::SwitchCloned { source, target } => write!(
                f,
                "New switch {target} cloned with config from broken switch {source}."
            ),
            Self::AggregateDeleted { id } => {
                write!(f, "Removing aggregate {id} as it is useless now.")
            }
            Self::AggregateRewritten { id, source, target } => write!(
                f,
                "Replacing switch {source} with switch {target} in aggregate {id}."
            ),
            Self::MetadataCopied {
                class,
                source,
                target,
                with_name: true,
            } => write!(
                f,
                "Adding name, address and tags from {class} {source} to {class} {target}."
            ),
            Self::MetadataCopied {
                class,
                source,
                target,
                with_name: false,
            } => write!(
                f,
                "Adding address and tags from {class} {source} to {class} {target}, \
                 name was empty so keeping the mac address as name."
            ),
            Self::DeviceRenamed {
                class,
                serial,
                name,
            } => write!(f, "Renaming {class} {serial} to {name}."),
            Self::RfProfileCopied {
                target,
                rf_profile_id,
            } => write!(f, "Applying RF profile {rf_profile_id} to ap {target}."),
            Self::RfProfileSkipped { source } => write!(
                f,
                "Ap {source} has no RF profile assigned, leaving the new ap on the network default."
            ),
        }
    }
}

/// Sink for workflow events.
pub trait Progress: Send + Sync {
    fn report(&self, event: RmaEvent);
}
