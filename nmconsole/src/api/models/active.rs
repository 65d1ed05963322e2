//! Active connection model.

use bitflags::bitflags;
use serde::Serialize;
use uuid::Uuid;

use super::enum_info::{Enum, EnumInfo, Level};

/// `NMActiveConnectionState`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ActiveConnState {
    Unknown,
    Activating,
    Activated,
    Deactivating,
    Deactivated,
    Other(u32),
}

impl From<u32> for ActiveConnState {
    fn from(value: u32) -> Self {
        match value {
            0 => ActiveConnState::Unknown,
            1 => ActiveConnState::Activating,
            2 => ActiveConnState::Activated,
            3 => ActiveConnState::Deactivating,
            4 => ActiveConnState::Deactivated,
            v => ActiveConnState::Other(v),
        }
    }
}

impl Enum for ActiveConnState {
    fn info(&self) -> EnumInfo {
        match self {
            ActiveConnState::Unknown => EnumInfo::new("unknown", "", Level::Warning),
            ActiveConnState::Activating => EnumInfo::new(
                "activating",
                "network connection is being prepared",
                Level::Info,
            ),
            ActiveConnState::Activated => EnumInfo::new(
                "activated",
                "there is a connection to the network",
                Level::Success,
            ),
            ActiveConnState::Deactivating => EnumInfo::new(
                "deactivating",
                "network connection is being torn down and cleaned up",
                Level::Info,
            ),
            ActiveConnState::Deactivated => EnumInfo::new(
                "deactivated",
                "network connection is disconnected and will be removed",
                Level::Info,
            ),
            ActiveConnState::Other(v) => {
                EnumInfo::unknown(format!("state ({v}) was reported but could not be determined"))
            }
        }
    }
}

bitflags! {
    /// `NMActivationStateFlags`.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
    pub struct ActivationStateFlags: u32 {
        const IS_CONTROLLER = 0x1;
        const IS_PORT = 0x2;
        const LAYER2_READY = 0x4;
        const IP4_READY = 0x8;
        const IP6_READY = 0x10;
        const CONTROLLER_HAS_PORTS = 0x20;
        const LIFETIME_BOUND_TO_PROFILE_VISIBILITY = 0x40;
        const EXTERNAL = 0x80;
    }
}

impl ActivationStateFlags {
    pub fn has_none(&self) -> bool {
        self.is_empty()
    }

    pub fn is_controller(&self) -> bool {
        self.contains(Self::IS_CONTROLLER)
    }

    pub fn is_port(&self) -> bool {
        self.contains(Self::IS_PORT)
    }

    pub fn layer2_ready(&self) -> bool {
        self.contains(Self::LAYER2_READY)
    }

    pub fn ipv4_ready(&self) -> bool {
        self.contains(Self::IP4_READY)
    }

    pub fn ipv6_ready(&self) -> bool {
        self.contains(Self::IP6_READY)
    }

    pub fn controller_has_ports(&self) -> bool {
        self.contains(Self::CONTROLLER_HAS_PORTS)
    }

    pub fn lifetime_bound_to_profile_visibility(&self) -> bool {
        self.contains(Self::LIFETIME_BOUND_TO_PROFILE_VISIBILITY)
    }

    pub fn external(&self) -> bool {
        self.contains(Self::EXTERNAL)
    }
}

/// A running instantiation of a connection profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActiveConn {
    pub id: String,
    pub uuid: Uuid,
    /// Raw connection type, e.g. `802-11-wireless`.
    pub conn_type: String,
    /// Sorted interface names of the devices the connection runs on.
    pub device_interfaces: Vec<String>,
    pub state: ActiveConnState,
    pub state_flags: ActivationStateFlags,
    pub is_ipv4_default: bool,
    pub is_ipv6_default: bool,
    pub is_vpn: bool,
}
