//! Data models for connection profiles, devices and active connections.

mod active;
mod device;
mod enum_info;
mod error;
mod profile;
mod update;

pub use active::{ActivationStateFlags, ActiveConn, ActiveConnState};
pub use device::{
    AccessPoint, ConnectivityState, Device, DeviceCaps, DeviceInterfaceFlags, DeviceState,
    DeviceStateReason, DeviceType, RsnFlags, WifiCaps, WifiDevice, WifiDeviceMode,
};
pub use enum_info::{Enum, EnumInfo, EnumSet, Level, StringEnum};
pub use error::{ErrorKind, NmError, ResultExt};
pub use profile::{
    ConnProfile, ConnProfileFlags, ConnProfileSettings, ConnSettings, ConnType, GroupCipher,
    IpAddress, IpPrefix, Ipv4Settings, Ipv6Settings, KeyMgmt, PairwiseCipher, PskFlags,
    WifiBand, WifiMode, WifiSecSettings, WifiSettings, WpaProto,
};
pub use update::{
    ConnUpdate, FormValues, ProfileUpdate, SettingsKey, SettingsUpdate, SettingsUpdates,
    UpdateFlags, UpdateKind, WifiSecUpdate, WifiUpdate,
};
