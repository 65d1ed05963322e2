//! D-Bus proxy interfaces for NetworkManager.
//!
//! Low-level zbus proxy definitions for the objects this crate reads and
//! updates on the system bus.

mod access_point;
mod active_connection;
mod device;
mod main_nm;
mod settings;
mod settings_connection;
mod wireless;

pub(crate) use access_point::NMAccessPointProxy;
pub(crate) use active_connection::NMActiveConnectionProxy;
pub(crate) use device::NMDeviceProxy;
pub(crate) use main_nm::NMProxy;
pub(crate) use settings::NMSettingsProxy;
pub(crate) use settings_connection::NMSettingsConnectionProxy;
pub(crate) use wireless::NMWirelessProxy;
