//! NetworkManager Device proxy.

use zbus::{Result, proxy};

/// Proxy for the generic device interface.
#[proxy(
    interface = "org.freedesktop.NetworkManager.Device",
    default_service = "org.freedesktop.NetworkManager"
)]
pub trait NMDevice {
    /// Control interface name (e.g. "wlan0").
    #[zbus(property)]
    fn interface(&self) -> Result<String>;

    /// Data interface name; empty until the device is activated.
    #[zbus(property)]
    fn ip_interface(&self) -> Result<String>;

    #[zbus(property)]
    fn driver(&self) -> Result<String>;

    #[zbus(property)]
    fn driver_version(&self) -> Result<String>;

    #[zbus(property)]
    fn firmware_version(&self) -> Result<String>;

    /// `NMDeviceCapabilities`.
    #[zbus(property)]
    fn capabilities(&self) -> Result<u32>;

    /// Current state and reason code for the last state change.
    #[zbus(property)]
    fn state_reason(&self) -> Result<(u32, u32)>;

    #[zbus(property)]
    fn managed(&self) -> Result<bool>;

    #[zbus(property)]
    fn autoconnect(&self) -> Result<bool>;

    #[zbus(property)]
    fn firmware_missing(&self) -> Result<bool>;

    #[zbus(property)]
    fn nm_plugin_missing(&self) -> Result<bool>;

    /// Device type as a numeric code (2 = Wi-Fi).
    #[zbus(property)]
    fn device_type(&self) -> Result<u32>;

    #[zbus(property)]
    fn ip4_connectivity(&self) -> Result<u32>;

    #[zbus(property)]
    fn ip6_connectivity(&self) -> Result<u32>;

    /// `NMDeviceInterfaceFlags`.
    #[zbus(property)]
    fn interface_flags(&self) -> Result<u32>;

    /// Hardware (MAC) address of the device.
    #[zbus(property)]
    fn hw_address(&self) -> Result<String>;
}
