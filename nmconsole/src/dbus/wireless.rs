//! NetworkManager Wireless Device proxy.

use std::collections::HashMap;
use zbus::{Result, proxy};
use zvariant::OwnedObjectPath;

/// Proxy for the Wi-Fi specific part of a device.
#[proxy(
    interface = "org.freedesktop.NetworkManager.Device.Wireless",
    default_service = "org.freedesktop.NetworkManager"
)]
pub trait NMWireless {
    /// Requests a Wi-Fi scan. Options are usually empty.
    fn request_scan(&self, options: HashMap<String, zvariant::Value<'_>>) -> Result<()>;

    /// Paths of the access points visible to this device.
    #[zbus(property)]
    fn access_points(&self) -> Result<Vec<OwnedObjectPath>>;

    /// Path to the currently associated access point ("/" if none).
    #[zbus(property)]
    fn active_access_point(&self) -> Result<OwnedObjectPath>;

    /// The operating mode of the wireless device.
    #[zbus(property)]
    fn mode(&self) -> Result<u32>;

    /// `NMDeviceWifiCapabilities`.
    #[zbus(property)]
    fn wireless_capabilities(&self) -> Result<u32>;

    /// CLOCK_BOOTTIME milliseconds of the last finished scan, -1 if never.
    #[zbus(property)]
    fn last_scan(&self) -> Result<i64>;
}
