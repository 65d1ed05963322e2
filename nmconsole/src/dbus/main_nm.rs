//! Main NetworkManager proxy.

use zbus::{Result, proxy};
use zvariant::OwnedObjectPath;

/// Proxy for the root NetworkManager object.
#[proxy(
    interface = "org.freedesktop.NetworkManager",
    default_service = "org.freedesktop.NetworkManager",
    default_path = "/org/freedesktop/NetworkManager"
)]
pub trait NM {
    /// Returns paths to all network devices.
    fn get_devices(&self) -> Result<Vec<OwnedObjectPath>>;

    /// Returns the device whose data interface is `iface`.
    ///
    /// Fails with `org.freedesktop.NetworkManager.UnknownDevice` if there is none.
    fn get_device_by_ip_iface(&self, iface: &str) -> Result<OwnedObjectPath>;

    /// Activates a saved connection profile.
    ///
    /// Passing `/` for `device` and `specific_object` lets NetworkManager pick.
    fn activate_connection(
        &self,
        connection: OwnedObjectPath,
        device: OwnedObjectPath,
        specific_object: OwnedObjectPath,
    ) -> Result<OwnedObjectPath>;

    /// Paths to all active connections.
    #[zbus(property)]
    fn active_connections(&self) -> Result<Vec<OwnedObjectPath>>;
}
