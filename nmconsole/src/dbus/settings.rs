//! NetworkManager Settings proxy.

use zbus::{Result, proxy};
use zvariant::OwnedObjectPath;

/// Proxy for the connection profile manager.
#[proxy(
    interface = "org.freedesktop.NetworkManager.Settings",
    default_service = "org.freedesktop.NetworkManager",
    default_path = "/org/freedesktop/NetworkManager/Settings"
)]
pub trait NMSettings {
    /// Object paths of all connection profiles.
    fn list_connections(&self) -> Result<Vec<OwnedObjectPath>>;

    /// Object path of the profile with the given UUID.
    ///
    /// Fails with `org.freedesktop.NetworkManager.Settings.InvalidConnection`
    /// if no profile has this UUID.
    fn get_connection_by_uuid(&self, uuid: &str) -> Result<OwnedObjectPath>;

    /// Reloads all profiles from disk. Returns `false` on failure.
    fn reload_connections(&self) -> Result<bool>;
}
