//! NetworkManager Active Connection proxy.

use zbus::{Result, proxy};
use zvariant::OwnedObjectPath;

/// Proxy for a running instantiation of a connection profile.
#[proxy(
    interface = "org.freedesktop.NetworkManager.Connection.Active",
    default_service = "org.freedesktop.NetworkManager"
)]
pub trait NMActiveConnection {
    #[zbus(property)]
    fn id(&self) -> Result<String>;

    #[zbus(property)]
    fn uuid(&self) -> Result<String>;

    /// Connection type, e.g. `802-11-wireless`.
    #[zbus(property, name = "Type")]
    fn connection_type(&self) -> Result<String>;

    /// Values:
    /// - 0: Unknown
    /// - 1: Activating
    /// - 2: Activated
    /// - 3: Deactivating
    /// - 4: Deactivated
    #[zbus(property)]
    fn state(&self) -> Result<u32>;

    /// `NMActivationStateFlags`.
    #[zbus(property)]
    fn state_flags(&self) -> Result<u32>;

    /// Whether this connection owns the default IPv4 route.
    #[zbus(property)]
    fn default(&self) -> Result<bool>;

    /// Whether this connection owns the default IPv6 route.
    #[zbus(property)]
    fn default6(&self) -> Result<bool>;

    #[zbus(property)]
    fn vpn(&self) -> Result<bool>;

    /// Paths to devices using this connection.
    #[zbus(property)]
    fn devices(&self) -> Result<Vec<OwnedObjectPath>>;
}
