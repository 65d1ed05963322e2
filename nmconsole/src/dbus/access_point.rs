//! NetworkManager Access Point proxy.

use zbus::{Result, proxy};

/// Proxy for a visible access point.
#[proxy(
    interface = "org.freedesktop.NetworkManager.AccessPoint",
    default_service = "org.freedesktop.NetworkManager"
)]
pub trait NMAccessPoint {
    /// Raw SSID bytes.
    #[zbus(property)]
    fn ssid(&self) -> Result<Vec<u8>>;

    /// Operating frequency in MHz.
    #[zbus(property)]
    fn frequency(&self) -> Result<u32>;

    /// Signal quality, 0 to 100.
    #[zbus(property)]
    fn strength(&self) -> Result<u8>;

    /// CLOCK_BOOTTIME seconds when the AP was last seen, -1 if never.
    #[zbus(property)]
    fn last_seen(&self) -> Result<i32>;

    #[zbus(property)]
    fn mode(&self) -> Result<u32>;

    /// `NM80211ApSecurityFlags` for RSN.
    #[zbus(property)]
    fn rsn_flags(&self) -> Result<u32>;
}
