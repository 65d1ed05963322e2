//! NetworkManager Settings.Connection proxy.

use std::collections::HashMap;
use zbus::{Result, proxy};
use zvariant::OwnedValue;

/// Proxy for a single connection profile.
///
/// Settings travel as `a{sa{sv}}`: section name to key to variant.
#[proxy(
    interface = "org.freedesktop.NetworkManager.Settings.Connection",
    default_service = "org.freedesktop.NetworkManager"
)]
pub trait NMSettingsConnection {
    /// All settings of the profile, without secrets.
    fn get_settings(&self) -> Result<HashMap<String, HashMap<String, OwnedValue>>>;

    /// Secrets of one settings section, e.g. `802-11-wireless-security`.
    fn get_secrets(
        &self,
        setting_name: &str,
    ) -> Result<HashMap<String, HashMap<String, OwnedValue>>>;

    /// Replaces the profile's settings.
    ///
    /// `flags` is a `NMSettingsUpdate2Flags` value; `args` is usually empty.
    fn update2(
        &self,
        settings: HashMap<String, HashMap<String, OwnedValue>>,
        flags: u32,
        args: HashMap<String, OwnedValue>,
    ) -> Result<HashMap<String, OwnedValue>>;

    /// Whether the in-memory profile differs from the one on disk.
    #[zbus(property)]
    fn unsaved(&self) -> Result<bool>;

    /// `NMSettingsConnectionFlags`.
    #[zbus(property)]
    fn flags(&self) -> Result<u32>;

    /// Backing file, empty for in-memory profiles.
    #[zbus(property)]
    fn filename(&self) -> Result<String>;
}
