use std::collections::BTreeMap;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;
use zbus::Connection;

use crate::Result;
use crate::api::config::ClientConfig;
use crate::api::models::{
    AccessPoint, ActiveConn, ConnProfile, Device, ProfileUpdate, SettingsUpdates, UpdateKind,
    WifiDevice,
};
use crate::api::profile_store::ProfileStore;
use crate::core::active::list_active_conns;
use crate::core::devices::{get_device, get_wifi_device, list_devices};
use crate::core::scan::{rescan_networks, scan_networks};
use crate::core::settings::DbusSettings;

/// Session handle for NetworkManager on the system bus.
///
/// Owns one bus connection which every operation borrows. Cloning is cheap
/// and shares the connection.
///
/// # Example
///
/// ```no_run
/// use nmconsole::{FormValues, NetworkManager, translate_form};
///
/// # async fn example() -> nmconsole::Result<()> {
/// let nm = NetworkManager::new().await?;
///
/// for profile in nm.list_conn_profiles().await? {
///     println!("{}: {}", profile.settings.conn.id, profile.settings.conn.conn_type);
/// }
///
/// let form: FormValues = [
///     ("802-11-wireless.band", "a"),
///     ("802-11-wireless.channel", "36"),
/// ]
/// .into_iter()
/// .collect();
/// let update = translate_form("save and apply", &form)?;
/// let uuid = "5b3c2bfa-7b2b-4a5e-9d35-0d2e1a9c4f10".parse().unwrap();
/// nm.apply_profile_update(&uuid, &update).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct NetworkManager {
    conn: Connection,
    config: ClientConfig,
    profiles: ProfileStore<DbusSettings>,
}

impl NetworkManager {
    /// Connects to the system bus with the default configuration.
    pub async fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default()).await
    }

    pub async fn with_config(config: ClientConfig) -> Result<Self> {
        let conn = Connection::system().await?;
        Ok(Self::from_connection(conn, config))
    }

    /// Uses an existing bus connection.
    pub fn from_connection(conn: Connection, config: ClientConfig) -> Self {
        let profiles = ProfileStore::new(DbusSettings::new(conn.clone()));
        Self {
            conn,
            config,
            profiles,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The profile operations, for callers that want the store itself.
    pub fn profiles(&self) -> &ProfileStore<DbusSettings> {
        &self.profiles
    }

    pub async fn get_conn_profile_by_uuid(&self, uuid: &Uuid) -> Result<ConnProfile> {
        self.profiles.get_conn_profile_by_uuid(uuid).await
    }

    /// All connection profiles, sorted by ID.
    pub async fn list_conn_profiles(&self) -> Result<Vec<ConnProfile>> {
        self.profiles.list_conn_profiles().await
    }

    pub async fn update_conn_profile_by_uuid(
        &self,
        uuid: &Uuid,
        kind: UpdateKind,
        updates: &SettingsUpdates,
    ) -> Result<()> {
        self.profiles
            .update_conn_profile_by_uuid(uuid, kind, updates)
            .await
    }

    pub async fn apply_profile_update(&self, uuid: &Uuid, update: &ProfileUpdate) -> Result<()> {
        self.profiles.apply_profile_update(uuid, update).await
    }

    pub async fn activate_conn_profile(&self, uuid: &Uuid) -> Result<()> {
        self.profiles.activate_conn_profile(uuid).await
    }

    pub async fn reload_conn_profiles(&self) -> Result<()> {
        self.profiles.reload_conn_profiles().await
    }

    /// Active connections keyed by profile UUID.
    pub async fn list_active_conns(&self) -> Result<BTreeMap<Uuid, ActiveConn>> {
        list_active_conns(&self.conn).await
    }

    /// All devices, sorted by interface name.
    pub async fn list_devices(&self) -> Result<Vec<Device>> {
        list_devices(&self.conn).await
    }

    /// The device with the given IP interface name.
    pub async fn get_device(&self, iface: &str) -> Result<Device> {
        get_device(&self.conn, iface).await
    }

    /// The Wi-Fi device with the given IP interface name, or the configured
    /// one if `iface` is `None`.
    pub async fn get_wifi_device(&self, iface: Option<&str>) -> Result<WifiDevice> {
        get_wifi_device(&self.conn, self.wifi_interface(iface)).await
    }

    /// Visible access points grouped by SSID, strongest first.
    pub async fn scan_networks(
        &self,
        iface: Option<&str>,
    ) -> Result<BTreeMap<String, Vec<AccessPoint>>> {
        scan_networks(&self.conn, self.wifi_interface(iface)).await
    }

    /// Requests a rescan and waits until NetworkManager reports it finished.
    ///
    /// Returns [`NmError::Cancelled`](crate::NmError::Cancelled) as soon as
    /// `cancel` fires.
    pub async fn rescan_networks(
        &self,
        iface: Option<&str>,
        cancel: &CancellationToken,
    ) -> Result<()> {
        rescan_networks(
            &self.conn,
            self.wifi_interface(iface),
            self.config.scan_poll_interval,
            cancel,
        )
        .await
    }

    fn wifi_interface<'a>(&'a self, iface: Option<&'a str>) -> &'a str {
        iface.unwrap_or(&self.config.wifi_interface)
    }
}
