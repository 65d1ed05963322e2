//! Connection profile operations over a pluggable settings backend.
//!
//! [`ProfileStore`] implements reading, updating, activating and reloading
//! connection profiles on top of a [`SettingsBackend`], the small set of
//! remote calls it needs. [`DbusSettings`](crate::DbusSettings) is the
//! backend that talks to NetworkManager; tests substitute in-memory ones.

use async_trait::async_trait;
use log::{debug, info, warn};
use uuid::Uuid;
use zvariant::OwnedObjectPath;

use crate::Result;
use crate::api::models::{
    ConnProfile, ConnProfileFlags, NmError, ProfileUpdate, ResultExt, SettingsUpdates, UpdateFlags,
    UpdateKind,
};
use crate::core::decode::{decode_settings, is_wifi_profile};
use crate::core::update::merge_updates;
use crate::types::constants::section;
use crate::util::variant::RawSettings;

/// Properties of a `Settings.Connection` object besides its settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileMeta {
    pub unsaved: bool,
    /// `NMSettingsConnectionFlags`.
    pub flags: u32,
    pub filename: String,
}

/// The remote calls behind connection profile operations.
///
/// Object paths identify `Settings.Connection` objects.
#[async_trait]
pub trait SettingsBackend: Send + Sync {
    /// `Settings.ListConnections`.
    async fn list_connections(&self) -> Result<Vec<OwnedObjectPath>>;

    /// `Settings.GetConnectionByUuid`.
    ///
    /// Must fail with [`NmError::ProfileNotFound`] if no profile has this UUID.
    async fn get_connection_by_uuid(&self, uuid: &Uuid) -> Result<OwnedObjectPath>;

    /// The `Unsaved`, `Flags` and `Filename` properties.
    async fn connection_meta(&self, path: &OwnedObjectPath) -> Result<ProfileMeta>;

    /// `Settings.Connection.GetSettings`.
    async fn get_settings(&self, path: &OwnedObjectPath) -> Result<RawSettings>;

    /// `Settings.Connection.GetSecrets` for one settings section.
    async fn get_secrets(&self, path: &OwnedObjectPath, setting: &str) -> Result<RawSettings>;

    /// `Settings.Connection.Update2` with empty arguments.
    async fn update2(
        &self,
        path: &OwnedObjectPath,
        settings: RawSettings,
        flags: UpdateFlags,
    ) -> Result<()>;

    /// `ActivateConnection`, letting NetworkManager pick device and specific object.
    async fn activate_connection(&self, path: &OwnedObjectPath) -> Result<OwnedObjectPath>;

    /// `Settings.ReloadConnections`.
    async fn reload_connections(&self) -> Result<bool>;
}

/// Reads and updates connection profiles.
///
/// # Example
///
/// ```no_run
/// use nmconsole::{DbusSettings, ProfileStore, UpdateKind, translate_settings, FormValues};
///
/// # async fn example() -> nmconsole::Result<()> {
/// let store = ProfileStore::new(DbusSettings::system().await?);
///
/// for profile in store.list_conn_profiles().await? {
///     println!("{} {}", profile.settings.conn.uuid, profile.settings.conn.id);
/// }
///
/// let form: FormValues = [("connection.autoconnect", "false")].into_iter().collect();
/// let updates = translate_settings(&form)?;
/// let uuid = "5b3c2bfa-7b2b-4a5e-9d35-0d2e1a9c4f10".parse().unwrap();
/// store
///     .update_conn_profile_by_uuid(&uuid, UpdateKind::Apply, &updates)
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ProfileStore<B> {
    backend: B,
}

impl<B: SettingsBackend> ProfileStore<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Reads and decodes the profile with the given UUID.
    pub async fn get_conn_profile_by_uuid(&self, uuid: &Uuid) -> Result<ConnProfile> {
        let path = self.backend.get_connection_by_uuid(uuid).await?;
        self.dump_profile(&path)
            .await
            .with_context(|| format!("couldn't dump connection profile {uuid}"))
    }

    /// Reads and decodes every profile, sorted by ID.
    ///
    /// A single undecodable profile fails the whole listing.
    pub async fn list_conn_profiles(&self) -> Result<Vec<ConnProfile>> {
        let paths = self
            .backend
            .list_connections()
            .await
            .context("couldn't list connection profiles")?;

        let mut profiles = Vec::with_capacity(paths.len());
        for path in &paths {
            let profile = self
                .dump_profile(path)
                .await
                .with_context(|| format!("couldn't dump connection profile {}", path.as_str()))?;
            profiles.push(profile);
        }
        profiles.sort_by(|a, b| a.settings.conn.id.cmp(&b.settings.conn.id));
        Ok(profiles)
    }

    /// Merges `updates` onto the profile's current settings and submits them.
    ///
    /// [`UpdateKind::Apply`] changes only the running configuration,
    /// [`UpdateKind::Save`] also persists it.
    pub async fn update_conn_profile_by_uuid(
        &self,
        uuid: &Uuid,
        kind: UpdateKind,
        updates: &SettingsUpdates,
    ) -> Result<()> {
        self.update_profile(uuid, kind, updates)
            .await
            .with_context(|| format!("couldn't update connection profile {uuid}"))?;
        info!("Updated connection profile {uuid} ({kind}, {} fields)", updates.len());
        Ok(())
    }

    /// Applies a translated form submission.
    pub async fn apply_profile_update(&self, uuid: &Uuid, update: &ProfileUpdate) -> Result<()> {
        self.update_conn_profile_by_uuid(uuid, update.kind, &update.settings)
            .await
    }

    /// Activates the profile with the given UUID.
    pub async fn activate_conn_profile(&self, uuid: &Uuid) -> Result<()> {
        let path = self.backend.get_connection_by_uuid(uuid).await?;
        let active = self
            .backend
            .activate_connection(&path)
            .await
            .with_context(|| format!("couldn't activate connection profile {uuid}"))?;
        debug!("Activated {uuid} as {}", active.as_str());
        Ok(())
    }

    /// Reloads all profiles from disk.
    pub async fn reload_conn_profiles(&self) -> Result<()> {
        let ok = self
            .backend
            .reload_connections()
            .await
            .context("couldn't reload connection profiles")?;
        if !ok {
            return Err(NmError::ReloadFailed);
        }
        Ok(())
    }

    async fn update_profile(
        &self,
        uuid: &Uuid,
        kind: UpdateKind,
        updates: &SettingsUpdates,
    ) -> Result<()> {
        let path = self.backend.get_connection_by_uuid(uuid).await?;
        let mut raw = self
            .backend
            .get_settings(&path)
            .await
            .context("couldn't get settings")?;
        merge_updates(&mut raw, updates)?;
        self.backend.update2(&path, raw, kind.flags()).await
    }

    async fn dump_profile(&self, path: &OwnedObjectPath) -> Result<ConnProfile> {
        debug!("Reading connection profile {}", path.as_str());
        let meta = self.backend.connection_meta(path).await?;
        let raw = self
            .backend
            .get_settings(path)
            .await
            .context("couldn't get settings")?;

        // Reading secrets fails without privileges or when none are stored;
        // either way the PSK decodes as empty.
        let secrets = if is_wifi_profile(&raw) {
            match self.backend.get_secrets(path, section::WIFI_SECURITY).await {
                Ok(secrets) => Some(secrets),
                Err(e) => {
                    warn!("Couldn't read secrets of {}: {e}", path.as_str());
                    None
                }
            }
        } else {
            None
        };

        Ok(ConnProfile {
            unsaved: meta.unsaved,
            flags: ConnProfileFlags::from(meta.flags),
            filename: meta.filename,
            settings: decode_settings(&raw, secrets.as_ref())?,
        })
    }
}
