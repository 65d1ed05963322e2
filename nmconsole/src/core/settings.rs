//! Settings backend talking to NetworkManager over D-Bus.

use async_trait::async_trait;
use log::debug;
use std::collections::HashMap;
use uuid::Uuid;
use zbus::Connection;
use zvariant::OwnedObjectPath;

use crate::Result;
use crate::api::models::{NmError, UpdateFlags};
use crate::api::profile_store::{ProfileMeta, SettingsBackend};
use crate::dbus::{NMProxy, NMSettingsProxy};
use crate::types::constants::bus;
use crate::util::utils::{dbus_op, is_method_error, no_object, settings_connection_proxy};
use crate::util::variant::RawSettings;

/// [`SettingsBackend`] backed by NetworkManager's `Settings` objects.
#[derive(Debug, Clone)]
pub struct DbusSettings {
    conn: Connection,
}

impl DbusSettings {
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    /// Connects to the system bus.
    pub async fn system() -> Result<Self> {
        Ok(Self::new(Connection::system().await?))
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

#[async_trait]
impl SettingsBackend for DbusSettings {
    async fn list_connections(&self) -> Result<Vec<OwnedObjectPath>> {
        let settings = NMSettingsProxy::new(&self.conn).await?;
        debug!("Listing connection profiles");
        settings
            .list_connections()
            .await
            .map_err(dbus_op("ListConnections failed"))
    }

    async fn get_connection_by_uuid(&self, uuid: &Uuid) -> Result<OwnedObjectPath> {
        let settings = NMSettingsProxy::new(&self.conn).await?;
        debug!("Looking up connection profile {uuid}");
        match settings.get_connection_by_uuid(&uuid.to_string()).await {
            Ok(path) => Ok(path),
            Err(e) if is_method_error(&e, bus::INVALID_CONNECTION_ERROR) => {
                Err(NmError::ProfileNotFound(*uuid))
            }
            Err(e) => Err(dbus_op(format!("couldn't find connection profile {uuid}"))(e)),
        }
    }

    async fn connection_meta(&self, path: &OwnedObjectPath) -> Result<ProfileMeta> {
        let proxy = settings_connection_proxy(&self.conn, path).await?;
        Ok(ProfileMeta {
            unsaved: proxy.unsaved().await.map_err(dbus_op("couldn't read Unsaved"))?,
            flags: proxy.flags().await.map_err(dbus_op("couldn't read Flags"))?,
            filename: proxy
                .filename()
                .await
                .map_err(dbus_op("couldn't read Filename"))?,
        })
    }

    async fn get_settings(&self, path: &OwnedObjectPath) -> Result<RawSettings> {
        let proxy = settings_connection_proxy(&self.conn, path).await?;
        debug!("Getting settings of {}", path.as_str());
        proxy
            .get_settings()
            .await
            .map_err(dbus_op("GetSettings failed"))
    }

    async fn get_secrets(&self, path: &OwnedObjectPath, setting: &str) -> Result<RawSettings> {
        let proxy = settings_connection_proxy(&self.conn, path).await?;
        debug!("Getting {setting} secrets of {}", path.as_str());
        proxy
            .get_secrets(setting)
            .await
            .map_err(dbus_op(format!("GetSecrets({setting}) failed")))
    }

    async fn update2(
        &self,
        path: &OwnedObjectPath,
        settings: RawSettings,
        flags: UpdateFlags,
    ) -> Result<()> {
        let proxy = settings_connection_proxy(&self.conn, path).await?;
        debug!("Calling Update2 on {} with flags {:#x}", path.as_str(), flags.bits());
        proxy
            .update2(settings, flags.bits(), HashMap::new())
            .await
            .map_err(dbus_op("Update2 failed"))?;
        Ok(())
    }

    async fn activate_connection(&self, path: &OwnedObjectPath) -> Result<OwnedObjectPath> {
        let nm = NMProxy::new(&self.conn).await?;
        debug!("Activating {}", path.as_str());
        nm.activate_connection(path.clone(), no_object()?, no_object()?)
            .await
            .map_err(dbus_op("ActivateConnection failed"))
    }

    async fn reload_connections(&self) -> Result<bool> {
        let settings = NMSettingsProxy::new(&self.conn).await?;
        debug!("Reloading connection profiles");
        settings
            .reload_connections()
            .await
            .map_err(dbus_op("ReloadConnections failed"))
    }
}
