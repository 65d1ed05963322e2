//! In-memory settings backend for driving `ProfileStore` without a bus.

#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::Mutex;
use uuid::Uuid;
use zvariant::{Array, OwnedObjectPath, OwnedValue, Str};

use nmconsole::{
    NmError, ProfileMeta, RawSection, RawSettings, Result, SettingsBackend, UpdateFlags,
    clone_settings,
};

pub fn s(v: &str) -> OwnedValue {
    OwnedValue::from(Str::from(v.to_string()))
}

pub fn bytes(v: &[u8]) -> OwnedValue {
    OwnedValue::try_from(Array::from(v.to_vec())).unwrap()
}

pub fn section(fields: &[(&str, OwnedValue)]) -> RawSection {
    fields
        .iter()
        .map(|(k, v)| (k.to_string(), v.try_clone().unwrap()))
        .collect()
}

pub fn string_of(raw: &RawSettings, sect: &str, key: &str) -> Option<String> {
    let value = raw.get(sect)?.get(key)?;
    String::try_from(value.try_clone().unwrap()).ok()
}

/// A Wi-Fi profile as NetworkManager returns it from `GetSettings`.
pub fn wifi_profile(uuid: &str, id: &str) -> RawSettings {
    let mut raw = RawSettings::new();
    raw.insert(
        "connection".into(),
        section(&[
            ("id", s(id)),
            ("interface-name", s("wlan0")),
            ("type", s("802-11-wireless")),
            ("uuid", s(uuid)),
            ("zone", s("trusted")),
        ]),
    );
    raw.insert(
        "802-11-wireless".into(),
        section(&[
            ("band", s("")),
            ("mode", s("infrastructure")),
            ("ssid", bytes(b"lab")),
        ]),
    );
    raw.insert(
        "802-11-wireless-security".into(),
        section(&[("key-mgmt", s("wpa-psk"))]),
    );
    raw.insert(
        "ipv4".into(),
        section(&[
            ("method", s("auto")),
            ("addresses", OwnedValue::from(0u32)),
            ("routes", OwnedValue::from(0u32)),
        ]),
    );
    raw.insert("ipv6".into(), section(&[("method", s("auto"))]));
    raw
}

pub fn ethernet_profile(uuid: &str, id: &str) -> RawSettings {
    let mut raw = RawSettings::new();
    raw.insert(
        "connection".into(),
        section(&[
            ("id", s(id)),
            ("interface-name", s("eth0")),
            ("type", s("802-3-ethernet")),
            ("uuid", s(uuid)),
        ]),
    );
    raw
}

pub fn psk_secrets(psk: &str) -> RawSettings {
    let mut raw = RawSettings::new();
    raw.insert(
        "802-11-wireless-security".into(),
        section(&[("psk", s(psk))]),
    );
    raw
}

fn remote_failure(message: impl Into<String>) -> NmError {
    NmError::DbusOperation {
        context: "mock call failed".into(),
        source: zbus::Error::Failure(message.into()),
    }
}

struct StoredProfile {
    path: OwnedObjectPath,
    uuid: Uuid,
    settings: RawSettings,
    secrets: Option<RawSettings>,
}

/// One recorded `Update2` call.
pub struct RecordedUpdate {
    pub path: String,
    pub settings: RawSettings,
    pub flags: UpdateFlags,
}

#[derive(Default)]
pub struct MockBackend {
    profiles: Mutex<Vec<StoredProfile>>,
    updates: Mutex<Vec<RecordedUpdate>>,
    activated: Mutex<Vec<String>>,
    secret_reads: Mutex<usize>,
    reload_fails: bool,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a profile; the UUID is taken from its `connection.uuid`.
    pub fn with_profile(self, settings: RawSettings, secrets: Option<RawSettings>) -> Self {
        let raw_uuid = string_of(&settings, "connection", "uuid").unwrap_or_default();
        let uuid = Uuid::parse_str(&raw_uuid).unwrap_or_else(|_| Uuid::new_v4());
        let index = self.profiles.lock().unwrap().len() + 1;
        let path = OwnedObjectPath::try_from(format!(
            "/org/freedesktop/NetworkManager/Settings/{index}"
        ))
        .unwrap();
        self.profiles.lock().unwrap().push(StoredProfile {
            path,
            uuid,
            settings,
            secrets,
        });
        self
    }

    pub fn failing_reload(mut self) -> Self {
        self.reload_fails = true;
        self
    }

    pub fn updates(&self) -> std::sync::MutexGuard<'_, Vec<RecordedUpdate>> {
        self.updates.lock().unwrap()
    }

    pub fn activated(&self) -> Vec<String> {
        self.activated.lock().unwrap().clone()
    }

    pub fn secret_reads(&self) -> usize {
        *self.secret_reads.lock().unwrap()
    }

    fn with_stored<T>(
        &self,
        path: &OwnedObjectPath,
        f: impl FnOnce(&mut StoredProfile) -> Result<T>,
    ) -> Result<T> {
        let mut profiles = self.profiles.lock().unwrap();
        match profiles.iter_mut().find(|p| p.path == *path) {
            Some(profile) => f(profile),
            None => Err(remote_failure(format!("no object at {}", path.as_str()))),
        }
    }
}

#[async_trait]
impl SettingsBackend for MockBackend {
    async fn list_connections(&self) -> Result<Vec<OwnedObjectPath>> {
        Ok(self
            .profiles
            .lock()
            .unwrap()
            .iter()
            .map(|p| p.path.clone())
            .collect())
    }

    async fn get_connection_by_uuid(&self, uuid: &Uuid) -> Result<OwnedObjectPath> {
        self.profiles
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.uuid == *uuid)
            .map(|p| p.path.clone())
            .ok_or(NmError::ProfileNotFound(*uuid))
    }

    async fn connection_meta(&self, path: &OwnedObjectPath) -> Result<ProfileMeta> {
        self.with_stored(path, |p| {
            Ok(ProfileMeta {
                unsaved: false,
                flags: 0,
                filename: format!(
                    "/etc/NetworkManager/system-connections/{}.nmconnection",
                    p.uuid
                ),
            })
        })
    }

    async fn get_settings(&self, path: &OwnedObjectPath) -> Result<RawSettings> {
        self.with_stored(path, |p| clone_settings(&p.settings))
    }

    async fn get_secrets(&self, path: &OwnedObjectPath, _setting: &str) -> Result<RawSettings> {
        *self.secret_reads.lock().unwrap() += 1;
        self.with_stored(path, |p| match &p.secrets {
            Some(secrets) => clone_settings(secrets),
            None => Err(remote_failure("No secrets available")),
        })
    }

    async fn update2(
        &self,
        path: &OwnedObjectPath,
        settings: RawSettings,
        flags: UpdateFlags,
    ) -> Result<()> {
        let recorded = clone_settings(&settings)?;
        self.with_stored(path, |p| {
            p.settings = settings;
            Ok(())
        })?;
        self.updates.lock().unwrap().push(RecordedUpdate {
            path: path.as_str().to_string(),
            settings: recorded,
            flags,
        });
        Ok(())
    }

    async fn activate_connection(&self, path: &OwnedObjectPath) -> Result<OwnedObjectPath> {
        self.activated.lock().unwrap().push(path.as_str().to_string());
        Ok(OwnedObjectPath::try_from("/org/freedesktop/NetworkManager/ActiveConnection/1").unwrap())
    }

    async fn reload_connections(&self) -> Result<bool> {
        Ok(!self.reload_fails)
    }
}
