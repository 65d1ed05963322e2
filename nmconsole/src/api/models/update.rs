//! Typed settings updates.
//!
//! Operator input is turned into a [`SettingsUpdates`] map by
//! [`translate_form`](crate::translate_form); each entry is a closed
//! [`SettingsUpdate`] variant, so every settings key the console can edit is
//! spelled out once here.

use bitflags::bitflags;
use std::collections::BTreeMap;
use std::collections::btree_map;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;
use zvariant::{Array, OwnedValue, Str};

use super::enum_info::{EnumSet, StringEnum};
use super::error::NmError;
use super::profile::{GroupCipher, KeyMgmt, PairwiseCipher, WifiBand, WifiMode, WpaProto};
use crate::types::constants::{conn_key, section, wifi_key, wifi_sec_key};

/// A `section.key[.remainder]` settings path.
///
/// The remainder is parsed and kept but does not take part in rendering,
/// so `"ipv4.address-data.0"` and `"ipv4.address-data"` render the same.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SettingsKey {
    pub section: String,
    pub key: String,
    pub remainder: Option<String>,
}

impl SettingsKey {
    pub fn new(section: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            section: section.into(),
            key: key.into(),
            remainder: None,
        }
    }
}

impl FromStr for SettingsKey {
    type Err = NmError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let Some((section, rest)) = raw.split_once('.') else {
            return Err(NmError::InvalidSettingsKey(raw.to_string()));
        };
        let (key, remainder) = match rest.split_once('.') {
            Some((key, remainder)) => (key, Some(remainder.to_string())),
            None => (rest, None),
        };
        if section.is_empty() || key.is_empty() {
            return Err(NmError::InvalidSettingsKey(raw.to_string()));
        }
        Ok(Self {
            section: section.to_string(),
            key: key.to_string(),
            remainder,
        })
    }
}

impl Display for SettingsKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.section, self.key)
    }
}

/// Editable keys of the `connection` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnUpdate {
    Autoconnect(bool),
    AutoconnectPriority(i32),
}

/// Editable keys of the `802-11-wireless` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WifiUpdate {
    Band(WifiBand),
    Channel(u32),
    Hidden(bool),
    Mode(WifiMode),
    Ssid(Vec<u8>),
}

/// Editable keys of the `802-11-wireless-security` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WifiSecUpdate {
    Group(EnumSet<GroupCipher>),
    KeyMgmt(KeyMgmt),
    Pairwise(EnumSet<PairwiseCipher>),
    Proto(EnumSet<WpaProto>),
    Psk(String),
}

/// One typed value to write into a profile's settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsUpdate {
    Conn(ConnUpdate),
    Wifi(WifiUpdate),
    WifiSec(WifiSecUpdate),
}

impl SettingsUpdate {
    /// The settings path this update writes to.
    pub fn key(&self) -> SettingsKey {
        let (sect, key) = match self {
            SettingsUpdate::Conn(u) => (
                section::CONNECTION,
                match u {
                    ConnUpdate::Autoconnect(_) => conn_key::AUTOCONNECT,
                    ConnUpdate::AutoconnectPriority(_) => conn_key::AUTOCONNECT_PRIORITY,
                },
            ),
            SettingsUpdate::Wifi(u) => (
                section::WIFI,
                match u {
                    WifiUpdate::Band(_) => wifi_key::BAND,
                    WifiUpdate::Channel(_) => wifi_key::CHANNEL,
                    WifiUpdate::Hidden(_) => wifi_key::HIDDEN,
                    WifiUpdate::Mode(_) => wifi_key::MODE,
                    WifiUpdate::Ssid(_) => wifi_key::SSID,
                },
            ),
            SettingsUpdate::WifiSec(u) => (
                section::WIFI_SECURITY,
                match u {
                    WifiSecUpdate::Group(_) => wifi_sec_key::GROUP,
                    WifiSecUpdate::KeyMgmt(_) => wifi_sec_key::KEY_MGMT,
                    WifiSecUpdate::Pairwise(_) => wifi_sec_key::PAIRWISE,
                    WifiSecUpdate::Proto(_) => wifi_sec_key::PROTO,
                    WifiSecUpdate::Psk(_) => wifi_sec_key::PSK,
                },
            ),
        };
        SettingsKey::new(sect, key)
    }

    /// Encodes the update the way NetworkManager expects the key's value.
    pub fn to_value(&self) -> Result<OwnedValue, NmError> {
        let value = match self {
            SettingsUpdate::Conn(ConnUpdate::Autoconnect(v))
            | SettingsUpdate::Wifi(WifiUpdate::Hidden(v)) => OwnedValue::from(*v),
            SettingsUpdate::Conn(ConnUpdate::AutoconnectPriority(v)) => OwnedValue::from(*v),
            SettingsUpdate::Wifi(WifiUpdate::Channel(v)) => OwnedValue::from(*v),
            SettingsUpdate::Wifi(WifiUpdate::Band(v)) => string_value(v.as_str()),
            SettingsUpdate::Wifi(WifiUpdate::Mode(v)) => string_value(v.as_str()),
            SettingsUpdate::Wifi(WifiUpdate::Ssid(bytes)) => {
                OwnedValue::try_from(Array::from(bytes.clone()))?
            }
            SettingsUpdate::WifiSec(WifiSecUpdate::KeyMgmt(v)) => string_value(v.as_str()),
            SettingsUpdate::WifiSec(WifiSecUpdate::Psk(v)) => string_value(v),
            SettingsUpdate::WifiSec(WifiSecUpdate::Group(set)) => string_array(set.strings())?,
            SettingsUpdate::WifiSec(WifiSecUpdate::Pairwise(set)) => string_array(set.strings())?,
            SettingsUpdate::WifiSec(WifiSecUpdate::Proto(set)) => string_array(set.strings())?,
        };
        Ok(value)
    }
}

fn string_value(s: &str) -> OwnedValue {
    OwnedValue::from(Str::from(s.to_string()))
}

fn string_array(strings: Vec<String>) -> Result<OwnedValue, NmError> {
    Ok(OwnedValue::try_from(Array::from(strings))?)
}

/// Updates keyed by the settings path they write to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsUpdates(BTreeMap<SettingsKey, SettingsUpdate>);

impl SettingsUpdates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the update for its key.
    pub fn insert(&mut self, update: SettingsUpdate) {
        self.0.insert(update.key(), update);
    }

    pub fn get(&self, section: &str, key: &str) -> Option<&SettingsUpdate> {
        self.0.get(&SettingsKey::new(section, key))
    }

    pub fn remove(&mut self, section: &str, key: &str) -> Option<SettingsUpdate> {
        self.0.remove(&SettingsKey::new(section, key))
    }

    pub fn contains(&self, section: &str, key: &str) -> bool {
        self.get(section, key).is_some()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, SettingsKey, SettingsUpdate> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<SettingsUpdate> for SettingsUpdates {
    fn from_iter<I: IntoIterator<Item = SettingsUpdate>>(iter: I) -> Self {
        let mut updates = Self::new();
        iter.into_iter().for_each(|u| updates.insert(u));
        updates
    }
}

impl<'a> IntoIterator for &'a SettingsUpdates {
    type Item = (&'a SettingsKey, &'a SettingsUpdate);
    type IntoIter = btree_map::Iter<'a, SettingsKey, SettingsUpdate>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

bitflags! {
    /// `NMSettingsUpdate2Flags` passed to `Update2`.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    pub struct UpdateFlags: u32 {
        const TO_DISK = 0x1;
        const IN_MEMORY = 0x2;
        const IN_MEMORY_DETACHED = 0x4;
        const IN_MEMORY_ONLY = 0x8;
        const VOLATILE = 0x10;
        const BLOCK_AUTOCONNECT = 0x20;
        const NO_REAPPLY = 0x40;
    }
}

/// Whether an update is applied in memory only or also persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateKind {
    /// Change the running configuration without writing it to disk.
    Apply,
    /// Persist the change and apply it.
    Save,
}

impl UpdateKind {
    pub fn flags(&self) -> UpdateFlags {
        match self {
            UpdateKind::Apply => UpdateFlags::IN_MEMORY,
            UpdateKind::Save => UpdateFlags::TO_DISK,
        }
    }
}

impl FromStr for UpdateKind {
    type Err = NmError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_lowercase().as_str() {
            "apply temporarily" | "apply" => Ok(UpdateKind::Apply),
            "save and apply" | "save" => Ok(UpdateKind::Save),
            _ => Err(NmError::UnknownUpdateKind(raw.to_string())),
        }
    }
}

impl Display for UpdateKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            UpdateKind::Apply => write!(f, "apply"),
            UpdateKind::Save => write!(f, "save"),
        }
    }
}

/// The outcome of translating a form submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub kind: UpdateKind,
    pub settings: SettingsUpdates,
}

/// A multi-valued form submission, e.g. decoded `application/x-www-form-urlencoded`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues(BTreeMap<String, Vec<String>>);

impl FormValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a value to the key's list.
    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.entry(key.into()).or_default().push(value.into());
    }

    pub fn get_all(&self, key: &str) -> &[String] {
        self.0.get(key).map(Vec::as_slice).unwrap_or_default()
    }

    /// The last submitted value for the key.
    pub fn last(&self, key: &str) -> Option<&str> {
        self.get_all(key).last().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormValues {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut form = Self::new();
        for (k, v) in iter {
            form.append(k, v);
        }
        form
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_settings_key() {
        let key: SettingsKey = "802-11-wireless.band".parse().unwrap();
        assert_eq!(key.section, "802-11-wireless");
        assert_eq!(key.key, "band");
        assert_eq!(key.remainder, None);
        assert_eq!(key.to_string(), "802-11-wireless.band");
    }

    #[test]
    fn parse_settings_key_without_dot_fails() {
        let err = "noDot".parse::<SettingsKey>().unwrap_err();
        assert!(matches!(err, NmError::InvalidSettingsKey(ref k) if k == "noDot"));
    }

    #[test]
    fn parse_settings_key_rejects_empty_parts() {
        assert!(".band".parse::<SettingsKey>().is_err());
        assert!("connection.".parse::<SettingsKey>().is_err());
    }

    #[test]
    fn remainder_is_kept_but_not_rendered() {
        let key: SettingsKey = "ipv4.address-data.0".parse().unwrap();
        assert_eq!(key.remainder.as_deref(), Some("0"));
        assert_eq!(key.to_string(), "ipv4.address-data");
    }

    #[test]
    fn update_kind_selector() {
        assert_eq!(
            "Apply Temporarily".parse::<UpdateKind>().unwrap(),
            UpdateKind::Apply
        );
        assert_eq!(
            "save and apply".parse::<UpdateKind>().unwrap(),
            UpdateKind::Save
        );
        assert!(matches!(
            "discard".parse::<UpdateKind>(),
            Err(NmError::UnknownUpdateKind(_))
        ));
    }

    #[test]
    fn update_kinds_use_distinct_flags() {
        assert_eq!(UpdateKind::Save.flags().bits(), 0x1);
        assert_eq!(UpdateKind::Apply.flags().bits(), 0x2);
        assert_ne!(UpdateKind::Save.flags(), UpdateKind::Apply.flags());
    }

    #[test]
    fn updates_are_keyed_by_settings_path() {
        let mut updates = SettingsUpdates::new();
        updates.insert(SettingsUpdate::Wifi(WifiUpdate::Channel(1)));
        updates.insert(SettingsUpdate::Wifi(WifiUpdate::Channel(6)));
        assert_eq!(updates.len(), 1);
        assert_eq!(
            updates.get("802-11-wireless", "channel"),
            Some(&SettingsUpdate::Wifi(WifiUpdate::Channel(6)))
        );
    }

    #[test]
    fn encodes_values() {
        let v = SettingsUpdate::Wifi(WifiUpdate::Ssid(b"lab".to_vec()))
            .to_value()
            .unwrap();
        assert_eq!(Vec::<u8>::try_from(v).unwrap(), b"lab".to_vec());

        let v = SettingsUpdate::WifiSec(WifiSecUpdate::Proto(EnumSet::new(["rsn"])))
            .to_value()
            .unwrap();
        assert_eq!(Vec::<String>::try_from(v).unwrap(), vec!["rsn".to_string()]);

        let v = SettingsUpdate::Conn(ConnUpdate::AutoconnectPriority(-5))
            .to_value()
            .unwrap();
        assert_eq!(i32::try_from(v).unwrap(), -5);
    }

    #[test]
    fn form_values_keep_every_submission() {
        let form: FormValues = [("connection.autoconnect", "off"), ("connection.autoconnect", "on")]
            .into_iter()
            .collect();
        assert_eq!(form.get_all("connection.autoconnect").len(), 2);
        assert_eq!(form.last("connection.autoconnect"), Some("on"));
        assert_eq!(form.last("missing"), None);
    }
}
