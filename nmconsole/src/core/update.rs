//! Merging typed updates onto a profile's current settings.

use log::debug;

use crate::Result;
use crate::api::models::{
    ResultExt, SettingsUpdate, SettingsUpdates, StringEnum, WifiSecUpdate, WifiUpdate,
};
use crate::types::constants::{ip_key, section, wifi_key, wifi_sec_key};
use crate::util::variant::RawSettings;

/// Writes `updates` into `raw`, touching only the updated keys.
///
/// Legacy `addresses`/`routes` fields are stripped first, since NetworkManager
/// would let them override `address-data` and `route-data`. An empty band is
/// removed rather than written, and a profile whose key management resolves
/// to "no security" loses its whole security section.
pub(crate) fn merge_updates(raw: &mut RawSettings, updates: &SettingsUpdates) -> Result<()> {
    strip_legacy_fields(raw);

    for (key, update) in updates {
        if let SettingsUpdate::Wifi(WifiUpdate::Band(band)) = update
            && band.as_str().is_empty()
        {
            if let Some(wifi) = raw.get_mut(section::WIFI) {
                wifi.remove(wifi_key::BAND);
            }
            continue;
        }
        let value = update
            .to_value()
            .with_context(|| format!("couldn't set value for key {key}"))?;
        raw.entry(key.section.clone())
            .or_default()
            .insert(key.key.clone(), value);
    }

    if resolves_to_open(raw, updates) {
        debug!("Removing {} section of open network", section::WIFI_SECURITY);
        raw.remove(section::WIFI_SECURITY);
    }
    Ok(())
}

fn strip_legacy_fields(raw: &mut RawSettings) {
    for name in [section::IPV4, section::IPV6] {
        if let Some(ip) = raw.get_mut(name) {
            for legacy in ip_key::LEGACY {
                ip.remove(legacy);
            }
        }
    }
}

/// Whether the effective key management is the empty "no security" value.
fn resolves_to_open(raw: &RawSettings, updates: &SettingsUpdates) -> bool {
    if let Some(SettingsUpdate::WifiSec(WifiSecUpdate::KeyMgmt(km))) =
        updates.get(section::WIFI_SECURITY, wifi_sec_key::KEY_MGMT)
    {
        return km.as_str().is_empty();
    }
    raw.get(section::WIFI_SECURITY)
        .and_then(|s| s.get(wifi_sec_key::KEY_MGMT))
        .and_then(|v| String::try_from(v.try_clone().ok()?).ok())
        .is_some_and(|km| km.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::{ConnUpdate, EnumSet, KeyMgmt, WifiBand, WifiMode};
    use crate::util::variant::RawSection;
    use zvariant::{OwnedValue, Str};

    fn s(v: &str) -> OwnedValue {
        OwnedValue::from(Str::from(v.to_string()))
    }

    fn get_str(raw: &RawSettings, sect: &str, key: &str) -> Option<String> {
        let v = raw.get(sect)?.get(key)?;
        String::try_from(v.try_clone().unwrap()).ok()
    }

    fn current() -> RawSettings {
        let mut raw = RawSettings::new();
        let mut conn = RawSection::new();
        conn.insert("id".into(), s("wlan0-internet"));
        conn.insert("zone".into(), s("trusted"));
        raw.insert("connection".into(), conn);

        let mut wifi = RawSection::new();
        wifi.insert("band".into(), s("a"));
        wifi.insert("mode".into(), s("infrastructure"));
        raw.insert("802-11-wireless".into(), wifi);

        let mut sec = RawSection::new();
        sec.insert("key-mgmt".into(), s("wpa-psk"));
        raw.insert("802-11-wireless-security".into(), sec);

        let mut ipv4 = RawSection::new();
        ipv4.insert("method".into(), s("auto"));
        ipv4.insert("addresses".into(), OwnedValue::from(0u32));
        ipv4.insert("routes".into(), OwnedValue::from(0u32));
        raw.insert("ipv4".into(), ipv4);

        let mut ipv6 = RawSection::new();
        ipv6.insert("routes".into(), OwnedValue::from(0u32));
        raw.insert("ipv6".into(), ipv6);
        raw
    }

    #[test]
    fn empty_band_removes_the_key() {
        let mut raw = current();
        let updates: SettingsUpdates =
            [SettingsUpdate::Wifi(WifiUpdate::Band(WifiBand::Any))].into_iter().collect();
        merge_updates(&mut raw, &updates).unwrap();
        assert!(!raw["802-11-wireless"].contains_key("band"));
        assert_eq!(
            get_str(&raw, "802-11-wireless", "mode").as_deref(),
            Some("infrastructure")
        );
    }

    #[test]
    fn band_is_written_when_set() {
        let mut raw = current();
        let updates: SettingsUpdates =
            [SettingsUpdate::Wifi(WifiUpdate::Band(WifiBand::Bg))].into_iter().collect();
        merge_updates(&mut raw, &updates).unwrap();
        assert_eq!(get_str(&raw, "802-11-wireless", "band").as_deref(), Some("bg"));
    }

    #[test]
    fn legacy_ip_fields_are_stripped() {
        let mut raw = current();
        merge_updates(&mut raw, &SettingsUpdates::new()).unwrap();
        assert!(!raw["ipv4"].contains_key("addresses"));
        assert!(!raw["ipv4"].contains_key("routes"));
        assert!(!raw["ipv6"].contains_key("routes"));
        assert_eq!(get_str(&raw, "ipv4", "method").as_deref(), Some("auto"));
    }

    #[test]
    fn unrelated_fields_are_preserved() {
        let mut raw = current();
        let updates: SettingsUpdates = [
            SettingsUpdate::Conn(ConnUpdate::Autoconnect(false)),
            SettingsUpdate::Wifi(WifiUpdate::Mode(WifiMode::Ap)),
        ]
        .into_iter()
        .collect();
        merge_updates(&mut raw, &updates).unwrap();
        assert_eq!(
            get_str(&raw, "connection", "zone").as_deref(),
            Some("trusted")
        );
        assert_eq!(get_str(&raw, "connection", "id").as_deref(), Some("wlan0-internet"));
        assert_eq!(get_str(&raw, "802-11-wireless", "mode").as_deref(), Some("ap"));
        let autoconnect = raw["connection"]["autoconnect"].try_clone().unwrap();
        assert!(!bool::try_from(autoconnect).unwrap());
    }

    #[test]
    fn open_key_mgmt_removes_security_section() {
        let mut raw = current();
        let updates: SettingsUpdates = [
            SettingsUpdate::WifiSec(WifiSecUpdate::KeyMgmt(KeyMgmt::from_raw(""))),
            SettingsUpdate::WifiSec(WifiSecUpdate::Psk(String::new())),
        ]
        .into_iter()
        .collect();
        merge_updates(&mut raw, &updates).unwrap();
        assert!(!raw.contains_key("802-11-wireless-security"));
    }

    #[test]
    fn secured_profile_keeps_security_section() {
        let mut raw = current();
        let updates: SettingsUpdates = [SettingsUpdate::WifiSec(WifiSecUpdate::Proto(
            EnumSet::new(["rsn"]),
        ))]
        .into_iter()
        .collect();
        merge_updates(&mut raw, &updates).unwrap();
        assert_eq!(
            get_str(&raw, "802-11-wireless-security", "key-mgmt").as_deref(),
            Some("wpa-psk")
        );
        assert!(raw["802-11-wireless-security"].contains_key("proto"));
    }

    #[test]
    fn missing_sections_are_created() {
        let mut raw = RawSettings::new();
        let updates: SettingsUpdates =
            [SettingsUpdate::Wifi(WifiUpdate::Channel(11))].into_iter().collect();
        merge_updates(&mut raw, &updates).unwrap();
        let channel = raw["802-11-wireless"]["channel"].try_clone().unwrap();
        assert_eq!(u32::try_from(channel).unwrap(), 11);
    }
}
