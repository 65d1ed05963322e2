//! Translation of operator form submissions into typed settings updates.
//!
//! Form keys are `section.key` paths. Keys that don't parse, or that name a
//! setting the console doesn't edit, are skipped so a form can carry unrelated
//! fields. Everything is validated locally before any D-Bus call happens.

use log::debug;

use crate::Result;
use crate::api::models::{
    ConnUpdate, EnumSet, FormValues, GroupCipher, KeyMgmt, NmError, PairwiseCipher,
    ProfileUpdate, SettingsKey, SettingsUpdate, SettingsUpdates, StringEnum, UpdateKind,
    WifiBand, WifiMode, WifiSecUpdate, WifiUpdate, WpaProto,
};
use crate::types::constants::{conn_key, limits, section, wifi_key, wifi_sec_key};

/// Translates a form submission into an update of the given kind.
///
/// `kind` is the update-type selector, e.g. `"apply temporarily"` or
/// `"save and apply"`.
///
/// # Example
///
/// ```
/// use nmconsole::{FormValues, UpdateKind, translate_form};
///
/// let form: FormValues = [
///     ("connection.autoconnect", "on"),
///     ("802-11-wireless.band", "bg"),
///     ("802-11-wireless.channel", "6"),
///     ("csrf_token", "ignored"),
/// ]
/// .into_iter()
/// .collect();
///
/// let update = translate_form("save and apply", &form).unwrap();
/// assert_eq!(update.kind, UpdateKind::Save);
/// assert_eq!(update.settings.len(), 3);
/// ```
pub fn translate_form(kind: &str, form: &FormValues) -> Result<ProfileUpdate> {
    let kind: UpdateKind = kind.parse()?;
    let settings = translate_settings(form)?;
    Ok(ProfileUpdate { kind, settings })
}

/// Translates the settings fields of a form submission.
pub fn translate_settings(form: &FormValues) -> Result<SettingsUpdates> {
    let mut updates = SettingsUpdates::new();
    for (raw_key, values) in form.iter() {
        let key: SettingsKey = match raw_key.parse() {
            Ok(key) => key,
            Err(_) => {
                debug!("Skipping form field {raw_key}");
                continue;
            }
        };
        let parsed = parse_field(&key, values).map_err(|e| NmError::InvalidSetting {
            key: key.to_string(),
            value: shown_value(&key, values),
            source: Box::new(e),
        })?;
        match parsed {
            Some(update) => updates.insert(update),
            None => debug!("Ignoring form field {key}, which isn't an editable setting"),
        }
    }

    retain_stored_psk(&mut updates);
    check_channel_band(&updates)?;
    Ok(updates)
}

fn is_multi_valued(key: &SettingsKey) -> bool {
    key.section == section::WIFI_SECURITY
        && matches!(
            key.key.as_str(),
            wifi_sec_key::GROUP | wifi_sec_key::PAIRWISE | wifi_sec_key::PROTO
        )
}

/// The submitted value(s) to show in an error for `key`.
fn shown_value(key: &SettingsKey, values: &[String]) -> String {
    if is_multi_valued(key) {
        values
            .iter()
            .filter(|v| !v.is_empty())
            .cloned()
            .collect::<Vec<_>>()
            .join(",")
    } else {
        values.last().cloned().unwrap_or_default()
    }
}

/// Parses one field; `None` for keys the console doesn't edit.
fn parse_field(key: &SettingsKey, values: &[String]) -> Result<Option<SettingsUpdate>> {
    // Checkboxes may submit a hidden default followed by the checked value.
    let last = values.last().map(String::as_str).unwrap_or_default();

    let update = match (key.section.as_str(), key.key.as_str()) {
        (section::CONNECTION, conn_key::AUTOCONNECT) => {
            SettingsUpdate::Conn(ConnUpdate::Autoconnect(parse_checkbox(last, "on", "off")?))
        }
        (section::CONNECTION, conn_key::AUTOCONNECT_PRIORITY) => {
            SettingsUpdate::Conn(ConnUpdate::AutoconnectPriority(parse_bounded(last)?))
        }
        (section::WIFI, wifi_key::BAND) => SettingsUpdate::Wifi(WifiUpdate::Band(checked(last)?)),
        (section::WIFI, wifi_key::CHANNEL) => {
            let channel = parse_bounded(last)?;
            let channel = u32::try_from(channel).map_err(|_| NmError::OutOfRange {
                value: channel.into(),
                min: 0,
                max: limits::AUTOCONNECT_PRIORITY_MAX.into(),
            })?;
            SettingsUpdate::Wifi(WifiUpdate::Channel(channel))
        }
        (section::WIFI, wifi_key::HIDDEN) => {
            SettingsUpdate::Wifi(WifiUpdate::Hidden(parse_checkbox(last, "true", "false")?))
        }
        (section::WIFI, wifi_key::MODE) => {
            SettingsUpdate::Wifi(WifiUpdate::Mode(checked::<WifiMode>(last)?))
        }
        (section::WIFI, wifi_key::SSID) => {
            let ssid = last.as_bytes();
            if ssid.len() > limits::SSID_MAX_BYTES {
                return Err(NmError::SsidTooLong(ssid.len()));
            }
            SettingsUpdate::Wifi(WifiUpdate::Ssid(ssid.to_vec()))
        }
        (section::WIFI_SECURITY, wifi_sec_key::GROUP) => {
            SettingsUpdate::WifiSec(WifiSecUpdate::Group(parse_enum_set::<GroupCipher>(values)?))
        }
        (section::WIFI_SECURITY, wifi_sec_key::KEY_MGMT) => {
            SettingsUpdate::WifiSec(WifiSecUpdate::KeyMgmt(checked::<KeyMgmt>(last)?))
        }
        (section::WIFI_SECURITY, wifi_sec_key::PAIRWISE) => SettingsUpdate::WifiSec(
            WifiSecUpdate::Pairwise(parse_enum_set::<PairwiseCipher>(values)?),
        ),
        (section::WIFI_SECURITY, wifi_sec_key::PROTO) => {
            SettingsUpdate::WifiSec(WifiSecUpdate::Proto(parse_enum_set::<WpaProto>(values)?))
        }
        // NetworkManager enforces its own password policy.
        (section::WIFI_SECURITY, wifi_sec_key::PSK) => {
            SettingsUpdate::WifiSec(WifiSecUpdate::Psk(last.to_string()))
        }
        _ => return Ok(None),
    };
    Ok(Some(update))
}

/// Parses a checkbox value which must be exactly `on` or `off`.
pub(crate) fn parse_checkbox(value: &str, on: &'static str, off: &'static str) -> Result<bool> {
    if value == on {
        Ok(true)
    } else if value == off {
        Ok(false)
    } else {
        Err(NmError::InvalidCheckbox {
            value: value.to_string(),
            on,
            off,
        })
    }
}

/// Parses an integer within the autoconnect-priority bounds.
pub(crate) fn parse_bounded(raw: &str) -> Result<i32> {
    let value: i64 = raw.parse().map_err(|source| NmError::InvalidInteger {
        raw: raw.to_string(),
        source,
    })?;
    let (min, max) = (
        limits::AUTOCONNECT_PRIORITY_MIN,
        limits::AUTOCONNECT_PRIORITY_MAX,
    );
    i32::try_from(value)
        .ok()
        .filter(|v| (min..=max).contains(v))
        .ok_or(NmError::OutOfRange {
            value,
            min: min.into(),
            max: max.into(),
        })
}

fn checked<T: StringEnum>(raw: &str) -> Result<T> {
    let value = T::from_raw(raw);
    value.check()?;
    Ok(value)
}

/// Builds a set from non-blank values; the full known set becomes empty.
fn parse_enum_set<T: StringEnum>(values: &[String]) -> Result<EnumSet<T>> {
    let set = EnumSet::<T>::new(values.iter().filter(|v| !v.is_empty()));
    set.check_invalid()?;
    Ok(set.normalized())
}

/// Drops a blank PSK so the stored secret stays untouched.
///
/// A blank PSK is only written when the submitted key management needs no
/// pre-shared key.
fn retain_stored_psk(updates: &mut SettingsUpdates) {
    let psk_blank = matches!(
        updates.get(section::WIFI_SECURITY, wifi_sec_key::PSK),
        Some(SettingsUpdate::WifiSec(WifiSecUpdate::Psk(psk))) if psk.is_empty()
    );
    if !psk_blank {
        return;
    }
    let psk_needed = match updates.get(section::WIFI_SECURITY, wifi_sec_key::KEY_MGMT) {
        Some(SettingsUpdate::WifiSec(WifiSecUpdate::KeyMgmt(km))) => km.requires_psk(),
        _ => true,
    };
    if psk_needed {
        debug!("Keeping stored PSK: blank PSK submitted");
        updates.remove(section::WIFI_SECURITY, wifi_sec_key::PSK);
    }
}

/// A fixed channel is meaningless without a band.
fn check_channel_band(updates: &SettingsUpdates) -> Result<()> {
    let Some(SettingsUpdate::Wifi(WifiUpdate::Channel(channel))) =
        updates.get(section::WIFI, wifi_key::CHANNEL)
    else {
        return Ok(());
    };
    if *channel == 0 {
        return Ok(());
    }
    let has_band = matches!(
        updates.get(section::WIFI, wifi_key::BAND),
        Some(SettingsUpdate::Wifi(WifiUpdate::Band(band))) if *band != WifiBand::Any
    );
    if has_band {
        return Ok(());
    }
    Err(NmError::InvalidSetting {
        key: SettingsKey::new(section::WIFI, wifi_key::CHANNEL).to_string(),
        value: channel.to_string(),
        source: Box::new(NmError::ChannelWithoutBand(*channel)),
    })
}
