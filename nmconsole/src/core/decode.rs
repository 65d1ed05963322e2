//! Decoding of raw settings dictionaries into [`ConnProfileSettings`].
//!
//! Each field is looked up in its section and is either required, or
//! optional with a default. Present values of the wrong D-Bus type are
//! always an error.

use log::warn;
use std::collections::{BTreeMap, HashMap};
use std::net::IpAddr;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use uuid::Uuid;
use zvariant::OwnedValue;

use crate::Result;
use crate::api::models::{
    ConnProfileSettings, ConnSettings, ConnType, EnumSet, IpAddress, IpPrefix, Ipv4Settings,
    Ipv6Settings, KeyMgmt, NmError, PskFlags, ResultExt, StringEnum, WifiBand, WifiMode,
    WifiSecSettings, WifiSettings,
};
use crate::types::constants::{conn_key, ip_key, section, wifi_key, wifi_sec_key};
use crate::util::variant::{RawSection, RawSettings, optional, render_value, required};

/// Decodes every section of a profile.
///
/// `secrets` is the result of `GetSecrets` for the Wi-Fi security section,
/// or `None` when the secrets couldn't be read.
pub(crate) fn decode_settings(
    raw: &RawSettings,
    secrets: Option<&RawSettings>,
) -> Result<ConnProfileSettings> {
    let conn = decode_conn(raw.get(section::CONNECTION))
        .with_context(|| format!("couldn't parse '{}' section", section::CONNECTION))?;

    let (wifi, wifi_sec) = if conn.conn_type.is_wifi() {
        let wifi = decode_wifi(raw.get(section::WIFI))
            .with_context(|| format!("couldn't parse '{}' section", section::WIFI))?;
        let wifi_sec = decode_wifi_sec(
            raw.get(section::WIFI_SECURITY),
            secrets.and_then(|s| s.get(section::WIFI_SECURITY)),
        )
        .with_context(|| format!("couldn't parse '{}' section", section::WIFI_SECURITY))?;
        (wifi, wifi_sec)
    } else {
        (WifiSettings::default(), WifiSecSettings::default())
    };

    let ipv4 = decode_ipv4(raw.get(section::IPV4))
        .with_context(|| format!("couldn't parse '{}' section", section::IPV4))?;
    let ipv6 = decode_ipv6(raw.get(section::IPV6))
        .with_context(|| format!("couldn't parse '{}' section", section::IPV6))?;

    Ok(ConnProfileSettings {
        conn,
        wifi,
        wifi_sec,
        ipv4,
        ipv6,
    })
}

/// Whether the raw profile is of type `802-11-wireless`, i.e. has Wi-Fi secrets.
pub(crate) fn is_wifi_profile(raw: &RawSettings) -> bool {
    optional::<String>(raw.get(section::CONNECTION), conn_key::TYPE, None, String::new())
        .is_ok_and(|t| ConnType::from_raw(&t).is_wifi())
}

fn decode_conn(s: Option<&RawSection>) -> Result<ConnSettings> {
    let raw_uuid: String = required(s, conn_key::UUID, Some("UUID"))?;
    let uuid = Uuid::parse_str(&raw_uuid).map_err(|source| NmError::InvalidUuid {
        raw: raw_uuid.clone(),
        source,
    })?;
    let raw_type: String = required(s, conn_key::TYPE, None)?;

    Ok(ConnSettings {
        auth_retries: optional(s, conn_key::AUTH_RETRIES, None, -1)?,
        autoconnect: optional(s, conn_key::AUTOCONNECT, None, true)?,
        autoconnect_priority: optional(s, conn_key::AUTOCONNECT_PRIORITY, None, 0)?,
        autoconnect_retries: optional(s, conn_key::AUTOCONNECT_RETRIES, None, -1)?,
        id: required(s, conn_key::ID, Some("ID"))?,
        interface_name: required(s, conn_key::INTERFACE_NAME, None)?,
        stable_id: optional(s, conn_key::STABLE_ID, Some("stable ID"), String::new())?,
        timestamp: timestamp_from_secs(optional(s, conn_key::TIMESTAMP, None, 0u64)?),
        conn_type: ConnType::from_raw(&raw_type),
        uuid,
        zone: optional(s, conn_key::ZONE, None, String::new())?,
    })
}

/// Converts a `connection.timestamp`; zero means the profile never activated.
fn timestamp_from_secs(secs: u64) -> Option<SystemTime> {
    if secs > i64::MAX as u64 {
        warn!("Ignoring out-of-range connection timestamp {secs}");
        return None;
    }
    if secs == 0 {
        return None;
    }
    UNIX_EPOCH.checked_add(Duration::from_secs(secs))
}

fn decode_wifi(s: Option<&RawSection>) -> Result<WifiSettings> {
    let band: String = optional(s, wifi_key::BAND, None, String::new())?;
    let mode: String = optional(s, wifi_key::MODE, None, String::new())?;

    Ok(WifiSettings {
        band: WifiBand::from_raw(&band),
        channel: optional(s, wifi_key::CHANNEL, None, 0u32)?,
        hidden: optional(s, wifi_key::HIDDEN, None, false)?,
        mode: WifiMode::from_raw(&mode),
        ssid: optional(s, wifi_key::SSID, Some("SSID"), Vec::<u8>::new())?,
    })
}

fn decode_wifi_sec(s: Option<&RawSection>, secrets: Option<&RawSection>) -> Result<WifiSecSettings> {
    let group: Vec<String> = optional(
        s,
        wifi_sec_key::GROUP,
        Some("group/broadcast encryption algorithms whitelist"),
        Vec::new(),
    )?;
    let key_mgmt: String = optional(
        s,
        wifi_sec_key::KEY_MGMT,
        Some("key management method"),
        String::new(),
    )?;
    let pairwise: Vec<String> = optional(
        s,
        wifi_sec_key::PAIRWISE,
        Some("pairwise encryption algorithms whitelist"),
        Vec::new(),
    )?;
    let proto: Vec<String> = optional(
        s,
        wifi_sec_key::PROTO,
        Some("WPA protocol versions whitelist"),
        Vec::new(),
    )?;
    let psk_flags: u32 = optional(s, wifi_sec_key::PSK_FLAGS, None, 0u32)?;

    Ok(WifiSecSettings {
        group: EnumSet::new(group),
        key_mgmt: KeyMgmt::from_raw(&key_mgmt),
        pairwise: EnumSet::new(pairwise),
        proto: EnumSet::new(proto),
        psk: decode_psk(secrets),
        psk_flags: PskFlags::from(psk_flags),
    })
}

/// An unreadable PSK reads as absent.
fn decode_psk(secrets: Option<&RawSection>) -> String {
    optional(secrets, wifi_sec_key::PSK, Some("PSK"), String::new()).unwrap_or_else(|e| {
        warn!("Ignoring unreadable PSK: {e}");
        String::new()
    })
}

fn decode_addresses(s: Option<&RawSection>) -> Result<Vec<IpAddress>> {
    let entries: Vec<HashMap<String, OwnedValue>> =
        optional(s, ip_key::ADDRESS_DATA, None, Vec::new())?;
    entries.iter().map(parse_ip_address).collect()
}

fn decode_ipv4(s: Option<&RawSection>) -> Result<Ipv4Settings> {
    Ok(Ipv4Settings {
        addresses: decode_addresses(s)?,
        method: optional(s, ip_key::METHOD, None, String::new())?,
        never_default: optional(s, ip_key::NEVER_DEFAULT, None, false)?,
    })
}

fn decode_ipv6(s: Option<&RawSection>) -> Result<Ipv6Settings> {
    Ok(Ipv6Settings {
        addresses: decode_addresses(s)?,
        addr_gen_mode: optional(s, ip_key::ADDR_GEN_MODE, None, 0i32)?,
        method: optional(s, ip_key::METHOD, None, String::new())?,
    })
}

/// Parses one `address-data` entry: `address` and `prefix`, plus attributes.
pub(crate) fn parse_ip_address(entry: &HashMap<String, OwnedValue>) -> Result<IpAddress> {
    let raw_addr: String = required(Some(entry), ip_key::ADDRESS, None)?;
    let len: u32 = required(Some(entry), ip_key::PREFIX, None)?;

    let addr: IpAddr = raw_addr
        .parse()
        .map_err(|_| NmError::InvalidAddress(raw_addr.clone()))?;
    let max_len = if addr.is_ipv4() { 32 } else { 128 };
    let len = u8::try_from(len)
        .ok()
        .filter(|l| *l <= max_len)
        .ok_or_else(|| NmError::InvalidAddress(format!("{raw_addr}/{len}")))?;

    let attributes: BTreeMap<String, String> = entry
        .iter()
        .filter(|(k, _)| k.as_str() != ip_key::ADDRESS && k.as_str() != ip_key::PREFIX)
        .map(|(k, v)| (k.clone(), render_value(v)))
        .collect();

    Ok(IpAddress {
        prefix: IpPrefix { addr, len },
        attributes,
    })
}
