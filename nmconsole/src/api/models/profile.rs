//! Connection profile model.
//!
//! A [`ConnProfile`] is decoded fresh from NetworkManager on every read; the
//! section structs mirror the `connection`, `802-11-wireless`,
//! `802-11-wireless-security`, `ipv4` and `ipv6` settings sections.

use bitflags::bitflags;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};
use std::net::IpAddr;
use std::time::SystemTime;
use uuid::Uuid;

use super::enum_info::{Enum, EnumInfo, EnumSet, Level, StringEnum, serialize_raw};

bitflags! {
    /// `NMSettingsConnectionFlags` of a profile.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
    pub struct ConnProfileFlags: u32 {
        const UNSAVED = 0x1;
        const GENERATED_BY_NM = 0x2;
        const VOLATILE = 0x4;
        const EXTERNAL = 0x8;
    }
}

impl ConnProfileFlags {
    pub fn has_none(&self) -> bool {
        self.is_empty()
    }

    pub fn unsaved(&self) -> bool {
        self.contains(Self::UNSAVED)
    }

    pub fn generated_by_nm(&self) -> bool {
        self.contains(Self::GENERATED_BY_NM)
    }

    pub fn volatile(&self) -> bool {
        self.contains(Self::VOLATILE)
    }

    pub fn external(&self) -> bool {
        self.contains(Self::EXTERNAL)
    }
}

impl From<u32> for ConnProfileFlags {
    fn from(bits: u32) -> Self {
        Self::from_bits_retain(bits)
    }
}

bitflags! {
    /// `NMSettingSecretFlags` of the Wi-Fi PSK.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
    pub struct PskFlags: u32 {
        const AGENT_OWNED = 0x1;
        const NOT_SAVED = 0x2;
        const NOT_REQUIRED = 0x4;
    }
}

impl PskFlags {
    pub fn agent_owned(&self) -> bool {
        self.contains(Self::AGENT_OWNED)
    }

    pub fn not_saved(&self) -> bool {
        self.contains(Self::NOT_SAVED)
    }

    pub fn not_required(&self) -> bool {
        self.contains(Self::NOT_REQUIRED)
    }
}

impl From<u32> for PskFlags {
    fn from(bits: u32) -> Self {
        Self::from_bits_retain(bits)
    }
}

/// Value of `connection.type`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ConnType {
    /// `802-11-wireless`
    Wifi,
    /// `802-3-ethernet`
    Ethernet,
    /// Any other connection type, kept verbatim.
    Other(String),
    #[default]
    Unset,
}

impl ConnType {
    pub fn from_raw(raw: &str) -> Self {
        match raw {
            "802-11-wireless" => ConnType::Wifi,
            "802-3-ethernet" => ConnType::Ethernet,
            "" => ConnType::Unset,
            other => ConnType::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ConnType::Wifi => "802-11-wireless",
            ConnType::Ethernet => "802-3-ethernet",
            ConnType::Other(raw) => raw,
            ConnType::Unset => "",
        }
    }

    pub fn is_wifi(&self) -> bool {
        matches!(self, ConnType::Wifi)
    }
}

impl Enum for ConnType {
    fn info(&self) -> EnumInfo {
        match self {
            ConnType::Wifi => EnumInfo::new("wifi", "", Level::None),
            ConnType::Ethernet => EnumInfo::new("ethernet", "", Level::None),
            other => EnumInfo {
                short: other.as_str().to_string().into(),
                ..EnumInfo::default()
            },
        }
    }
}

impl Display for ConnType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ConnType {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Value of `802-11-wireless.band`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum WifiBand {
    /// `a`, 5 GHz
    A,
    /// `bg`, 2.4 GHz
    Bg,
    /// Empty string: any available band.
    #[default]
    Any,
    Other(String),
}

impl StringEnum for WifiBand {
    const KNOWN: &'static [&'static str] = &["a", "bg", ""];

    fn from_raw(raw: &str) -> Self {
        match raw {
            "a" => WifiBand::A,
            "bg" => WifiBand::Bg,
            "" => WifiBand::Any,
            other => WifiBand::Other(other.to_string()),
        }
    }

    fn as_str(&self) -> &str {
        match self {
            WifiBand::A => "a",
            WifiBand::Bg => "bg",
            WifiBand::Any => "",
            WifiBand::Other(raw) => raw,
        }
    }
}

impl Enum for WifiBand {
    fn info(&self) -> EnumInfo {
        match self {
            WifiBand::A => EnumInfo::new("a", "802.11a (5 GHz)", Level::None),
            WifiBand::Bg => EnumInfo::new("bg", "802.11b/g (2.4 GHz)", Level::None),
            WifiBand::Any => EnumInfo::new("any", "any available band", Level::None),
            WifiBand::Other(raw) => EnumInfo::unknown(format!("unknown band ({raw})")),
        }
    }
}

/// Value of `802-11-wireless.mode`.
///
/// NetworkManager treats an absent or empty mode as infrastructure, so the
/// empty string parses to [`WifiMode::Infrastructure`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum WifiMode {
    #[default]
    Infrastructure,
    Mesh,
    Adhoc,
    Ap,
    Other(String),
}

impl StringEnum for WifiMode {
    const KNOWN: &'static [&'static str] = &["infrastructure", "mesh", "adhoc", "ap"];

    fn from_raw(raw: &str) -> Self {
        match raw {
            "" | "infrastructure" => WifiMode::Infrastructure,
            "mesh" => WifiMode::Mesh,
            "adhoc" => WifiMode::Adhoc,
            "ap" => WifiMode::Ap,
            other => WifiMode::Other(other.to_string()),
        }
    }

    fn as_str(&self) -> &str {
        match self {
            WifiMode::Infrastructure => "infrastructure",
            WifiMode::Mesh => "mesh",
            WifiMode::Adhoc => "adhoc",
            WifiMode::Ap => "ap",
            WifiMode::Other(raw) => raw,
        }
    }
}

impl Enum for WifiMode {
    fn info(&self) -> EnumInfo {
        match self {
            WifiMode::Infrastructure => EnumInfo::new(
                "infrastructure",
                "connect to an external Wi-Fi network",
                Level::None,
            ),
            WifiMode::Mesh => EnumInfo::new("mesh", "connect to a mesh Wi-Fi network", Level::None),
            WifiMode::Adhoc => {
                EnumInfo::new("ad-hoc", "connect to an ad-hoc Wi-Fi network", Level::None)
            }
            WifiMode::Ap => EnumInfo::new("ap", "create a Wi-Fi hotspot", Level::None),
            WifiMode::Other(raw) => EnumInfo::unknown(format!("unknown mode ({raw})")),
        }
    }
}

/// Value of `802-11-wireless-security.key-mgmt`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum KeyMgmt {
    /// Empty string: no password protection.
    #[default]
    Open,
    /// `none`: static WEP.
    Wep,
    Ieee8021x,
    Owe,
    WpaPsk,
    WpaEap,
    Sae,
    WpaEapSuiteB192,
    Other(String),
}

impl KeyMgmt {
    /// Whether the mode authenticates with a pre-shared key.
    pub fn requires_psk(&self) -> bool {
        !matches!(self, KeyMgmt::Open | KeyMgmt::Wep | KeyMgmt::Owe)
    }
}

impl StringEnum for KeyMgmt {
    const KNOWN: &'static [&'static str] = &[
        "",
        "none",
        "ieee8021x",
        "owe",
        "wpa-psk",
        "wpa-eap",
        "sae",
        "wpa-eap-suite-b-192",
    ];

    fn from_raw(raw: &str) -> Self {
        match raw {
            "" => KeyMgmt::Open,
            "none" => KeyMgmt::Wep,
            "ieee8021x" => KeyMgmt::Ieee8021x,
            "owe" => KeyMgmt::Owe,
            "wpa-psk" => KeyMgmt::WpaPsk,
            "wpa-eap" => KeyMgmt::WpaEap,
            "sae" => KeyMgmt::Sae,
            "wpa-eap-suite-b-192" => KeyMgmt::WpaEapSuiteB192,
            other => KeyMgmt::Other(other.to_string()),
        }
    }

    fn as_str(&self) -> &str {
        match self {
            KeyMgmt::Open => "",
            KeyMgmt::Wep => "none",
            KeyMgmt::Ieee8021x => "ieee8021x",
            KeyMgmt::Owe => "owe",
            KeyMgmt::WpaPsk => "wpa-psk",
            KeyMgmt::WpaEap => "wpa-eap",
            KeyMgmt::Sae => "sae",
            KeyMgmt::WpaEapSuiteB192 => "wpa-eap-suite-b-192",
            KeyMgmt::Other(raw) => raw,
        }
    }
}

impl Enum for KeyMgmt {
    fn info(&self) -> EnumInfo {
        match self {
            KeyMgmt::Open => EnumInfo::new("none", "no password protection", Level::None),
            KeyMgmt::Wep => EnumInfo::new("WEP", "WEP (insecure)", Level::None),
            KeyMgmt::Ieee8021x => {
                EnumInfo::new("IEEE 802.1x", "Dynamic WEP (insecure)", Level::None)
            }
            KeyMgmt::Owe => EnumInfo::new("OWE", "Opportunistic Wireless Encryption", Level::None),
            KeyMgmt::WpaPsk => EnumInfo::new("PSK", "WPA2/3-Personal Pre-Shared Key", Level::None),
            KeyMgmt::WpaEap => EnumInfo::new(
                "EAP",
                "WPA2/3-Enterprise Extensible Authentication Protocol",
                Level::None,
            ),
            KeyMgmt::Sae => EnumInfo::new(
                "SAE",
                "WPA3-Personal Simultaneous Authentication of Equals",
                Level::None,
            ),
            KeyMgmt::WpaEapSuiteB192 => EnumInfo::new(
                "EAP SuiteB-192",
                "WPA3-Enterprise Extensible Authentication Protocol with SuiteB-192 bit encryption",
                Level::None,
            ),
            KeyMgmt::Other(raw) => EnumInfo::unknown(format!("unknown key management ({raw})")),
        }
    }
}

/// Member of `802-11-wireless-security.group`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupCipher {
    Wep40,
    Wep104,
    Tkip,
    Ccmp,
    Other(String),
}

impl StringEnum for GroupCipher {
    const KNOWN: &'static [&'static str] = &["wep40", "wep104", "tkip", "ccmp"];

    fn from_raw(raw: &str) -> Self {
        match raw {
            "wep40" => GroupCipher::Wep40,
            "wep104" => GroupCipher::Wep104,
            "tkip" => GroupCipher::Tkip,
            "ccmp" => GroupCipher::Ccmp,
            other => GroupCipher::Other(other.to_string()),
        }
    }

    fn as_str(&self) -> &str {
        match self {
            GroupCipher::Wep40 => "wep40",
            GroupCipher::Wep104 => "wep104",
            GroupCipher::Tkip => "tkip",
            GroupCipher::Ccmp => "ccmp",
            GroupCipher::Other(raw) => raw,
        }
    }
}

impl Enum for GroupCipher {
    fn info(&self) -> EnumInfo {
        match self {
            GroupCipher::Wep40 => EnumInfo::new(
                "WEP-40",
                "Wired Equivalent Privacy with 40-bit key (WEP, insecure)",
                Level::None,
            ),
            GroupCipher::Wep104 => EnumInfo::new(
                "WEP-104",
                "Wired Equivalent Privacy with 104-bit key (WEP, insecure)",
                Level::None,
            ),
            GroupCipher::Tkip => EnumInfo::new(
                "TKIP",
                "Temporal Key Integrity Protocol (WPA, insecure)",
                Level::None,
            ),
            GroupCipher::Ccmp => EnumInfo::new("AES/CCMP", "CCM mode Protocol (WPA2/3)", Level::None),
            GroupCipher::Other(raw) => EnumInfo::unknown(format!(
                "unknown group/broadcast encryption algorithm ({raw})"
            )),
        }
    }
}

/// Member of `802-11-wireless-security.pairwise`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PairwiseCipher {
    Tkip,
    Ccmp,
    Other(String),
}

impl StringEnum for PairwiseCipher {
    const KNOWN: &'static [&'static str] = &["tkip", "ccmp"];

    fn from_raw(raw: &str) -> Self {
        match raw {
            "tkip" => PairwiseCipher::Tkip,
            "ccmp" => PairwiseCipher::Ccmp,
            other => PairwiseCipher::Other(other.to_string()),
        }
    }

    fn as_str(&self) -> &str {
        match self {
            PairwiseCipher::Tkip => "tkip",
            PairwiseCipher::Ccmp => "ccmp",
            PairwiseCipher::Other(raw) => raw,
        }
    }
}

impl Enum for PairwiseCipher {
    fn info(&self) -> EnumInfo {
        match self {
            PairwiseCipher::Tkip => EnumInfo::new(
                "TKIP",
                "Temporal Key Integrity Protocol (WPA, insecure)",
                Level::None,
            ),
            PairwiseCipher::Ccmp => {
                EnumInfo::new("AES/CCMP", "CCM mode Protocol (WPA2/3)", Level::None)
            }
            PairwiseCipher::Other(raw) => {
                EnumInfo::unknown(format!("unknown pairwise encryption algorithm ({raw})"))
            }
        }
    }
}

/// Member of `802-11-wireless-security.proto`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WpaProto {
    Wpa,
    Rsn,
    Other(String),
}

impl StringEnum for WpaProto {
    const KNOWN: &'static [&'static str] = &["wpa", "rsn"];

    fn from_raw(raw: &str) -> Self {
        match raw {
            "wpa" => WpaProto::Wpa,
            "rsn" => WpaProto::Rsn,
            other => WpaProto::Other(other.to_string()),
        }
    }

    fn as_str(&self) -> &str {
        match self {
            WpaProto::Wpa => "wpa",
            WpaProto::Rsn => "rsn",
            WpaProto::Other(raw) => raw,
        }
    }
}

impl Enum for WpaProto {
    fn info(&self) -> EnumInfo {
        match self {
            WpaProto::Wpa => EnumInfo::new("WPA", "Wi-Fi Protected Access (insecure)", Level::None),
            WpaProto::Rsn => EnumInfo::new(
                "WPA2/RSN",
                "Wi-Fi Protected Access 2/3 (Robust Security Network)",
                Level::None,
            ),
            WpaProto::Other(raw) => {
                EnumInfo::unknown(format!("unknown WPA protocol version ({raw})"))
            }
        }
    }
}

/// An IP address with its prefix length, as in `192.168.4.1/24`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IpPrefix {
    pub addr: IpAddr,
    pub len: u8,
}

impl Display for IpPrefix {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.addr, self.len)
    }
}

/// One entry of an `address-data` list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IpAddress {
    pub prefix: IpPrefix,
    /// Every key besides `address` and `prefix`, rendered as text.
    pub attributes: BTreeMap<String, String>,
}

/// The `connection` section.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConnSettings {
    pub auth_retries: i32,
    pub autoconnect: bool,
    pub autoconnect_priority: i32,
    pub autoconnect_retries: i32,
    pub id: String,
    pub interface_name: String,
    pub stable_id: String,
    /// Time of the last successful activation; `None` if never.
    pub timestamp: Option<SystemTime>,
    pub conn_type: ConnType,
    pub uuid: Uuid,
    pub zone: String,
}

/// The `802-11-wireless` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WifiSettings {
    #[serde(serialize_with = "serialize_raw")]
    pub band: WifiBand,
    pub channel: u32,
    pub hidden: bool,
    #[serde(serialize_with = "serialize_raw")]
    pub mode: WifiMode,
    pub ssid: Vec<u8>,
}

impl WifiSettings {
    pub fn ssid_lossy(&self) -> String {
        String::from_utf8_lossy(&self.ssid).into_owned()
    }
}

/// The `802-11-wireless-security` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WifiSecSettings {
    pub group: EnumSet<GroupCipher>,
    #[serde(serialize_with = "serialize_raw")]
    pub key_mgmt: KeyMgmt,
    pub pairwise: EnumSet<PairwiseCipher>,
    pub proto: EnumSet<WpaProto>,
    /// Empty unless the caller may read secrets.
    #[serde(skip_serializing)]
    pub psk: String,
    pub psk_flags: PskFlags,
}

/// The `ipv4` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Ipv4Settings {
    pub addresses: Vec<IpAddress>,
    pub method: String,
    pub never_default: bool,
}

/// The `ipv6` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Ipv6Settings {
    pub addresses: Vec<IpAddress>,
    pub addr_gen_mode: i32,
    pub method: String,
}

/// All decoded sections of a profile.
///
/// `wifi` and `wifi_sec` stay at their defaults unless the profile is a
/// Wi-Fi connection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConnProfileSettings {
    pub conn: ConnSettings,
    pub wifi: WifiSettings,
    pub wifi_sec: WifiSecSettings,
    pub ipv4: Ipv4Settings,
    pub ipv6: Ipv6Settings,
}

/// A NetworkManager connection profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConnProfile {
    pub unsaved: bool,
    pub flags: ConnProfileFlags,
    pub filename: String,
    pub settings: ConnProfileSettings,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conn_type_info_keeps_unknown_raw_value() {
        assert_eq!(ConnType::from_raw("802-11-wireless").info().short, "wifi");
        assert_eq!(ConnType::from_raw("802-3-ethernet").info().short, "ethernet");
        let info = ConnType::from_raw("vpn").info();
        assert_eq!(info.short, "vpn");
        assert_eq!(info.level, Level::None);
    }

    #[test]
    fn band_info() {
        assert_eq!(WifiBand::from_raw("").info().short, "any");
        assert_eq!(WifiBand::from_raw("a").info().details, "802.11a (5 GHz)");
        let info = WifiBand::from_raw("x").info();
        assert!(info.is_error());
        assert_eq!(info.details, "unknown band (x)");
    }

    #[test]
    fn empty_mode_is_infrastructure() {
        assert_eq!(WifiMode::from_raw(""), WifiMode::Infrastructure);
        assert_eq!(WifiMode::from_raw("adhoc").info().short, "ad-hoc");
        assert!(WifiMode::from_raw("monitor").check().is_err());
    }

    #[test]
    fn key_mgmt_round_trips_raw_strings() {
        for raw in KeyMgmt::KNOWN {
            let km = KeyMgmt::from_raw(raw);
            assert_eq!(km.as_str(), *raw);
            assert!(!km.info().is_error());
        }
        assert_eq!(KeyMgmt::from_raw("").info().short, "none");
        assert_eq!(KeyMgmt::from_raw("none").info().short, "WEP");
    }

    #[test]
    fn psk_requirement() {
        assert!(KeyMgmt::WpaPsk.requires_psk());
        assert!(KeyMgmt::Sae.requires_psk());
        assert!(!KeyMgmt::Open.requires_psk());
        assert!(!KeyMgmt::Wep.requires_psk());
        assert!(!KeyMgmt::Owe.requires_psk());
    }

    #[test]
    fn profile_flags_predicates_ignore_unknown_bits() {
        let flags = ConnProfileFlags::from(0x1 | 0x8 | 0x100);
        assert!(flags.unsaved());
        assert!(flags.external());
        assert!(!flags.volatile());
        assert!(!flags.generated_by_nm());
        assert!(ConnProfileFlags::from(0).has_none());
    }

    #[test]
    fn psk_flags_predicates() {
        let flags = PskFlags::from(0x2);
        assert!(flags.not_saved());
        assert!(!flags.agent_owned());
        assert!(!flags.not_required());
    }

    #[test]
    fn ip_prefix_display() {
        let prefix = IpPrefix {
            addr: "192.168.4.1".parse().unwrap(),
            len: 24,
        };
        assert_eq!(prefix.to_string(), "192.168.4.1/24");
    }
}
