//! Device, Wi-Fi device and access point models.

use bitflags::bitflags;
use serde::Serialize;
use std::fmt::{self, Display, Formatter};
use std::time::Duration;

use super::enum_info::{Enum, EnumInfo, Level};

bitflags! {
    /// `NMDeviceCapabilities`.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
    pub struct DeviceCaps: u32 {
        const SUPPORTED_BY_NM = 0x1;
        const CARRIER_DETECTABLE = 0x2;
        const IS_SOFTWARE = 0x4;
        const SRIOV = 0x8;
    }
}

impl DeviceCaps {
    pub fn has_none(&self) -> bool {
        self.is_empty()
    }

    pub fn supported_by_nm(&self) -> bool {
        self.contains(Self::SUPPORTED_BY_NM)
    }

    pub fn carrier_detectable(&self) -> bool {
        self.contains(Self::CARRIER_DETECTABLE)
    }

    pub fn is_software(&self) -> bool {
        self.contains(Self::IS_SOFTWARE)
    }

    pub fn supports_sriov(&self) -> bool {
        self.contains(Self::SRIOV)
    }
}

bitflags! {
    /// `NMDeviceInterfaceFlags`.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
    pub struct DeviceInterfaceFlags: u32 {
        const UP = 0x1;
        const LOWER_UP = 0x2;
        const PROMISC = 0x4;
        const CARRIER = 0x10000;
        const LLDP_CLIENT = 0x20000;
    }
}

impl DeviceInterfaceFlags {
    pub fn is_up(&self) -> bool {
        self.contains(Self::UP)
    }

    pub fn is_lower_up(&self) -> bool {
        self.contains(Self::LOWER_UP)
    }

    pub fn is_promiscuous(&self) -> bool {
        self.contains(Self::PROMISC)
    }

    pub fn has_carrier(&self) -> bool {
        self.contains(Self::CARRIER)
    }

    pub fn lldp_client(&self) -> bool {
        self.contains(Self::LLDP_CLIENT)
    }
}

/// NetworkManager device states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DeviceState {
    Unknown,
    Unmanaged,
    Unavailable,
    Disconnected,
    Prepare,
    Config,
    NeedAuth,
    IpConfig,
    IpCheck,
    Secondaries,
    Activated,
    Deactivating,
    Failed,
    Other(u32),
}

impl From<u32> for DeviceState {
    fn from(value: u32) -> Self {
        match value {
            0 => DeviceState::Unknown,
            10 => DeviceState::Unmanaged,
            20 => DeviceState::Unavailable,
            30 => DeviceState::Disconnected,
            40 => DeviceState::Prepare,
            50 => DeviceState::Config,
            60 => DeviceState::NeedAuth,
            70 => DeviceState::IpConfig,
            80 => DeviceState::IpCheck,
            90 => DeviceState::Secondaries,
            100 => DeviceState::Activated,
            110 => DeviceState::Deactivating,
            120 => DeviceState::Failed,
            v => DeviceState::Other(v),
        }
    }
}

impl Enum for DeviceState {
    fn info(&self) -> EnumInfo {
        match self {
            DeviceState::Unknown => EnumInfo::new("unknown", "", Level::Error),
            DeviceState::Unmanaged => {
                EnumInfo::new("unmanaged", "recognized, but not managed", Level::Info)
            }
            DeviceState::Unavailable => EnumInfo::new(
                "unavailable",
                "managed, but not available for use",
                Level::Info,
            ),
            DeviceState::Disconnected => EnumInfo::new(
                "disconnected",
                "can be activated, but currently idle",
                Level::Info,
            ),
            DeviceState::Prepare => EnumInfo::new("prepare", "preparing connection", Level::Info),
            DeviceState::Config => EnumInfo::new("config", "connecting", Level::Info),
            DeviceState::NeedAuth => EnumInfo::new(
                "need auth",
                "more information needed to connect",
                Level::Warning,
            ),
            DeviceState::IpConfig => EnumInfo::new(
                "IP config",
                "requesting IP addresses and routing information",
                Level::Info,
            ),
            DeviceState::IpCheck => EnumInfo::new(
                "IP check",
                "checking whether more action is needed",
                Level::Info,
            ),
            DeviceState::Secondaries => EnumInfo::new(
                "secondaries",
                "waiting for activation of secondary connection",
                Level::Info,
            ),
            DeviceState::Activated => {
                EnumInfo::new("activated", "has a network connection", Level::Success)
            }
            DeviceState::Deactivating => EnumInfo::new(
                "deactivating",
                "cleaning up resources to disconnect from current connection",
                Level::Info,
            ),
            DeviceState::Failed => EnumInfo::new(
                "failed",
                "failed to connect to requested network, cleaning up",
                Level::Error,
            ),
            DeviceState::Other(v) => {
                EnumInfo::unknown(format!("state ({v}) was reported but could not be determined"))
            }
        }
    }
}

/// `NMDeviceStateReason` code.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DeviceStateReason(pub u32);

impl DeviceStateReason {
    fn describe(code: u32) -> Option<(&'static str, &'static str)> {
        let entry = match code {
            0 => ("", ""),
            1 => ("unknown error", ""),
            2 => ("now managed", ""),
            3 => ("now unmanaged", ""),
            4 => ("config failed", "device couldn't be readied for configuration"),
            5 => ("IP config unavailable", "IP configuration couldn't be reserved"),
            6 => ("IP config expired", "IP configuration no longer valid"),
            7 => ("no secrets", "required secrets weren't provided"),
            8 => ("supplicant disconnect", "802.1x supplicant disconnected"),
            9 => ("supplicant config failed", "802.1x supplicant configuration failed"),
            10 => ("supplicant failed", "802.1x supplicant failed"),
            11 => ("supplicant timeout", "802.1x supplicant took too long to authenticate"),
            12 => ("PPP start failed", "PPP service failed to start"),
            13 => ("PPP disconnect", "PPP service disconnected"),
            14 => ("PPP failed", "PPP service failed"),
            15 => ("DHCP start failed", "DHCP client failed to start"),
            16 => ("DHCP error", "DHCP client error"),
            17 => ("DHCP failed", "DHCP client failed"),
            18 => ("shared start failed", "shared connection service failed to start"),
            19 => ("shared failed", "shared connection service failed"),
            20 => ("AutoIP start failed", "AutoIP service failed to start"),
            21 => ("AutoIP error", "AutoIP service error"),
            22 => ("AutoIP failed", "AutoIP service failed"),
            23 => ("modem busy", "line is busy"),
            24 => ("modem no dial tone", ""),
            25 => ("modem no carrier", "carrier couldn't be established"),
            26 => ("modem dial timeout", "dialing request timed out"),
            27 => ("modem dial failed", "dialing attempt failed"),
            28 => ("modem init failed", "modem initialization failed"),
            29 => ("GSM APN failed", "failed to select specified APN"),
            30 => ("GSM registration not searching", "not searching for networks"),
            31 => ("GSM registration denied", "network registration denied"),
            32 => ("GSM registration timeout", "network registration timed out"),
            33 => ("GSM registration failed", "failed to register with requested network"),
            34 => ("GSM PIN check failed", ""),
            35 => ("firmware missing", ""),
            36 => ("removed", "device was removed"),
            37 => ("sleeping", "NetworkManager went to sleep"),
            38 => ("connection removed", "active connection disappeared"),
            39 => ("user requested", "disconnected by user or client"),
            40 => ("carrier", "carrier/link changed"),
            41 => ("connection assumed", "existing connection was assumed"),
            42 => ("supplicant available", "supplicant is now available"),
            43 => ("modem not found", ""),
            44 => ("BT failed", "Bluetooth connection failed or timed out"),
            45 => ("GSM SIM not inserted", "GSM modem's SIM card not inserted"),
            46 => ("GSM PIN required", ""),
            47 => ("GSM PUK required", ""),
            48 => ("GSM SIM wrong", ""),
            49 => (
                "InfiniBand mode",
                "InfiniBand device does not support connected mode",
            ),
            50 => ("dependency failed", "dependency of the connection failed"),
            51 => (
                "BR2684 failed",
                "problem with the RFC 2684 Ethernet over ADSL bridge",
            ),
            52 => ("ModemManager unavailable", "not running"),
            53 => ("SSID not found", "Wi-Fi network couldn't be found"),
            54 => (
                "secondary connection failed",
                "secondary connection of base connection failed",
            ),
            55 => ("DCB FCoE failed", "DCB or FCoE setup failed"),
            56 => ("teamd control failed", ""),
            57 => ("modem failed", "modem failed or no longer available"),
            58 => ("modem available", "modem now ready and available"),
            59 => ("SIM PIN incorrect", ""),
            60 => ("new activation", "new connection activation was enqueued"),
            61 => ("parent changed", "device's parent changed"),
            62 => ("parent managed changed", "device's parent's management changed"),
            63 => (
                "OVSDB failed",
                "problem communicating with Open vSwitch database",
            ),
            64 => ("IP address duplicate", "duplicate IP address detected"),
            65 => ("IP method unsupported", "selected IP method not supported"),
            66 => (
                "SR-IOV configuration failed",
                "configuration of SR-IOV parameters failed",
            ),
            67 => ("peer not found", "Wi-Fi P2P peer not found"),
            68 => ("device handler failed", "device handler dispatcher returned error"),
            69 => (
                "unmanaged by default",
                "because device type is unmanaged by default",
            ),
            70 => (
                "unmanaged external down",
                "it's an external device and is unconfigured (down or no addresses)",
            ),
            71 => ("unmanaged link not init", "the link is not initialized by udev"),
            72 => ("unmanaged quitting", "NetworkManager is quitting"),
            73 => (
                "unmanaged sleeping",
                "networking is disabled or the system is suspended",
            ),
            74 => (
                "unmanaged user conf",
                "unmanaged by user decision in NetworkManager.conf ('unmanaged' in a device section)",
            ),
            75 => ("unmanaged user explicit", "unmanaged by explicit user decision"),
            76 => (
                "unmanaged user settings",
                "unmanaged by user decision via settings plugin",
            ),
            77 => ("unmanaged user udev", "unmanaged via udev rule"),
            _ => return None,
        };
        Some(entry)
    }
}

impl Enum for DeviceStateReason {
    fn info(&self) -> EnumInfo {
        match Self::describe(self.0) {
            Some((short, details)) => EnumInfo::new(short, details, Level::None),
            None => EnumInfo::unknown(format!(
                "reason ({}) was reported but could not be determined",
                self.0
            )),
        }
    }
}

impl From<u32> for DeviceStateReason {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

/// `NMDeviceType` code.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DeviceType(pub u32);

impl DeviceType {
    pub const ETHERNET: DeviceType = DeviceType(1);
    pub const WIFI: DeviceType = DeviceType(2);

    pub fn is_wifi(&self) -> bool {
        *self == Self::WIFI
    }

    fn describe(code: u32) -> Option<(&'static str, &'static str, Level)> {
        let entry = match code {
            0 => ("unknown", "unknown device", Level::Warning),
            1 => ("ethernet", "wired ethernet device", Level::Success),
            2 => ("wifi", "802.11 Wi-Fi device", Level::Success),
            3 => ("unused 1", "not used", Level::Error),
            4 => ("unused 2", "not used", Level::Error),
            5 => (
                "bluetooth",
                "Bluetooth device supporting PAN or DUN access protocols",
                Level::Info,
            ),
            6 => ("olpc mesh", "OLPC XO mesh networking device", Level::Info),
            7 => ("wimax", "802.16e Mobile WiMAX broadband device", Level::Info),
            8 => (
                "modem",
                "modem supporting analog telephone, CDMA/EVDO, GSM/UMTS, or LTE protocols",
                Level::Info,
            ),
            9 => ("infiniband", "IP-over-InfiniBand device", Level::Info),
            10 => ("bond", "bond controller interface", Level::Info),
            11 => ("vlan", "802.1Q VLAN interface", Level::Info),
            12 => ("adsl", "ADSL modem", Level::Info),
            13 => ("bridge", "bridge controller interface", Level::Info),
            14 => (
                "generic",
                "generic support for unrecognized device types",
                Level::Warning,
            ),
            15 => ("team", "team controller interface", Level::Info),
            16 => ("tun", "TUN or TAP interface", Level::Info),
            17 => ("ip tunnel", "IP tunnel interface", Level::Info),
            18 => ("macvlan", "MACVLAN interface", Level::Info),
            19 => ("vxlan", "VXLAN interface", Level::Info),
            20 => ("veth", "VETH interface", Level::Info),
            21 => ("macsec", "MACsec interface", Level::Info),
            22 => ("dummy", "dummy interface", Level::Info),
            23 => ("ppp", "PPP interface", Level::Info),
            24 => ("ovs", "Open vSwitch interface", Level::Info),
            25 => ("ovs port", "Open vSwitch port", Level::Info),
            26 => ("ovs bridge", "Open vSwitch bridge", Level::Info),
            27 => ("wpan", "IEEE 802.15.4 (WPAN) MAC Layer device", Level::Info),
            28 => ("6lowpan", "6LoWPAN interface", Level::Info),
            29 => ("wireguard", "WireGuard interface", Level::Info),
            30 => ("wifi p2p", "802.11 Wi-Fi P2P device", Level::Info),
            31 => (
                "vrf",
                "VRF (Virtual Routing and Forwarding) interface",
                Level::Info,
            ),
            32 => ("loopback", "loopback interface", Level::Info),
            33 => ("hsr", "HSR/PRP device", Level::Info),
            34 => ("ipvlan", "IPVLAN device", Level::Info),
            _ => return None,
        };
        Some(entry)
    }
}

impl Enum for DeviceType {
    fn info(&self) -> EnumInfo {
        match Self::describe(self.0) {
            Some((short, details, level)) => EnumInfo::new(short, details, level),
            None => EnumInfo::unknown(format!(
                "type ({}) was reported but could not be determined",
                self.0
            )),
        }
    }
}

impl From<u32> for DeviceType {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl Display for DeviceType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match Self::describe(self.0) {
            Some((short, _, _)) => f.write_str(short),
            None => write!(f, "Other({})", self.0),
        }
    }
}

/// `NMConnectivityState` of a device.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum ConnectivityState {
    #[default]
    Unknown,
    None,
    Portal,
    Limited,
    Full,
    Other(u32),
}

impl From<u32> for ConnectivityState {
    fn from(value: u32) -> Self {
        match value {
            0 => ConnectivityState::Unknown,
            1 => ConnectivityState::None,
            2 => ConnectivityState::Portal,
            3 => ConnectivityState::Limited,
            4 => ConnectivityState::Full,
            v => ConnectivityState::Other(v),
        }
    }
}

impl Enum for ConnectivityState {
    fn info(&self) -> EnumInfo {
        match self {
            ConnectivityState::Unknown => EnumInfo::new(
                "unknown",
                "connectivity checks disabled or not run yet; internet might be available",
                Level::Info,
            ),
            ConnectivityState::None => EnumInfo::new(
                "none",
                "network connection unavailable, no default route to the internet",
                Level::Info,
            ),
            ConnectivityState::Portal => {
                EnumInfo::new("captive portal", "blocked by a captive portal", Level::Info)
            }
            ConnectivityState::Limited => EnumInfo::new(
                "limited",
                "connected to network without full internet access",
                Level::Info,
            ),
            ConnectivityState::Full => EnumInfo::new(
                "full",
                "connected to network with full internet access",
                Level::Success,
            ),
            ConnectivityState::Other(v) => {
                EnumInfo::unknown(format!("state ({v}) was reported but could not be determined"))
            }
        }
    }
}

/// A network device as NetworkManager reports it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Device {
    /// Control interface name, e.g. `wlan0`.
    pub interface: String,
    /// Data interface name; empty while the device is not activated.
    pub ip_interface: String,
    pub driver: String,
    pub driver_version: String,
    pub firmware_version: String,
    pub capabilities: DeviceCaps,
    pub state: DeviceState,
    pub state_reason: DeviceStateReason,
    pub managed: bool,
    pub autoconnect: bool,
    pub firmware_missing: bool,
    pub nm_plugin_missing: bool,
    pub device_type: DeviceType,
    pub ip4_connectivity: ConnectivityState,
    pub ip6_connectivity: ConnectivityState,
    pub interface_flags: DeviceInterfaceFlags,
    pub hw_address: String,
}

impl Device {
    /// The data interface if there is one, otherwise the control interface.
    pub fn display_interface(&self) -> &str {
        if self.ip_interface.is_empty() {
            &self.interface
        } else {
            &self.ip_interface
        }
    }
}

bitflags! {
    /// `NMDeviceWifiCapabilities`.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
    pub struct WifiCaps: u32 {
        const CIPHER_WEP40 = 0x1;
        const CIPHER_WEP104 = 0x2;
        const CIPHER_TKIP = 0x4;
        const CIPHER_CCMP = 0x8;
        const WPA = 0x10;
        const RSN = 0x20;
        const AP = 0x40;
        const ADHOC = 0x80;
        const FREQ_VALID = 0x100;
        const FREQ_2GHZ = 0x200;
        const FREQ_5GHZ = 0x400;
        const FREQ_6GHZ = 0x800;
        const MESH = 0x1000;
        const IBSS_RSN = 0x2000;
    }
}

impl WifiCaps {
    pub fn supports_ccmp(&self) -> bool {
        self.contains(Self::CIPHER_CCMP)
    }

    pub fn supports_rsn(&self) -> bool {
        self.contains(Self::RSN)
    }

    pub fn supports_ap(&self) -> bool {
        self.contains(Self::AP)
    }

    pub fn supports_adhoc(&self) -> bool {
        self.contains(Self::ADHOC)
    }

    // Band bits are only meaningful when FREQ_VALID is set.
    pub fn supports_2ghz(&self) -> bool {
        self.contains(Self::FREQ_VALID | Self::FREQ_2GHZ)
    }

    pub fn supports_5ghz(&self) -> bool {
        self.contains(Self::FREQ_VALID | Self::FREQ_5GHZ)
    }

    pub fn supports_6ghz(&self) -> bool {
        self.contains(Self::FREQ_VALID | Self::FREQ_6GHZ)
    }

    pub fn supports_mesh(&self) -> bool {
        self.contains(Self::MESH)
    }

    pub fn supports_ibss_rsn(&self) -> bool {
        self.contains(Self::IBSS_RSN)
    }
}

/// `NM80211Mode` of a Wi-Fi device or access point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum WifiDeviceMode {
    #[default]
    Unknown,
    Adhoc,
    Infra,
    Ap,
    Mesh,
    Other(u32),
}

impl From<u32> for WifiDeviceMode {
    fn from(value: u32) -> Self {
        match value {
            0 => WifiDeviceMode::Unknown,
            1 => WifiDeviceMode::Adhoc,
            2 => WifiDeviceMode::Infra,
            3 => WifiDeviceMode::Ap,
            4 => WifiDeviceMode::Mesh,
            v => WifiDeviceMode::Other(v),
        }
    }
}

impl Enum for WifiDeviceMode {
    fn info(&self) -> EnumInfo {
        match self {
            WifiDeviceMode::Unknown => EnumInfo::new("unknown", "", Level::Warning),
            WifiDeviceMode::Adhoc => EnumInfo::new("ad-hoc", "", Level::Info),
            WifiDeviceMode::Infra => EnumInfo::new("access point", "", Level::Info),
            WifiDeviceMode::Ap => EnumInfo::new("hotspot", "", Level::Info),
            WifiDeviceMode::Mesh => EnumInfo::new("mesh", "", Level::Info),
            WifiDeviceMode::Other(v) => EnumInfo::unknown(format!("unknown 802.11 mode {v}")),
        }
    }
}

bitflags! {
    /// `NM80211ApSecurityFlags` of the RSN (WPA2/WPA3) information element.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
    pub struct RsnFlags: u32 {
        const PAIR_CCMP = 0x8;
        const GROUP_CCMP = 0x80;
        const KEY_MGMT_PSK = 0x100;
        const KEY_MGMT_SAE = 0x400;
        const KEY_MGMT_OWE = 0x800;
        const KEY_MGMT_EAP_SUITE_B_192 = 0x2000;
    }
}

impl RsnFlags {
    pub fn is_none(&self) -> bool {
        self.is_empty()
    }

    pub fn supports_pair_ccmp(&self) -> bool {
        self.contains(Self::PAIR_CCMP)
    }

    pub fn supports_group_ccmp(&self) -> bool {
        self.contains(Self::GROUP_CCMP)
    }

    pub fn supports_psk(&self) -> bool {
        self.contains(Self::KEY_MGMT_PSK)
    }

    pub fn supports_sae(&self) -> bool {
        self.contains(Self::KEY_MGMT_SAE)
    }

    pub fn supports_owe(&self) -> bool {
        self.contains(Self::KEY_MGMT_OWE)
    }

    pub fn supports_eap_suite_b_192(&self) -> bool {
        self.contains(Self::KEY_MGMT_EAP_SUITE_B_192)
    }
}

/// A visible Wi-Fi access point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccessPoint {
    pub ssid: String,
    /// MHz
    pub frequency: u32,
    /// Percent
    pub strength: u8,
    /// Time since boot when the AP was last seen; `None` if never.
    pub last_seen: Option<Duration>,
    pub mode: WifiDeviceMode,
    pub rsn_flags: RsnFlags,
}

/// A Wi-Fi device with its wireless-specific properties.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WifiDevice {
    pub device: Device,
    pub mode: WifiDeviceMode,
    pub capabilities: WifiCaps,
    pub active_access_point: Option<AccessPoint>,
    /// Time since boot of the last completed scan; `None` if never scanned.
    pub last_scan: Option<Duration>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn device_state_from_u32() {
        assert_eq!(DeviceState::from(100), DeviceState::Activated);
        assert_eq!(DeviceState::from(60), DeviceState::NeedAuth);
        assert_eq!(DeviceState::from(7), DeviceState::Other(7));
    }

    #[test]
    fn device_state_info_levels() {
        assert_eq!(DeviceState::Activated.info().level, Level::Success);
        assert_eq!(DeviceState::Failed.info().level, Level::Error);
        let info = DeviceState::from(999).info();
        assert_eq!(info.short, "unknown");
        assert_eq!(
            info.details,
            "state (999) was reported but could not be determined"
        );
    }

    #[test]
    fn state_reason_table() {
        assert_eq!(DeviceStateReason(0).info().short, "");
        assert_eq!(DeviceStateReason(53).info().short, "SSID not found");
        assert_eq!(DeviceStateReason(77).info().details, "unmanaged via udev rule");
        assert!(DeviceStateReason(78).info().is_error());
    }

    #[test]
    fn device_type_table() {
        assert_eq!(DeviceType(2).info().short, "wifi");
        assert_eq!(DeviceType(14).info().level, Level::Warning);
        assert!(DeviceType(3).info().is_error());
        assert_eq!(
            DeviceType(99).info().details,
            "type (99) was reported but could not be determined"
        );
        assert_eq!(DeviceType::from(32).to_string(), "loopback");
        assert_eq!(DeviceType::from(99).to_string(), "Other(99)");
        assert!(DeviceType::WIFI.is_wifi());
    }

    #[test]
    fn connectivity_from_u32() {
        assert_eq!(ConnectivityState::from(4), ConnectivityState::Full);
        assert_eq!(ConnectivityState::Full.info().level, Level::Success);
        assert!(ConnectivityState::from(5).info().is_error());
    }

    #[test]
    fn wifi_caps_bands_need_valid_bit() {
        let caps = WifiCaps::from_bits_retain(0x200 | 0x400);
        assert!(!caps.supports_2ghz());
        assert!(!caps.supports_5ghz());
        let caps = WifiCaps::from_bits_retain(0x100 | 0x400 | 0x8);
        assert!(caps.supports_5ghz());
        assert!(!caps.supports_6ghz());
        assert!(caps.supports_ccmp());
    }

    #[test]
    fn interface_flags() {
        let flags = DeviceInterfaceFlags::from_bits_retain(0x1 | 0x10000);
        assert!(flags.is_up());
        assert!(flags.has_carrier());
        assert!(!flags.is_lower_up());
    }

    #[test]
    fn rsn_flags() {
        let flags = RsnFlags::from_bits_retain(0x100 | 0x8);
        assert!(flags.supports_psk());
        assert!(flags.supports_pair_ccmp());
        assert!(!flags.supports_sae());
        assert!(RsnFlags::empty().is_none());
    }

    #[test]
    fn device_modes() {
        assert_eq!(WifiDeviceMode::from(2).info().short, "access point");
        assert_eq!(WifiDeviceMode::from(3).info().short, "hotspot");
        assert!(WifiDeviceMode::from(9).info().is_error());
    }

    #[test]
    fn display_interface_prefers_ip_interface() {
        let mut dev = Device {
            interface: "wlan0".into(),
            ip_interface: String::new(),
            driver: String::new(),
            driver_version: String::new(),
            firmware_version: String::new(),
            capabilities: DeviceCaps::empty(),
            state: DeviceState::Disconnected,
            state_reason: DeviceStateReason(0),
            managed: true,
            autoconnect: true,
            firmware_missing: false,
            nm_plugin_missing: false,
            device_type: DeviceType::WIFI,
            ip4_connectivity: ConnectivityState::Unknown,
            ip6_connectivity: ConnectivityState::Unknown,
            interface_flags: DeviceInterfaceFlags::empty(),
            hw_address: String::new(),
        };
        assert_eq!(dev.display_interface(), "wlan0");
        dev.ip_interface = "wlan0-data".into();
        assert_eq!(dev.display_interface(), "wlan0-data");
    }
}
