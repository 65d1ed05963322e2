//! Constants for NetworkManager D-Bus names and connection settings.
//!
//! Section and key names match the ones NetworkManager uses in the
//! `a{sa{sv}}` settings dictionaries of `Settings.Connection`.

/// Well-known bus names and object paths.
pub mod bus {
    /// Placeholder path NetworkManager accepts for "no object".
    pub const NO_OBJECT: &str = "/";
    /// Error returned by `GetConnectionByUuid` for an unknown UUID.
    pub const INVALID_CONNECTION_ERROR: &str =
        "org.freedesktop.NetworkManager.Settings.InvalidConnection";
    /// Error returned by `GetDeviceByIpIface` for an unknown interface.
    pub const UNKNOWN_DEVICE_ERROR: &str = "org.freedesktop.NetworkManager.UnknownDevice";
}

/// Settings section names.
pub mod section {
    pub const CONNECTION: &str = "connection";
    pub const WIFI: &str = "802-11-wireless";
    pub const WIFI_SECURITY: &str = "802-11-wireless-security";
    pub const IPV4: &str = "ipv4";
    pub const IPV6: &str = "ipv6";
}

/// Keys of the `connection` section.
pub mod conn_key {
    pub const AUTH_RETRIES: &str = "auth-retries";
    pub const AUTOCONNECT: &str = "autoconnect";
    pub const AUTOCONNECT_PRIORITY: &str = "autoconnect-priority";
    pub const AUTOCONNECT_RETRIES: &str = "autoconnect-retries";
    pub const ID: &str = "id";
    pub const INTERFACE_NAME: &str = "interface-name";
    pub const STABLE_ID: &str = "stable-id";
    pub const TIMESTAMP: &str = "timestamp";
    pub const TYPE: &str = "type";
    pub const UUID: &str = "uuid";
    pub const ZONE: &str = "zone";
}

/// Keys of the `802-11-wireless` section.
pub mod wifi_key {
    pub const BAND: &str = "band";
    pub const CHANNEL: &str = "channel";
    pub const HIDDEN: &str = "hidden";
    pub const MODE: &str = "mode";
    pub const SSID: &str = "ssid";
}

/// Keys of the `802-11-wireless-security` section.
pub mod wifi_sec_key {
    pub const GROUP: &str = "group";
    pub const KEY_MGMT: &str = "key-mgmt";
    pub const PAIRWISE: &str = "pairwise";
    pub const PROTO: &str = "proto";
    pub const PSK: &str = "psk";
    pub const PSK_FLAGS: &str = "psk-flags";
}

/// Keys shared by the `ipv4` and `ipv6` sections.
pub mod ip_key {
    pub const ADDRESS_DATA: &str = "address-data";
    pub const METHOD: &str = "method";
    pub const NEVER_DEFAULT: &str = "never-default";
    pub const ADDR_GEN_MODE: &str = "addr-gen-mode";
    /// Deprecated fields which override `address-data`/`route-data` when present.
    pub const LEGACY: [&str; 2] = ["addresses", "routes"];
    pub const ADDRESS: &str = "address";
    pub const PREFIX: &str = "prefix";
}

/// Bounds applied to operator-submitted values.
pub mod limits {
    pub const AUTOCONNECT_PRIORITY_MIN: i32 = -999;
    pub const AUTOCONNECT_PRIORITY_MAX: i32 = 999;
    pub const SSID_MAX_BYTES: usize = 32;
}

/// Polling defaults.
pub mod timeouts {
    use std::time::Duration;

    const SCAN_POLL_INTERVAL_SECS: u64 = 1;

    /// Interval between `LastScan` checks while waiting for a rescan.
    pub fn scan_poll_interval() -> Duration {
        Duration::from_secs(SCAN_POLL_INTERVAL_SECS)
    }
}

/// Default Wi-Fi interface of the appliance.
pub const DEFAULT_WIFI_INTERFACE: &str = "wlan0";
