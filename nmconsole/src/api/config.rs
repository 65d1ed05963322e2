//! Client configuration.

use std::time::Duration;

use crate::types::constants::{DEFAULT_WIFI_INTERFACE, timeouts};

/// Settings for a [`NetworkManager`](crate::NetworkManager) session.
///
/// # Examples
///
/// ```rust
/// use std::time::Duration;
/// use nmconsole::ClientConfig;
///
/// let config = ClientConfig::default()
///     .with_wifi_interface("wlp2s0")
///     .with_scan_poll_interval(Duration::from_millis(250));
/// assert_eq!(config.wifi_interface, "wlp2s0");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Interface used when an operation doesn't name one.
    pub wifi_interface: String,
    /// How often `LastScan` is checked while waiting for a rescan.
    pub scan_poll_interval: Duration,
}

impl Default for ClientConfig {
    /// Defaults:
    /// - `wifi_interface`: `"wlan0"`
    /// - `scan_poll_interval`: 1 second
    fn default() -> Self {
        Self {
            wifi_interface: DEFAULT_WIFI_INTERFACE.to_string(),
            scan_poll_interval: timeouts::scan_poll_interval(),
        }
    }
}

impl ClientConfig {
    pub fn with_wifi_interface(mut self, iface: impl Into<String>) -> Self {
        self.wifi_interface = iface.into();
        self
    }

    pub fn with_scan_poll_interval(mut self, interval: Duration) -> Self {
        self.scan_poll_interval = interval;
        self
    }
}
