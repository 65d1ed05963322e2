//! Typed access to NetworkManager connection profiles over D-Bus.
//!
//! This crate reads connection profiles, devices and active connections
//! from NetworkManager, and turns operator form submissions into validated
//! profile updates:
//!
//! - Decoding `a{sa{sv}}` settings dictionaries into [`ConnProfileSettings`]
//! - Translating `section.key` form values into [`SettingsUpdates`]
//! - Merging updates onto a profile and submitting them with `Update2`
//! - Listing devices, active connections and visible access points
//! - Requesting Wi-Fi rescans with cancellation
//!
//! # Example
//!
//! ```no_run
//! use nmconsole::{FormValues, NetworkManager, translate_form};
//!
//! # async fn example() -> nmconsole::Result<()> {
//! let nm = NetworkManager::new().await?;
//!
//! for profile in nm.list_conn_profiles().await? {
//!     println!("{} {}", profile.settings.conn.uuid, profile.settings.conn.id);
//! }
//!
//! // A form submission; blank PSK means "keep the stored one".
//! let form: FormValues = [
//!     ("connection.autoconnect", "true"),
//!     ("802-11-wireless-security.key-mgmt", "wpa-psk"),
//!     ("802-11-wireless-security.psk", ""),
//! ]
//! .into_iter()
//! .collect();
//! let update = translate_form("apply temporarily", &form)?;
//! let uuid = "5b3c2bfa-7b2b-4a5e-9d35-0d2e1a9c4f10".parse().unwrap();
//! nm.apply_profile_update(&uuid, &update).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! All operations return `Result<T, NmError>`. [`NmError::kind`] classifies
//! an error as not-found, decode, validation, remote or cancellation,
//! regardless of how much context it was wrapped in. Form values are always
//! validated before any remote call, so a rejected form never partially
//! applies.
//!
//! # Testing
//!
//! Profile operations live on [`ProfileStore`], which is generic over a
//! [`SettingsBackend`]. Implement the trait over in-memory settings to
//! exercise the read and update paths without a bus.
//!
//! # Logging
//!
//! This crate uses the [`log`](https://docs.rs/log) facade for logging and
//! never installs a logger. Any `log`-compatible subscriber works, e.g.
//! `tracing-subscriber` with its `tracing-log` bridge:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
//!     .init();
//! ```

// Internal implementation modules
mod api;
mod core;
mod dbus;
mod types;
mod util;

// Re-exported public API
pub use api::config::ClientConfig;
pub use api::models;
pub use api::models::{
    AccessPoint, ActivationStateFlags, ActiveConn, ActiveConnState, ConnProfile,
    ConnProfileFlags, ConnProfileSettings, ConnSettings, ConnType, ConnUpdate, ConnectivityState,
    Device, DeviceCaps, DeviceInterfaceFlags, DeviceState, DeviceStateReason, DeviceType, Enum,
    EnumInfo, EnumSet, ErrorKind, FormValues, GroupCipher, IpAddress, IpPrefix, Ipv4Settings,
    Ipv6Settings, KeyMgmt, Level, NmError, PairwiseCipher, ProfileUpdate, PskFlags, ResultExt,
    RsnFlags, SettingsKey, SettingsUpdate, SettingsUpdates, StringEnum, UpdateFlags, UpdateKind,
    WifiBand, WifiCaps, WifiDevice, WifiDeviceMode, WifiMode, WifiSecSettings, WifiSecUpdate,
    WifiSettings, WifiUpdate, WpaProto,
};
pub use api::network_manager::NetworkManager;
pub use api::profile_store::{ProfileMeta, ProfileStore, SettingsBackend};
pub use crate::core::form::{translate_form, translate_settings};
pub use crate::core::settings::DbusSettings;
pub use util::variant::{RawSection, RawSettings, clone_settings};

/// A specialized `Result` type for NetworkManager operations.
pub type Result<T> = std::result::Result<T, NmError>;
