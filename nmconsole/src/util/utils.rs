//! Helpers for proxy construction and D-Bus data conversion.

use log::warn;
use std::str;
use std::time::Duration;
use zbus::Connection;
use zvariant::OwnedObjectPath;

use crate::Result;
use crate::api::models::NmError;
use crate::dbus::{NMDeviceProxy, NMProxy, NMSettingsConnectionProxy, NMWirelessProxy};
use crate::types::constants::bus;

/// The `/` path NetworkManager uses for "no object".
pub(crate) fn no_object() -> Result<OwnedObjectPath> {
    Ok(OwnedObjectPath::try_from(bus::NO_OBJECT)?)
}

pub(crate) fn is_no_object(path: &OwnedObjectPath) -> bool {
    path.as_str() == bus::NO_OBJECT
}

/// Whether `err` is a D-Bus method error with the given error name.
pub(crate) fn is_method_error(err: &zbus::Error, name: &str) -> bool {
    matches!(err, zbus::Error::MethodError(err_name, _, _) if err_name.as_str() == name)
}

/// Maps a failed D-Bus call to [`NmError::DbusOperation`] naming the operation.
pub(crate) fn dbus_op(context: impl Into<String>) -> impl FnOnce(zbus::Error) -> NmError {
    move |source| NmError::DbusOperation {
        context: context.into(),
        source,
    }
}

/// Decode SSID bytes, replacing invalid UTF-8.
pub(crate) fn decode_ssid(bytes: &[u8]) -> String {
    match str::from_utf8(bytes) {
        Ok(s) => s.to_owned(),
        Err(e) => {
            warn!("Invalid UTF-8 in SSID: {e}");
            String::from_utf8_lossy(bytes).into_owned()
        }
    }
}

/// Converts a CLOCK_BOOTTIME millisecond stamp; negative means never.
pub(crate) fn boottime_millis(ms: i64) -> Option<Duration> {
    u64::try_from(ms).ok().map(Duration::from_millis)
}

/// Converts a CLOCK_BOOTTIME second stamp; negative means never.
pub(crate) fn boottime_secs(secs: i32) -> Option<Duration> {
    u64::try_from(secs).ok().map(Duration::from_secs)
}

pub(crate) async fn settings_connection_proxy<'a>(
    conn: &'a Connection,
    path: &OwnedObjectPath,
) -> Result<NMSettingsConnectionProxy<'a>> {
    Ok(NMSettingsConnectionProxy::builder(conn)
        .path(path.clone())?
        .build()
        .await?)
}

pub(crate) async fn device_proxy<'a>(
    conn: &'a Connection,
    path: &OwnedObjectPath,
) -> Result<NMDeviceProxy<'a>> {
    Ok(NMDeviceProxy::builder(conn).path(path.clone())?.build().await?)
}

pub(crate) async fn wireless_proxy<'a>(
    conn: &'a Connection,
    path: &OwnedObjectPath,
) -> Result<NMWirelessProxy<'a>> {
    Ok(NMWirelessProxy::builder(conn)
        .path(path.clone())?
        .build()
        .await?)
}

/// Finds a device by its IP interface name.
///
/// Returns [`NmError::DeviceNotFound`] if NetworkManager doesn't know the interface.
pub(crate) async fn find_device(conn: &Connection, iface: &str) -> Result<OwnedObjectPath> {
    let nm = NMProxy::new(conn).await?;
    match nm.get_device_by_ip_iface(iface).await {
        Ok(path) => Ok(path),
        Err(e) if is_method_error(&e, bus::UNKNOWN_DEVICE_ERROR) => {
            Err(NmError::DeviceNotFound(iface.to_string()))
        }
        Err(e) => Err(dbus_op(format!("couldn't find device {iface}"))(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_ssid() {
        assert_eq!(decode_ssid(b"wlan0-internet"), "wlan0-internet");
        assert_eq!(decode_ssid(b""), "");
        assert_eq!(decode_ssid(&[b'a', 0xff, b'b']), "a\u{fffd}b");
    }

    #[test]
    fn test_boottime() {
        assert_eq!(boottime_millis(-1), None);
        assert_eq!(boottime_millis(1500), Some(Duration::from_millis(1500)));
        assert_eq!(boottime_secs(-1), None);
        assert_eq!(boottime_secs(0), Some(Duration::ZERO));
        assert_eq!(boottime_secs(42), Some(Duration::from_secs(42)));
    }

    #[test]
    fn test_no_object() {
        let root = no_object().unwrap();
        assert!(is_no_object(&root));
        let other = OwnedObjectPath::try_from("/org/freedesktop/NetworkManager/Devices/3").unwrap();
        assert!(!is_no_object(&other));
    }
}
