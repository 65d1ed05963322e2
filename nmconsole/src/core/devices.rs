//! Network device and access point enumeration.
//!
//! Reads generic device properties, the Wi-Fi specific ones of wireless
//! devices, and the access points they report.

use log::debug;
use zbus::Connection;
use zvariant::OwnedObjectPath;

use crate::Result;
use crate::api::models::{
    AccessPoint, Device, DeviceCaps, DeviceInterfaceFlags, DeviceState, ResultExt, RsnFlags,
    WifiCaps, WifiDevice, WifiDeviceMode,
};
use crate::dbus::{NMAccessPointProxy, NMProxy};
use crate::util::utils::{
    boottime_millis, boottime_secs, dbus_op, decode_ssid, device_proxy, find_device, is_no_object,
    wireless_proxy,
};

/// Lists all devices, sorted by their data interface (or control interface).
pub(crate) async fn list_devices(conn: &Connection) -> Result<Vec<Device>> {
    let nm = NMProxy::new(conn).await?;
    let paths = nm
        .get_devices()
        .await
        .map_err(dbus_op("failed to get device paths from NetworkManager"))?;

    let mut devices = Vec::with_capacity(paths.len());
    for path in &paths {
        let device = read_device(conn, path)
            .await
            .with_context(|| format!("couldn't inspect device {}", path.as_str()))?;
        devices.push(device);
    }
    devices.sort_by(|a, b| a.display_interface().cmp(b.display_interface()));
    Ok(devices)
}

/// Reads the device whose IP interface is `iface`.
pub(crate) async fn get_device(conn: &Connection, iface: &str) -> Result<Device> {
    let path = find_device(conn, iface).await?;
    read_device(conn, &path)
        .await
        .with_context(|| format!("couldn't inspect device {iface}"))
}

/// Reads the Wi-Fi device whose IP interface is `iface`.
pub(crate) async fn get_wifi_device(conn: &Connection, iface: &str) -> Result<WifiDevice> {
    let path = find_device(conn, iface).await?;
    read_wifi_device(conn, &path)
        .await
        .with_context(|| format!("couldn't inspect device {iface}"))
}

pub(crate) async fn read_device(conn: &Connection, path: &OwnedObjectPath) -> Result<Device> {
    let d = device_proxy(conn, path).await?;
    debug!("Reading device {}", path.as_str());

    let (state, reason) = d
        .state_reason()
        .await
        .map_err(dbus_op("couldn't query for device state"))?;

    Ok(Device {
        interface: d
            .interface()
            .await
            .map_err(dbus_op("couldn't query for control interface"))?,
        ip_interface: d
            .ip_interface()
            .await
            .map_err(dbus_op("couldn't query for data interface"))?,
        driver: d.driver().await.map_err(dbus_op("couldn't query for driver"))?,
        driver_version: d
            .driver_version()
            .await
            .map_err(dbus_op("couldn't query for driver version"))?,
        firmware_version: d
            .firmware_version()
            .await
            .map_err(dbus_op("couldn't query for firmware version"))?,
        capabilities: DeviceCaps::from_bits_retain(
            d.capabilities()
                .await
                .map_err(dbus_op("couldn't query for capabilities"))?,
        ),
        state: DeviceState::from(state),
        state_reason: reason.into(),
        managed: d.managed().await.map_err(dbus_op("couldn't query for managed"))?,
        autoconnect: d
            .autoconnect()
            .await
            .map_err(dbus_op("couldn't query for autoconnect"))?,
        firmware_missing: d
            .firmware_missing()
            .await
            .map_err(dbus_op("couldn't query for missing firmware"))?,
        nm_plugin_missing: d
            .nm_plugin_missing()
            .await
            .map_err(dbus_op("couldn't query for missing plugin"))?,
        device_type: d
            .device_type()
            .await
            .map_err(dbus_op("couldn't query for device type"))?
            .into(),
        ip4_connectivity: d
            .ip4_connectivity()
            .await
            .map_err(dbus_op("couldn't query for IPv4 connectivity"))?
            .into(),
        ip6_connectivity: d
            .ip6_connectivity()
            .await
            .map_err(dbus_op("couldn't query for IPv6 connectivity"))?
            .into(),
        interface_flags: DeviceInterfaceFlags::from_bits_retain(
            d.interface_flags()
                .await
                .map_err(dbus_op("couldn't query for interface flags"))?,
        ),
        hw_address: d
            .hw_address()
            .await
            .map_err(dbus_op("couldn't query for hardware address"))?,
    })
}

pub(crate) async fn read_wifi_device(
    conn: &Connection,
    path: &OwnedObjectPath,
) -> Result<WifiDevice> {
    let device = read_device(conn, path)
        .await
        .context("couldn't query for generic device properties")?;
    let w = wireless_proxy(conn, path).await?;

    let ap_path = w
        .active_access_point()
        .await
        .map_err(dbus_op("couldn't query for active AP"))?;
    let active_access_point = if is_no_object(&ap_path) {
        None
    } else {
        Some(
            read_access_point(conn, &ap_path)
                .await
                .with_context(|| format!("couldn't query for access point {}", ap_path.as_str()))?,
        )
    };

    Ok(WifiDevice {
        device,
        mode: WifiDeviceMode::from(w.mode().await.map_err(dbus_op("couldn't query for Wi-Fi mode"))?),
        capabilities: WifiCaps::from_bits_retain(
            w.wireless_capabilities()
                .await
                .map_err(dbus_op("couldn't query for capabilities"))?,
        ),
        active_access_point,
        last_scan: boottime_millis(
            w.last_scan()
                .await
                .map_err(dbus_op("couldn't query for last scan"))?,
        ),
    })
}

pub(crate) async fn read_access_point(
    conn: &Connection,
    path: &OwnedObjectPath,
) -> Result<AccessPoint> {
    let ap = NMAccessPointProxy::builder(conn)
        .path(path.clone())?
        .build()
        .await?;

    Ok(AccessPoint {
        ssid: decode_ssid(&ap.ssid().await.map_err(dbus_op("couldn't query for SSID"))?),
        frequency: ap
            .frequency()
            .await
            .map_err(dbus_op("couldn't query for frequency"))?,
        strength: ap
            .strength()
            .await
            .map_err(dbus_op("couldn't query for signal strength"))?,
        last_seen: boottime_secs(
            ap.last_seen()
                .await
                .map_err(dbus_op("couldn't query for last seen time"))?,
        ),
        mode: WifiDeviceMode::from(ap.mode().await.map_err(dbus_op("couldn't query for Wi-Fi mode"))?),
        rsn_flags: RsnFlags::from_bits_retain(
            ap.rsn_flags()
                .await
                .map_err(dbus_op("couldn't query for RSN flags"))?,
        ),
    })
}
