//! Active connection enumeration.

use log::debug;
use std::collections::BTreeMap;
use uuid::Uuid;
use zbus::Connection;
use zvariant::OwnedObjectPath;

use crate::Result;
use crate::api::models::{ActivationStateFlags, ActiveConn, ActiveConnState, NmError, ResultExt};
use crate::dbus::{NMActiveConnectionProxy, NMProxy};
use crate::util::utils::{dbus_op, device_proxy};

/// Lists active connections keyed by the UUID of their profile.
pub(crate) async fn list_active_conns(conn: &Connection) -> Result<BTreeMap<Uuid, ActiveConn>> {
    let nm = NMProxy::new(conn).await?;
    let paths = nm
        .active_connections()
        .await
        .map_err(dbus_op("couldn't query for active connections"))?;

    let mut conns = BTreeMap::new();
    for path in &paths {
        let active = read_active_conn(conn, path)
            .await
            .with_context(|| format!("couldn't dump active connection {}", path.as_str()))?;
        conns.insert(active.uuid, active);
    }
    Ok(conns)
}

async fn read_active_conn(conn: &Connection, path: &OwnedObjectPath) -> Result<ActiveConn> {
    let ac = NMActiveConnectionProxy::builder(conn)
        .path(path.clone())?
        .build()
        .await?;
    debug!("Reading active connection {}", path.as_str());

    let raw_uuid = ac
        .uuid()
        .await
        .map_err(dbus_op("couldn't query for connection UUID"))?;
    let uuid = Uuid::parse_str(&raw_uuid).map_err(|source| NmError::InvalidUuid {
        raw: raw_uuid.clone(),
        source,
    })?;

    let devices = ac
        .devices()
        .await
        .map_err(dbus_op("couldn't query for devices"))?;
    let device_interfaces = device_interfaces(conn, &devices)
        .await
        .context("couldn't query for interface names of devices")?;

    Ok(ActiveConn {
        id: ac
            .id()
            .await
            .map_err(dbus_op("couldn't query for connection ID"))?,
        uuid,
        conn_type: ac
            .connection_type()
            .await
            .map_err(dbus_op("couldn't query for connection type"))?,
        device_interfaces,
        state: ActiveConnState::from(
            ac.state()
                .await
                .map_err(dbus_op("couldn't query for connection state"))?,
        ),
        state_flags: ActivationStateFlags::from_bits_retain(
            ac.state_flags()
                .await
                .map_err(dbus_op("couldn't query for connection activation state flags"))?,
        ),
        is_ipv4_default: ac
            .default()
            .await
            .map_err(dbus_op("couldn't query for ownership of default IPv4 route"))?,
        is_ipv6_default: ac
            .default6()
            .await
            .map_err(dbus_op("couldn't query for ownership of default IPv6 route"))?,
        is_vpn: ac.vpn().await.map_err(dbus_op("couldn't query for VPN"))?,
    })
}

/// Sorted interface names, preferring the data interface.
async fn device_interfaces(conn: &Connection, paths: &[OwnedObjectPath]) -> Result<Vec<String>> {
    let mut interfaces = Vec::with_capacity(paths.len());
    for path in paths {
        let d = device_proxy(conn, path).await?;
        let ip_interface = d.ip_interface().await.map_err(dbus_op(format!(
            "couldn't query for data interface of {}",
            path.as_str()
        )))?;
        if !ip_interface.is_empty() {
            interfaces.push(ip_interface);
            continue;
        }
        interfaces.push(d.interface().await.map_err(dbus_op(format!(
            "couldn't query for control interface of {}",
            path.as_str()
        )))?);
    }
    interfaces.sort();
    Ok(interfaces)
}
