//! Wi-Fi access point listing and rescans.
//!
//! A rescan is requested over D-Bus and then awaited by polling the
//! device's `LastScan` timestamp until it changes. Polling keeps this
//! independent of signal subscriptions; it assumes a scan never takes long
//! enough for the timestamp to come back around to the same value.

use futures::{FutureExt, select};
use futures_timer::Delay;
use log::debug;
use std::collections::{BTreeMap, HashMap};
use std::future::Future;
use std::pin::pin;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use zbus::Connection;

use crate::Result;
use crate::api::models::{AccessPoint, NmError, ResultExt};
use crate::core::devices::read_access_point;
use crate::util::utils::{dbus_op, find_device, wireless_proxy};

/// Lists the access points visible to `iface`, grouped by SSID.
///
/// Within each group the strongest access point comes first.
pub(crate) async fn scan_networks(
    conn: &Connection,
    iface: &str,
) -> Result<BTreeMap<String, Vec<AccessPoint>>> {
    let path = find_device(conn, iface).await?;
    let w = wireless_proxy(conn, &path).await?;
    let ap_paths = w.access_points().await.map_err(dbus_op(format!(
        "couldn't query for access points found by {iface}"
    )))?;

    let mut networks: BTreeMap<String, Vec<AccessPoint>> = BTreeMap::new();
    for ap_path in &ap_paths {
        let ap = read_access_point(conn, ap_path)
            .await
            .with_context(|| format!("couldn't query for access point {}", ap_path.as_str()))?;
        networks.entry(ap.ssid.clone()).or_default().push(ap);
    }
    sort_by_strength(&mut networks);
    Ok(networks)
}

fn sort_by_strength(networks: &mut BTreeMap<String, Vec<AccessPoint>>) {
    for aps in networks.values_mut() {
        aps.sort_by(|a, b| b.strength.cmp(&a.strength));
    }
}

/// Requests a rescan on `iface` and waits until it completes.
pub(crate) async fn rescan_networks(
    conn: &Connection,
    iface: &str,
    poll_interval: Duration,
    cancel: &CancellationToken,
) -> Result<()> {
    if cancel.is_cancelled() {
        return Err(NmError::Cancelled);
    }
    let path = find_device(conn, iface).await?;
    let w = wireless_proxy(conn, &path).await?;

    let previous = w
        .last_scan()
        .await
        .map_err(dbus_op("couldn't query for time of last scan of access points"))?;
    w.request_scan(HashMap::new()).await.map_err(dbus_op(format!(
        "couldn't request a re-scan of access points with {iface}"
    )))?;
    debug!("Requested rescan on {iface}, last scan was at {previous}");

    let w = &w;
    wait_for_scan_change(previous, poll_interval, cancel, move || async move {
        w.last_scan().await.map_err(dbus_op(format!(
            "couldn't check status of access point re-scan with {iface}"
        )))
    })
    .await
}

/// Polls `read_last_scan` every `interval` until it differs from `previous`.
///
/// Cancellation is checked before and after every wait, and takes priority
/// over a wait that finished at the same time.
pub(crate) async fn wait_for_scan_change<F, Fut>(
    previous: i64,
    interval: Duration,
    cancel: &CancellationToken,
    mut read_last_scan: F,
) -> Result<()>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<i64>>,
{
    loop {
        if cancel.is_cancelled() {
            return Err(NmError::Cancelled);
        }
        {
            let mut delay = pin!(Delay::new(interval).fuse());
            let mut cancelled = pin!(cancel.cancelled().fuse());
            select! {
                _ = cancelled => return Err(NmError::Cancelled),
                _ = delay => {}
            }
        }
        if cancel.is_cancelled() {
            return Err(NmError::Cancelled);
        }

        let current = read_last_scan().await?;
        if current != previous {
            debug!("Scan finished at {current}");
            return Ok(());
        }
    }
}
