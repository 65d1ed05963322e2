//! Tests for reading and updating connection profiles through `ProfileStore`.

mod common;

use common::{MockBackend, ethernet_profile, psk_secrets, section, string_of, wifi_profile};
use nmconsole::{
    ConnType, ErrorKind, FormValues, KeyMgmt, NmError, ProfileStore, RawSettings, StringEnum,
    UpdateFlags, UpdateKind, WifiBand, translate_form, translate_settings,
};
use uuid::Uuid;
use zvariant::OwnedValue;

const WLAN_UUID: &str = "5b3c2bfa-7b2b-4a5e-9d35-0d2e1a9c4f10";
const ETH_UUID: &str = "0f6d1c9e-3a4b-4c2d-8e7f-112233445566";

fn uuid(raw: &str) -> Uuid {
    Uuid::parse_str(raw).unwrap()
}

fn wlan_store() -> ProfileStore<MockBackend> {
    ProfileStore::new(MockBackend::new().with_profile(
        wifi_profile(WLAN_UUID, "wlan0-internet"),
        Some(psk_secrets("correct horse")),
    ))
}

#[tokio::test]
async fn test_decode_wifi_profile() {
    let store = wlan_store();
    let profile = store
        .get_conn_profile_by_uuid(&uuid(WLAN_UUID))
        .await
        .unwrap();

    let settings = &profile.settings;
    assert_eq!(settings.conn.id, "wlan0-internet");
    assert_eq!(settings.conn.uuid, uuid(WLAN_UUID));
    assert_eq!(settings.conn.conn_type, ConnType::Wifi);
    assert!(settings.conn.autoconnect);
    assert_eq!(settings.wifi.band, WifiBand::Any);
    assert_eq!(settings.wifi.band.as_str(), "");
    assert_eq!(settings.wifi.ssid, b"lab".to_vec());
    assert_eq!(settings.wifi_sec.key_mgmt, KeyMgmt::WpaPsk);
    assert_eq!(settings.wifi_sec.key_mgmt.as_str(), "wpa-psk");
    assert_eq!(settings.wifi_sec.psk, "correct horse");
    assert_eq!(settings.ipv4.method, "auto");
    assert!(!profile.unsaved);
    assert!(profile.filename.ends_with(".nmconnection"));
}

#[tokio::test]
async fn test_unreadable_secrets_give_empty_psk() {
    let store = ProfileStore::new(
        MockBackend::new().with_profile(wifi_profile(WLAN_UUID, "wlan0-internet"), None),
    );
    let profile = store
        .get_conn_profile_by_uuid(&uuid(WLAN_UUID))
        .await
        .unwrap();
    assert_eq!(profile.settings.wifi_sec.psk, "");
    assert_eq!(profile.settings.wifi_sec.key_mgmt, KeyMgmt::WpaPsk);
    assert_eq!(store.backend().secret_reads(), 1);
}

#[tokio::test]
async fn test_mistyped_psk_secret_gives_empty_psk() {
    let mut secrets = RawSettings::new();
    secrets.insert(
        "802-11-wireless-security".into(),
        section(&[("psk", OwnedValue::from(7u32))]),
    );
    let store = ProfileStore::new(
        MockBackend::new()
            .with_profile(wifi_profile(WLAN_UUID, "wlan0-internet"), Some(secrets))
            .with_profile(ethernet_profile(ETH_UUID, "wired"), None),
    );

    let profile = store
        .get_conn_profile_by_uuid(&uuid(WLAN_UUID))
        .await
        .unwrap();
    assert_eq!(profile.settings.wifi_sec.psk, "");
    assert_eq!(profile.settings.wifi_sec.key_mgmt, KeyMgmt::WpaPsk);

    let profiles = store.list_conn_profiles().await.unwrap();
    assert_eq!(profiles.len(), 2);
}

#[tokio::test]
async fn test_ethernet_profile_skips_secrets() {
    let store = ProfileStore::new(
        MockBackend::new().with_profile(ethernet_profile(ETH_UUID, "wired"), None),
    );
    let profile = store
        .get_conn_profile_by_uuid(&uuid(ETH_UUID))
        .await
        .unwrap();
    assert_eq!(profile.settings.conn.conn_type, ConnType::Ethernet);
    assert_eq!(store.backend().secret_reads(), 0);
}

#[tokio::test]
async fn test_unknown_uuid_is_not_found() {
    let store = wlan_store();
    let missing = uuid("00000000-0000-4000-8000-000000000000");

    let err = store.get_conn_profile_by_uuid(&missing).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    let updates = translate_settings(&FormValues::new()).unwrap();
    let err = store
        .update_conn_profile_by_uuid(&missing, UpdateKind::Save, &updates)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert!(err.to_string().contains(&missing.to_string()));
    assert!(store.backend().updates().is_empty());
}

#[tokio::test]
async fn test_list_sorted_by_id() {
    let store = ProfileStore::new(
        MockBackend::new()
            .with_profile(wifi_profile(WLAN_UUID, "zeta"), Some(psk_secrets("x")))
            .with_profile(ethernet_profile(ETH_UUID, "alpha"), None),
    );
    let ids: Vec<String> = store
        .list_conn_profiles()
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.settings.conn.id)
        .collect();
    assert_eq!(ids, vec!["alpha", "zeta"]);
}

#[tokio::test]
async fn test_list_fails_on_broken_profile() {
    let mut broken = ethernet_profile(ETH_UUID, "wired");
    broken.get_mut("connection").unwrap().remove("id");
    let store = ProfileStore::new(
        MockBackend::new()
            .with_profile(wifi_profile(WLAN_UUID, "wlan0-internet"), None)
            .with_profile(broken, None),
    );
    let err = store.list_conn_profiles().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Decode);
    let message = err.to_string();
    assert!(message.contains("couldn't dump connection profile"));
    assert!(message.ends_with("no ID"));
}

#[tokio::test]
async fn test_apply_update_merges_and_flags() {
    let store = wlan_store();
    let form: FormValues = [
        ("connection.autoconnect", "off"),
        ("802-11-wireless.band", ""),
        ("802-11-wireless.channel", "0"),
        ("802-11-wireless-security.key-mgmt", "wpa-psk"),
        ("802-11-wireless-security.psk", ""),
    ]
    .into_iter()
    .collect();
    let update = translate_form("apply temporarily", &form).unwrap();
    store
        .apply_profile_update(&uuid(WLAN_UUID), &update)
        .await
        .unwrap();

    let updates = store.backend().updates();
    assert_eq!(updates.len(), 1);
    let recorded = &updates[0];
    assert_eq!(recorded.flags, UpdateFlags::IN_MEMORY);

    let wifi = &recorded.settings["802-11-wireless"];
    assert!(!wifi.contains_key("band"));
    assert_eq!(
        string_of(&recorded.settings, "802-11-wireless", "mode").as_deref(),
        Some("infrastructure")
    );
    let autoconnect = recorded.settings["connection"]["autoconnect"]
        .try_clone()
        .unwrap();
    assert!(!bool::try_from(autoconnect).unwrap());
    assert_eq!(
        string_of(&recorded.settings, "connection", "zone").as_deref(),
        Some("trusted")
    );

    // Blank PSK keeps the stored secret: no psk key is submitted.
    assert!(!recorded.settings["802-11-wireless-security"].contains_key("psk"));
    assert!(!recorded.settings["ipv4"].contains_key("addresses"));
    assert!(!recorded.settings["ipv4"].contains_key("routes"));
}

#[tokio::test]
async fn test_save_uses_to_disk() {
    let store = wlan_store();
    let form: FormValues = [("802-11-wireless.ssid", "guest")].into_iter().collect();
    let update = translate_form("Save and Apply", &form).unwrap();
    assert_eq!(update.kind, UpdateKind::Save);
    store
        .apply_profile_update(&uuid(WLAN_UUID), &update)
        .await
        .unwrap();

    let updates = store.backend().updates();
    assert_eq!(updates[0].flags, UpdateFlags::TO_DISK);
    assert_eq!(updates[0].flags.bits(), 0x1);
}

#[tokio::test]
async fn test_open_network_drops_security_section() {
    let store = wlan_store();
    let form: FormValues = [
        ("802-11-wireless-security.key-mgmt", ""),
        ("802-11-wireless-security.psk", ""),
    ]
    .into_iter()
    .collect();
    let updates = translate_settings(&form).unwrap();
    store
        .update_conn_profile_by_uuid(&uuid(WLAN_UUID), UpdateKind::Apply, &updates)
        .await
        .unwrap();

    let updates = store.backend().updates();
    assert!(!updates[0].settings.contains_key("802-11-wireless-security"));
    assert!(updates[0].settings.contains_key("802-11-wireless"));
}

#[tokio::test]
async fn test_invalid_form_never_reaches_backend() {
    let form: FormValues = [
        ("802-11-wireless.channel", "6"),
        ("802-11-wireless.band", ""),
        ("connection.autoconnect", "on"),
    ]
    .into_iter()
    .collect();
    let err = translate_form("save", &form).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(err.to_string().contains("channel 6"));

    let store = wlan_store();
    assert!(store.backend().updates().is_empty());
}

#[tokio::test]
async fn test_activate_and_reload() {
    let store = wlan_store();
    store
        .activate_conn_profile(&uuid(WLAN_UUID))
        .await
        .unwrap();
    assert_eq!(
        store.backend().activated(),
        vec!["/org/freedesktop/NetworkManager/Settings/1".to_string()]
    );
    store.reload_conn_profiles().await.unwrap();

    let failing = ProfileStore::new(MockBackend::new().failing_reload());
    let err = failing.reload_conn_profiles().await.unwrap_err();
    assert!(matches!(err, NmError::ReloadFailed));
    assert_eq!(err.kind(), ErrorKind::Remote);
}

#[tokio::test]
async fn test_update_is_visible_on_next_read() {
    let store = wlan_store();
    let form: FormValues = [
        ("802-11-wireless.band", "a"),
        ("802-11-wireless.channel", "36"),
        ("connection.autoconnect-priority", "-5"),
    ]
    .into_iter()
    .collect();
    let updates = translate_settings(&form).unwrap();
    store
        .update_conn_profile_by_uuid(&uuid(WLAN_UUID), UpdateKind::Save, &updates)
        .await
        .unwrap();

    let profile = store
        .get_conn_profile_by_uuid(&uuid(WLAN_UUID))
        .await
        .unwrap();
    assert_eq!(profile.settings.wifi.band, WifiBand::A);
    assert_eq!(profile.settings.wifi.channel, 36);
    assert_eq!(profile.settings.conn.autoconnect_priority, -5);
}
