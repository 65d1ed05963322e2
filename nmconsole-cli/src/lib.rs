use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use log::info;
use nmconsole::{ClientConfig, FormValues, NetworkManager, translate_form};
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(name = "nmconsole")]
#[command(version, about = "Inspect and edit NetworkManager connection profiles")]
struct Args {
    /// Wi-Fi interface used when a command doesn't name one.
    #[arg(long, global = true)]
    wifi_interface: Option<String>,

    /// Milliseconds between checks while waiting for a rescan.
    #[arg(long, global = true, value_parser = parse_millis)]
    poll_interval: Option<Duration>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List all connection profiles
    Profiles,
    /// Show one connection profile
    Profile { uuid: Uuid },
    /// Apply `section.key=value` fields to a profile
    Update {
        uuid: Uuid,
        /// "save and apply" or "save" writes to disk; "apply temporarily" or
        /// "apply" changes the profile in memory only.
        #[arg(long, default_value = "apply temporarily")]
        kind: String,
        #[arg(required = true, value_parser = parse_field)]
        fields: Vec<(String, String)>,
    },
    /// Activate a connection profile
    Activate { uuid: Uuid },
    /// Reload profiles from disk
    Reload,
    /// List devices
    Devices,
    /// Show one device
    Device { iface: String },
    /// List active connections
    Active,
    /// Show a Wi-Fi device
    Wifi { iface: Option<String> },
    /// List visible networks
    Scan {
        /// Request a fresh scan first; Ctrl-C cancels the wait.
        #[arg(long)]
        rescan: bool,
        iface: Option<String>,
    },
}

fn parse_millis(raw: &str) -> Result<Duration, String> {
    raw.parse::<u64>()
        .map(Duration::from_millis)
        .map_err(|e| format!("invalid interval {raw:?}: {e}"))
}

fn parse_field(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected section.key=value, got {raw:?}")),
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub async fn run() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut config = ClientConfig::default();
    if let Some(iface) = args.wifi_interface {
        config = config.with_wifi_interface(iface);
    }
    if let Some(interval) = args.poll_interval {
        config = config.with_scan_poll_interval(interval);
    }

    let nm = NetworkManager::with_config(config)
        .await
        .context("couldn't connect to the system bus")?;

    match args.command {
        Command::Profiles => print_json(&nm.list_conn_profiles().await?),
        Command::Profile { uuid } => print_json(&nm.get_conn_profile_by_uuid(&uuid).await?),
        Command::Update { uuid, kind, fields } => {
            let form: FormValues = fields.into_iter().collect();
            let update = translate_form(&kind, &form)?;
            nm.apply_profile_update(&uuid, &update).await?;
            println!("{} {uuid}", update.kind);
            Ok(())
        }
        Command::Activate { uuid } => {
            nm.activate_conn_profile(&uuid).await?;
            Ok(())
        }
        Command::Reload => {
            nm.reload_conn_profiles().await?;
            Ok(())
        }
        Command::Devices => print_json(&nm.list_devices().await?),
        Command::Device { iface } => print_json(&nm.get_device(&iface).await?),
        Command::Active => print_json(&nm.list_active_conns().await?),
        Command::Wifi { iface } => print_json(&nm.get_wifi_device(iface.as_deref()).await?),
        Command::Scan { rescan, iface } => {
            if rescan {
                let cancel = CancellationToken::new();
                let trigger = cancel.clone();
                tokio::spawn(async move {
                    if tokio::signal::ctrl_c().await.is_ok() {
                        trigger.cancel();
                    }
                });
                nm.rescan_networks(iface.as_deref(), &cancel).await?;
                info!("Rescan finished");
            }
            print_json(&nm.scan_networks(iface.as_deref()).await?)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_update_fields() {
        let args = Args::try_parse_from([
            "nmconsole",
            "update",
            "5b3c2bfa-7b2b-4a5e-9d35-0d2e1a9c4f10",
            "--kind",
            "save and apply",
            "802-11-wireless.band=a",
            "802-11-wireless-security.psk=",
        ])
        .unwrap();
        let Command::Update { kind, fields, .. } = args.command else {
            panic!("expected update command");
        };
        assert_eq!(kind, "save and apply");
        assert_eq!(
            fields,
            vec![
                ("802-11-wireless.band".to_string(), "a".to_string()),
                ("802-11-wireless-security.psk".to_string(), String::new()),
            ]
        );
    }

    #[test]
    fn rejects_field_without_value() {
        assert!(parse_field("connection.id").is_err());
        assert!(parse_field("=x").is_err());
        assert_eq!(
            parse_field("connection.id=a=b").unwrap(),
            ("connection.id".to_string(), "a=b".to_string())
        );
    }

    #[test]
    fn global_poll_interval() {
        let args =
            Args::try_parse_from(["nmconsole", "scan", "--rescan", "--poll-interval", "250"])
                .unwrap();
        assert_eq!(args.poll_interval, Some(Duration::from_millis(250)));
        assert!(matches!(args.command, Command::Scan { rescan: true, iface: None }));
    }

    #[test]
    fn rejects_bad_uuid() {
        assert!(Args::try_parse_from(["nmconsole", "profile", "not-a-uuid"]).is_err());
    }
}
