//! Network command handlers.
//!
//! These only talk to the probe backend and the config file, never to
//! the Home Assistant server, so they work with no token configured.

use tabled::Tabled;

use hassfly_core::{ConnectionRecord, WifiNetwork, backend_for};

use crate::cli::{GlobalOpts, NetworksArgs, NetworksCommand, SetHomeArgs};
use crate::config::resolve_network_tool;
use crate::error::CliError;
use crate::output;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct NetworkRow {
    #[tabled(rename = "Home")]
    home: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    connection_type: String,
    #[tabled(rename = "Device")]
    device: String,
    #[tabled(rename = "State")]
    state: String,
}

impl NetworkRow {
    fn from_record(record: &ConnectionRecord, home_name: &str) -> Self {
        Self {
            home: if record.name == home_name { "*" } else { "" }.into(),
            name: record.name.clone(),
            connection_type: record.connection_type.clone(),
            device: record.device.clone(),
            state: record.state.clone(),
        }
    }
}

#[derive(Tabled)]
struct WifiRow {
    #[tabled(rename = "In use")]
    in_use: String,
    #[tabled(rename = "SSID")]
    ssid: String,
    #[tabled(rename = "BSSID")]
    bssid: String,
    #[tabled(rename = "Signal")]
    signal: String,
}

impl From<&WifiNetwork> for WifiRow {
    fn from(network: &WifiNetwork) -> Self {
        Self {
            in_use: if network.in_use { "*" } else { "" }.into(),
            ssid: network.ssid.clone(),
            bssid: network.bssid.clone(),
            signal: network.signal.clone().unwrap_or_default(),
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(args: NetworksArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let backend = backend_for(resolve_network_tool(global)?);

    match args.command {
        NetworksCommand::List => {
            let mut networks = backend.saved_connections().await?;
            let home_name = hassfly_config::load_config_or_default().home.network_name;

            // Saved home network first, the rest by name.
            networks.sort_by(|a, b| {
                (b.name == home_name)
                    .cmp(&(a.name == home_name))
                    .then_with(|| a.name.cmp(&b.name))
            });

            let out = output::render_list(
                &global.output,
                &networks,
                |n| NetworkRow::from_record(n, &home_name),
                |n| n.name.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        NetworksCommand::Scan => {
            let networks: Vec<WifiNetwork> = backend
                .scan_wifi()
                .await?
                .into_iter()
                .filter(|n| !n.ssid.is_empty() && n.ssid != "--")
                .collect();

            let out =
                output::render_list(
                    &global.output,
                    &networks,
                    |n: &WifiNetwork| WifiRow::from(n),
                    |n: &WifiNetwork| n.ssid.clone(),
                );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        NetworksCommand::SetHome(set) => set_home(&set, backend.as_ref(), global).await,
    }
}

async fn set_home(
    set: &SetHomeArgs,
    backend: &dyn hassfly_core::NetworkBackend,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    // The name must match a saved profile; a typo would never equal the
    // active connection's name and the shortcut would silently never fire.
    let saved = backend.saved_connections().await?;
    if !saved.iter().any(|n| n.name == set.network_name) {
        return Err(CliError::Validation {
            field: "network_name".into(),
            reason: format!(
                "no saved connection named '{}' (see `hassfly networks list`)",
                set.network_name
            ),
        });
    }

    let _: url::Url = set.internal_ip.parse().map_err(|_| CliError::Validation {
        field: "internal_ip".into(),
        reason: format!(
            "invalid URL: {} (expected e.g. http://192.168.1.10:8123)",
            set.internal_ip
        ),
    })?;

    let mut cfg = hassfly_config::load_config_or_default();
    hassfly_config::set_home_network(&mut cfg, &set.network_name, &set.internal_ip)?;
    hassfly_config::save_config(&cfg)?;

    output::print_output(
        &format!(
            "Home network set to '{}' ({})",
            set.network_name, set.internal_ip
        ),
        global.quiet,
    );
    Ok(())
}
