//! Network identity types produced by the probe layer.

use serde::{Deserialize, Serialize};

/// One network profile known to the OS network manager, active or saved.
///
/// `name` and `uuid` are stable identifiers and are never empty on a
/// record that survived parsing; `state` is free-form status text
/// ("activated", "activating", or empty) kept exactly as the CLI printed
/// it -- compare case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionRecord {
    pub name: String,
    pub uuid: String,
    #[serde(rename = "type")]
    pub connection_type: String,
    pub device: String,
    #[serde(default)]
    pub state: String,
}

impl ConnectionRecord {
    /// Whether the profile is currently activated.
    pub fn is_activated(&self) -> bool {
        self.state.eq_ignore_ascii_case("activated")
    }
}

/// The presently active connection, when the machine is online.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentConnection {
    pub name: String,
    pub connection_type: String,
    pub device: String,
}

impl From<ConnectionRecord> for CurrentConnection {
    fn from(record: ConnectionRecord) -> Self {
        Self {
            name: record.name,
            connection_type: record.connection_type,
            device: record.device,
        }
    }
}

/// One row of a Wi-Fi scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WifiNetwork {
    pub in_use: bool,
    pub bssid: String,
    pub ssid: String,
    pub signal: Option<String>,
}

/// The persisted "home network" preference.
///
/// Written only by the explicit set-home action; read on every endpoint
/// resolution; never auto-deleted, so stale values survive until the
/// user overwrites them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HomeNetwork {
    /// Connection-profile name of the home Wi-Fi network.
    #[serde(default)]
    pub network_name: String,
    /// Base URL that reaches Home Assistant from inside that network.
    #[serde(default)]
    pub internal_ip: String,
}

impl HomeNetwork {
    /// Both halves of the preference are present.
    pub fn is_configured(&self) -> bool {
        !self.network_name.is_empty() && !self.internal_ip.is_empty()
    }
}
