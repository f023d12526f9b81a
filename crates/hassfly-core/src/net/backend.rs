//! Network-manager backend selection.
//!
//! The probe is a capability, not a UI branch: the `network_tool`
//! preference picks an implementation once at startup and everything
//! downstream talks to the trait.

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::model::{ConnectionRecord, CurrentConnection, WifiNetwork};
use crate::net::nmcli::NmcliBackend;

/// Probe capability implemented once per network-manager integration.
#[async_trait]
pub trait NetworkBackend: Send + Sync {
    /// The presently active connection, or `None` when offline/unknown.
    async fn current_connection(&self) -> Result<Option<CurrentConnection>, CoreError>;

    /// All connection profiles the OS has saved.
    async fn saved_connections(&self) -> Result<Vec<ConnectionRecord>, CoreError>;

    /// Nearby SSIDs from a fresh Wi-Fi scan.
    async fn scan_wifi(&self) -> Result<Vec<WifiNetwork>, CoreError>;
}

/// Which network-manager integration to probe with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkTool {
    #[default]
    Nmcli,
}

impl fmt::Display for NetworkTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nmcli => write!(f, "nmcli"),
        }
    }
}

impl FromStr for NetworkTool {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "nmcli" => Ok(Self::Nmcli),
            other => Err(CoreError::Config {
                message: format!("unknown network tool '{other}' (supported: nmcli)"),
            }),
        }
    }
}

/// Construct the backend selected by configuration.
pub fn backend_for(tool: NetworkTool) -> Box<dyn NetworkBackend> {
    match tool {
        NetworkTool::Nmcli => Box::new(NmcliBackend::new()),
    }
}
