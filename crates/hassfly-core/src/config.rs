// ── Runtime connection configuration ──
//
// Describes *how* to reach the Home Assistant server. Carries credential
// data and tuning but never touches disk; hassfly-config builds one of
// these from the persisted file and hands it in.

use std::time::Duration;

use secrecy::SecretString;

use crate::net::backend::NetworkTool;

/// Configuration for one Home Assistant session.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Default server base URL (e.g. `https://ha.example.net`), used
    /// whenever the home-network shortcut does not apply.
    pub url: String,
    /// Long-lived access token sent as the bearer credential.
    pub token: SecretString,
    /// Which network-manager integration probes connection state.
    pub network_tool: NetworkTool,
    /// HTTP request timeout.
    pub timeout: Duration,
    /// Accept self-signed TLS certificates (local installs).
    pub insecure: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            token: SecretString::from(String::new()),
            network_tool: NetworkTool::default(),
            timeout: Duration::from_secs(30),
            insecure: false,
        }
    }
}
