//! Network-aware endpoint resolution.
//!
//! Decides which base URL reaches Home Assistant: the user's configured
//! server, or the internal address saved for their home network when
//! the machine is currently on that network. The decision itself is a
//! pure function over a connection snapshot; `EndpointResolver` adds
//! the single probe call that produces the snapshot.

use tracing::warn;

use crate::model::{CurrentConnection, HomeNetwork};
use crate::net::backend::NetworkBackend;

/// The effective endpoint for one session. Computed fresh whenever
/// connection state may have changed; never cached across sessions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEndpoint {
    pub base_url: String,
    /// The home-network shortcut was taken.
    pub via_home_network: bool,
}

/// The current connection matches the saved home network and an
/// internal address is on file.
fn on_home_network(pref: &HomeNetwork, current: Option<&CurrentConnection>) -> bool {
    !pref.internal_ip.is_empty() && current.is_some_and(|c| c.name == pref.network_name)
}

/// Pick the base URL for a fixed connection snapshot.
///
/// Returns `configured` unchanged unless there is a current connection
/// whose name equals the saved home-network name *and* the preference
/// carries a non-empty internal address. Total and side-effect free; an
/// empty `configured` passes through and fails fast at client
/// construction instead.
pub fn resolve_base_url(
    configured: &str,
    pref: &HomeNetwork,
    current: Option<&CurrentConnection>,
) -> String {
    if on_home_network(pref, current) {
        pref.internal_ip.clone()
    } else {
        configured.to_owned()
    }
}

/// Probing wrapper around [`resolve_base_url`].
pub struct EndpointResolver<'a> {
    backend: &'a dyn NetworkBackend,
}

impl<'a> EndpointResolver<'a> {
    pub fn new(backend: &'a dyn NetworkBackend) -> Self {
        Self { backend }
    }

    /// Probe the active connection once and resolve the endpoint.
    ///
    /// A probe failure falls back to the configured server: a launcher
    /// action must still work on machines without the network manager,
    /// it just loses the home shortcut.
    pub async fn resolve(&self, configured: &str, pref: &HomeNetwork) -> ResolvedEndpoint {
        let current = match self.backend.current_connection().await {
            Ok(current) => current,
            Err(err) => {
                warn!(%err, "network probe failed; using configured server");
                None
            }
        };

        let via_home_network = on_home_network(pref, current.as_ref());
        ResolvedEndpoint {
            base_url: resolve_base_url(configured, pref, current.as_ref()),
            via_home_network,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use crate::model::{ConnectionRecord, WifiNetwork};
    use async_trait::async_trait;

    fn home_pref() -> HomeNetwork {
        HomeNetwork {
            network_name: "Home".into(),
            internal_ip: "http://10.0.0.5:8123".into(),
        }
    }

    fn connection(name: &str) -> CurrentConnection {
        CurrentConnection {
            name: name.into(),
            connection_type: "wifi".into(),
            device: "wlan0".into(),
        }
    }

    #[test]
    fn matching_network_uses_the_internal_address() {
        let url = resolve_base_url(
            "https://ha.example.net",
            &home_pref(),
            Some(&connection("Home")),
        );
        assert_eq!(url, "http://10.0.0.5:8123");
    }

    #[test]
    fn other_network_keeps_the_configured_server() {
        let url = resolve_base_url(
            "https://ha.example.net",
            &home_pref(),
            Some(&connection("CoffeeShop")),
        );
        assert_eq!(url, "https://ha.example.net");
    }

    #[test]
    fn offline_keeps_the_configured_server() {
        let url = resolve_base_url("https://ha.example.net", &home_pref(), None);
        assert_eq!(url, "https://ha.example.net");
    }

    #[test]
    fn empty_internal_ip_always_keeps_the_configured_server() {
        let pref = HomeNetwork {
            network_name: "Home".into(),
            internal_ip: String::new(),
        };
        let url = resolve_base_url("https://ha.example.net", &pref, Some(&connection("Home")));
        assert_eq!(url, "https://ha.example.net");
    }

    #[test]
    fn empty_configured_server_passes_through_untouched() {
        // Client construction is responsible for failing fast on this.
        let url = resolve_base_url("", &HomeNetwork::default(), Some(&connection("Home")));
        assert_eq!(url, "");
    }

    // ── Probing wrapper ──────────────────────────────────────────────

    struct FakeBackend {
        current: Result<Option<CurrentConnection>, ()>,
    }

    #[async_trait]
    impl NetworkBackend for FakeBackend {
        async fn current_connection(&self) -> Result<Option<CurrentConnection>, CoreError> {
            self.current.clone().map_err(|()| CoreError::Command {
                cmd: "nmcli connection show --active".into(),
                code: Some(10),
                stderr: "NetworkManager is not running".into(),
            })
        }

        async fn saved_connections(&self) -> Result<Vec<ConnectionRecord>, CoreError> {
            Ok(Vec::new())
        }

        async fn scan_wifi(&self) -> Result<Vec<WifiNetwork>, CoreError> {
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn resolver_takes_the_home_shortcut_when_connected_at_home() {
        let backend = FakeBackend {
            current: Ok(Some(connection("Home"))),
        };
        let endpoint = EndpointResolver::new(&backend)
            .resolve("https://ha.example.net", &home_pref())
            .await;
        assert!(endpoint.via_home_network);
        assert_eq!(endpoint.base_url, "http://10.0.0.5:8123");
    }

    #[tokio::test]
    async fn resolver_falls_back_when_the_probe_fails() {
        let backend = FakeBackend { current: Err(()) };
        let endpoint = EndpointResolver::new(&backend)
            .resolve("https://ha.example.net", &home_pref())
            .await;
        assert!(!endpoint.via_home_network);
        assert_eq!(endpoint.base_url, "https://ha.example.net");
    }
}
