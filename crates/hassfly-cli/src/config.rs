//! CLI-owned configuration wiring: loaded file + flag overrides →
//! `hassfly_core::ServerConfig`.
//!
//! Core never sees the file or the flags -- it receives a pre-built
//! `ServerConfig` and the home-network preference.

use std::time::Duration;

use secrecy::SecretString;

use hassfly_core::net::backend::NetworkTool;
use hassfly_core::{HomeNetwork, ServerConfig};

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Build a `ServerConfig` from the config file with CLI overrides, and
/// return the persisted home-network preference alongside it.
pub fn build_server_config(global: &GlobalOpts) -> Result<(ServerConfig, HomeNetwork), CliError> {
    let mut cfg = hassfly_config::load_config_or_default();

    // Flag overrides
    if let Some(ref server) = global.server {
        cfg.server = Some(server.clone());
    }
    if let Some(ref tool) = global.network_tool {
        cfg.network_tool = tool.clone();
    }
    if global.insecure {
        cfg.insecure = true;
    }
    if let Some(timeout) = global.timeout {
        cfg.timeout = timeout;
    }

    let server = cfg
        .server
        .as_deref()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| CliError::NoConfig {
            path: hassfly_config::config_path().display().to_string(),
        })?;

    let _: url::Url = server.parse().map_err(|_| CliError::Validation {
        field: "server".into(),
        reason: format!("invalid URL: {server}"),
    })?;

    let network_tool: NetworkTool = cfg.network_tool.parse().map_err(CliError::from)?;

    // An explicit --token wins over the env/keyring/plaintext chain.
    let token = match global.token {
        Some(ref t) if !t.is_empty() => SecretString::from(t.clone()),
        _ => hassfly_config::resolve_token(&cfg)?,
    };

    let server_config = ServerConfig {
        url: server.to_owned(),
        token,
        network_tool,
        timeout: Duration::from_secs(cfg.timeout),
        insecure: cfg.insecure,
    };

    Ok((server_config, cfg.home))
}

/// Resolve the probe backend selection (used by commands that never
/// touch the server).
pub fn resolve_network_tool(global: &GlobalOpts) -> Result<NetworkTool, CliError> {
    let cfg = hassfly_config::load_config_or_default();
    let name = global
        .network_tool
        .clone()
        .unwrap_or(cfg.network_tool);
    name.parse().map_err(CliError::from)
}
