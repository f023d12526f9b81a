//! Persisted configuration for hassfly.
//!
//! TOML file + `HASSFLY_*` environment overrides and token resolution
//! (env var, system keyring, plaintext). The home-network preference
//! lives in the same file and is written back by the explicit set-home
//! action; core never reads or writes any of this directly -- the CLI
//! translates a loaded `Config` into `hassfly_core::ServerConfig`.

use std::path::PathBuf;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use hassfly_core::HomeNetwork;

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no API token configured (set `token` in the config file, the HASSFLY_TOKEN variable, or the keyring)")]
    NoToken,

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    /// Default Home Assistant base URL (e.g. "https://ha.example.net").
    pub server: Option<String>,

    /// Long-lived access token (plaintext -- prefer keyring or env var).
    pub token: Option<String>,

    /// Environment variable name containing the token.
    pub token_env: Option<String>,

    /// Which network-manager integration probes connection state.
    #[serde(default = "default_network_tool")]
    pub network_tool: String,

    /// Accept self-signed TLS certificates.
    #[serde(default)]
    pub insecure: bool,

    /// HTTP request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Display defaults for the CLI.
    #[serde(default)]
    pub defaults: Defaults,

    /// The persisted home-network preference.
    #[serde(default)]
    pub home: HomeNetwork,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_timeout() -> u64 {
    30
}
fn default_network_tool() -> String {
    "nmcli".into()
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("io", "hassfly", "hassfly").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("hassfly");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from an explicit path (test seam; `load_config` uses the
/// canonical path).
pub fn load_config_from(path: &std::path::Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("HASSFLY_"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if the file doesn't exist.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(cfg, &config_path())
}

/// Write to an explicit path (test seam).
pub fn save_config_to(cfg: &Config, path: &std::path::Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

/// Set the home-network preference. Overwrites any previous value;
/// nothing ever deletes it. The caller persists with [`save_config`].
pub fn set_home_network(
    cfg: &mut Config,
    network_name: &str,
    internal_ip: &str,
) -> Result<(), ConfigError> {
    if network_name.is_empty() {
        return Err(ConfigError::Validation {
            field: "network_name".into(),
            reason: "must not be empty".into(),
        });
    }
    if internal_ip.is_empty() {
        return Err(ConfigError::Validation {
            field: "internal_ip".into(),
            reason: "must not be empty".into(),
        });
    }
    cfg.home = HomeNetwork {
        network_name: network_name.to_owned(),
        internal_ip: internal_ip.to_owned(),
    };
    Ok(())
}

// ── Credential resolution ───────────────────────────────────────────

/// Resolve the API token from the credential chain.
///
/// Order: the variable named by `token_env`, then the system keyring
/// (`hassfly` service), then the plaintext `token` key.
pub fn resolve_token(cfg: &Config) -> Result<SecretString, ConfigError> {
    // 1. token_env → env var lookup
    if let Some(ref env_name) = cfg.token_env {
        if let Ok(val) = std::env::var(env_name) {
            return Ok(SecretString::from(val));
        }
    }

    // 2. System keyring
    if let Ok(entry) = keyring::Entry::new("hassfly", "api-token") {
        if let Ok(secret) = entry.get_password() {
            return Ok(SecretString::from(secret));
        }
    }

    // 3. Plaintext in config
    if let Some(ref token) = cfg.token {
        if !token.is_empty() {
            return Ok(SecretString::from(token.clone()));
        }
    }

    Err(ConfigError::NoToken)
}

/// Store the API token in the system keyring.
pub fn store_token(token: &str) -> Result<(), ConfigError> {
    let entry = keyring::Entry::new("hassfly", "api-token").map_err(|e| ConfigError::Validation {
        field: "token".into(),
        reason: format!("keyring unavailable: {e}"),
    })?;
    entry.set_password(token).map_err(|e| ConfigError::Validation {
        field: "token".into(),
        reason: format!("failed to store token: {e}"),
    })
}
