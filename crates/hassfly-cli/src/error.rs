//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` variants into user-facing errors
//! with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use hassfly_config::ConfigError;
use hassfly_core::CoreError;

/// Exit codes, stable for scripting.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const PROBE: i32 = 5;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
#[allow(dead_code)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────

    #[error("Could not reach Home Assistant at {url}")]
    #[diagnostic(
        code(hassfly::connection_failed),
        help(
            "Check that the server is running and the URL is reachable\n\
             from this network. If you are away from home, the configured\n\
             server URL is used -- verify it with: hassfly config show"
        )
    )]
    ConnectionFailed {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    // ── Authentication ───────────────────────────────────────────────

    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(hassfly::auth_failed),
        help(
            "The server rejected the access token.\n\
             Create a long-lived token in your Home Assistant profile\n\
             and run: hassfly config init"
        )
    )]
    AuthFailed { message: String },

    #[error("No API token configured")]
    #[diagnostic(
        code(hassfly::no_token),
        help(
            "Configure a token with: hassfly config init\n\
             Or set the HASSFLY_TOKEN environment variable."
        )
    )]
    NoToken,

    // ── Resources ────────────────────────────────────────────────────

    #[error("Entity '{entity_id}' not found")]
    #[diagnostic(
        code(hassfly::not_found),
        help("Run: hassfly entities list --all to see available entities")
    )]
    EntityNotFound { entity_id: String },

    // ── Network probe ────────────────────────────────────────────────

    #[error("Network probe `{cmd}` failed")]
    #[diagnostic(
        code(hassfly::probe_failed),
        help(
            "Is NetworkManager installed and running?\n\
             {stderr}"
        )
    )]
    ProbeFailed { cmd: String, stderr: String },

    // ── API ──────────────────────────────────────────────────────────

    #[error("API error: {message}")]
    #[diagnostic(code(hassfly::api_error))]
    ApiError { message: String },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(hassfly::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error("No server configured")]
    #[diagnostic(
        code(hassfly::no_config),
        help(
            "Create a configuration with: hassfly config init\n\
             Expected at: {path}"
        )
    )]
    NoConfig { path: String },

    // ── Timeout ──────────────────────────────────────────────────────

    #[error("Request timed out")]
    #[diagnostic(
        code(hassfly::timeout),
        help("Increase the timeout with --timeout or check server responsiveness.")
    )]
    Timeout,

    // ── IO / Serialization ───────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON payload: {0}")]
    #[diagnostic(code(hassfly::json))]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } | Self::NoToken => exit_code::AUTH,
            Self::EntityNotFound { .. } => exit_code::NOT_FOUND,
            Self::ProbeFailed { .. } => exit_code::PROBE,
            Self::Timeout => exit_code::TIMEOUT,
            Self::Validation { .. } | Self::NoConfig { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => CliError::ConnectionFailed {
                url,
                source: reason.into(),
            },

            CoreError::AuthenticationFailed { message } => CliError::AuthFailed { message },

            CoreError::Timeout => CliError::Timeout,

            CoreError::Command { cmd, code: _, stderr } => CliError::ProbeFailed { cmd, stderr },

            CoreError::EntityNotFound { entity_id } => CliError::EntityNotFound { entity_id },

            CoreError::Api { message, status: _ } => CliError::ApiError { message },

            CoreError::Config { message } => CliError::Validation {
                field: "config".into(),
                reason: message,
            },

            CoreError::Internal(message) => CliError::ApiError { message },
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::NoToken => CliError::NoToken,
            ConfigError::Serialization(e) => CliError::Validation {
                field: "config".into(),
                reason: e.to_string(),
            },
            ConfigError::Figment(e) => CliError::Validation {
                field: "config".into(),
                reason: e.to_string(),
            },
            ConfigError::Io(e) => CliError::Io(e),
        }
    }
}
