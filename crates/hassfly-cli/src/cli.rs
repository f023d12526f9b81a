//! Clap derive structures for the `hassfly` CLI.
//!
//! Defines the complete command tree, global flags, and shared enums.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// hassfly -- Home Assistant from the command line, network-aware
#[derive(Debug, Parser)]
#[command(
    name = "hassfly",
    version,
    about = "Toggle Home Assistant entities from the command line",
    long_about = "A launcher-style CLI for Home Assistant.\n\n\
        When the machine is on the saved home Wi-Fi network, requests go\n\
        straight to the internal address; everywhere else they use the\n\
        configured server URL.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Home Assistant server URL (overrides config)
    #[arg(long, short = 's', env = "HASSFLY_SERVER", global = true)]
    pub server: Option<String>,

    /// Long-lived access token
    #[arg(long, env = "HASSFLY_TOKEN", global = true, hide_env = true)]
    pub token: Option<String>,

    /// Network-manager integration used to probe connection state
    #[arg(long, env = "HASSFLY_NETWORK_TOOL", global = true)]
    pub network_tool: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "HASSFLY_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "HASSFLY_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds
    #[arg(long, env = "HASSFLY_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Browse and toggle Home Assistant entities
    #[command(alias = "e")]
    Entities(EntitiesArgs),

    /// Inspect saved networks and pick the home network
    #[command(alias = "net", alias = "n")]
    Networks(NetworksArgs),

    /// Render a Jinja template on the server
    Template(TemplateArgs),

    /// Manage the hassfly configuration file
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Entities ────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct EntitiesArgs {
    #[command(subcommand)]
    pub command: EntitiesCommand,
}

#[derive(Debug, Subcommand)]
pub enum EntitiesCommand {
    /// List entities (controllable devices by default)
    #[command(alias = "ls")]
    List(EntitiesListArgs),

    /// Show one entity's current state
    Get {
        /// Entity id, e.g. light.kitchen
        entity_id: String,
    },

    /// Toggle an entity via its domain's toggle service
    Toggle {
        /// Entity id, e.g. light.kitchen
        entity_id: String,
    },
}

#[derive(Debug, Args)]
pub struct EntitiesListArgs {
    /// Include every entity, not just controllable devices
    #[arg(long, short = 'a')]
    pub all: bool,
}

// ── Networks ────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct NetworksArgs {
    #[command(subcommand)]
    pub command: NetworksCommand,
}

#[derive(Debug, Subcommand)]
pub enum NetworksCommand {
    /// List connection profiles saved by the OS
    #[command(alias = "ls")]
    List,

    /// Scan for nearby Wi-Fi networks
    Scan,

    /// Save which network is home and the internal server address
    SetHome(SetHomeArgs),
}

#[derive(Debug, Args)]
pub struct SetHomeArgs {
    /// Connection-profile name of the home network (see `networks list`)
    pub network_name: String,

    /// Base URL that reaches Home Assistant inside that network,
    /// e.g. http://192.168.1.10:8123
    pub internal_ip: String,
}

// ── Template ────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct TemplateArgs {
    /// Template body, e.g. "{{ states('sun.sun') }}"
    pub template: String,
}

// ── Config ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the effective configuration (token redacted)
    Show,

    /// Print the config file path
    Path,

    /// Interactively create the configuration
    Init,
}

// ── Completions ─────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}
