//! Clap derive structures for the `meraki-rma` CLI.
//!
//! Defines the command tree, global flags, and shared types.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// meraki-rma -- swap a failed Meraki device for its replacement
#[derive(Debug, Parser)]
#[command(
    name = "meraki-rma",
    version,
    about = "Replace failed Meraki switches and access points",
    long_about = "Automates the RMA of a Meraki switch or access point.\n\n\
        Claims the replacement into the organization and network, carries over\n\
        stack membership, configuration, link aggregations, RF profile and\n\
        metadata from the broken device, then removes the broken device.",
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
    /// Configuration profile to use
    #[arg(long, short = 'p', env = "MERAKI_RMA_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Organization id (overrides profile)
    #[arg(long, env = "MERAKI_ORG_ID", global = true)]
    pub org_id: Option<String>,

    /// Dashboard API key (overrides profile and keyring)
    #[arg(long, env = "MERAKI_DASHBOARD_API_KEY", global = true, hide_env_values = true)]
    pub api_key: Option<String>,

    /// Dashboard base URL (overrides profile)
    #[arg(long, env = "MERAKI_BASE_URL", global = true)]
    pub base_url: Option<String>,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
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
    /// Replace a switch (stack, clone, link aggregations, metadata)
    #[command(alias = "sw")]
    Switch(SwitchArgs),

    /// Replace an access point (RF profile, metadata)
    Ap(ApArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Replacement arguments ────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct SwitchArgs {
    /// Serial of the broken switch
    pub source_serial: String,

    /// Serial of the replacement switch
    pub target_serial: String,

    /// Name of the network both switches belong to
    pub network_name: String,
}

#[derive(Debug, Args)]
pub struct ApArgs {
    /// Serial of the broken access point
    pub source_serial: String,

    /// Serial of the replacement access point
    pub target_serial: String,

    /// Name of the network both access points belong to
    pub network_name: String,

    /// RF profile id to apply instead of the broken access point's one
    pub rf_profile: Option<String>,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create initial config file with guided setup
    Init,

    /// Display current configuration (secrets redacted)
    Show,

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name to set as default
        name: String,
    },

    /// Store an API key in the system keyring
    SetApiKey {
        /// Profile name
        #[arg(long)]
        profile: Option<String>,
    },
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
