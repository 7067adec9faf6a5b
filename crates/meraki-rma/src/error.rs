//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` variants into user-facing errors with
//! actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use meraki_rma_config::ConfigError;
use meraki_rma_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach the Dashboard at {url}")]
    #[diagnostic(
        code(meraki_rma::connection_failed),
        help("{reason}\nCheck network access to the Dashboard, or --base-url.")
    )]
    ConnectionFailed { url: String, reason: String },

    #[error("Dashboard request timed out")]
    #[diagnostic(
        code(meraki_rma::timeout),
        help("Increase the timeout with --timeout. Steps reported above completed.")
    )]
    Timeout,

    #[error("Rate limited by the Dashboard")]
    #[diagnostic(
        code(meraki_rma::rate_limited),
        help("Retry after {retry_after_secs}s. Steps reported above completed.")
    )]
    RateLimited { retry_after_secs: u64 },

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(meraki_rma::auth_failed),
        help(
            "Verify the API key and that it has write access to the organization.\n\
             Run: meraki-rma config set-api-key"
        )
    )]
    AuthFailed { message: String },

    #[error("No API key configured for profile '{profile}'")]
    #[diagnostic(
        code(meraki_rma::no_credentials),
        help(
            "Store one with: meraki-rma config set-api-key\n\
             Or set the MERAKI_DASHBOARD_API_KEY environment variable."
        )
    )]
    NoCredentials { profile: String },

    #[error("No organization id configured for profile '{profile}'")]
    #[diagnostic(
        code(meraki_rma::no_organization),
        help("Pass --org-id, set MERAKI_ORG_ID, or run: meraki-rma config init")
    )]
    NoOrganization { profile: String },

    // ── Workflow ─────────────────────────────────────────────────────
    #[error("Non existing network '{name}', quitting!")]
    #[diagnostic(
        code(meraki_rma::network_not_found),
        help("Network names are matched exactly, including case.")
    )]
    NetworkNotFound { name: String },

    #[error("Device {serial} not found")]
    #[diagnostic(code(meraki_rma::device_not_found))]
    DeviceNotFound { serial: String },

    #[error("Preflight check failed: {message}")]
    #[diagnostic(
        code(meraki_rma::preflight),
        help("Nothing was changed. Check the serials and the network name.")
    )]
    Preflight { message: String },

    #[error("Operation not supported: {operation}")]
    #[diagnostic(code(meraki_rma::unsupported), help("{reason}"))]
    Unsupported { operation: String, reason: String },

    // ── API ──────────────────────────────────────────────────────────
    #[error("Dashboard API error ({status}): {message}")]
    #[diagnostic(
        code(meraki_rma::api_error),
        help("The run stopped here. Steps reported above completed; re-run once fixed.")
    )]
    ApiError { status: String, message: String },

    // ── Validation / configuration ───────────────────────────────────
    #[error("Invalid value for --{flag}: {reason}")]
    #[diagnostic(code(meraki_rma::invalid_argument), help("See: meraki-rma --help"))]
    InvalidArgument { flag: String, reason: String },

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(meraki_rma::validation))]
    Validation { field: String, reason: String },

    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(meraki_rma::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: meraki-rma config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error(transparent)]
    #[diagnostic(code(meraki_rma::config))]
    Config(ConfigError),

    // ── IO ───────────────────────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidArgument { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => CliError::ConnectionFailed { url, reason },
            CoreError::AuthenticationFailed { message } => CliError::AuthFailed { message },
            CoreError::Timeout => CliError::Timeout,
            CoreError::RateLimited { retry_after_secs } => CliError::RateLimited { retry_after_secs },
            CoreError::NetworkNotFound { name } => CliError::NetworkNotFound { name },
            CoreError::DeviceNotFound { serial } => CliError::DeviceNotFound { serial },
            CoreError::Preflight { message } => CliError::Preflight { message },
            CoreError::Unsupported { operation, reason } => {
                CliError::Unsupported { operation, reason }
            }
            CoreError::Api { message, status } => CliError::ApiError {
                status: status.map_or_else(|| "n/a".into(), |s| s.to_string()),
                message,
            },
            CoreError::Config { message } => CliError::Validation {
                field: "config".into(),
                reason: message,
            },
            CoreError::Internal(message) => CliError::ApiError {
                status: "internal".into(),
                message,
            },
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::NoCredentials { profile } => CliError::NoCredentials { profile },
            ConfigError::NoOrganization { profile } => CliError::NoOrganization { profile },
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            other => CliError::Config(other),
        }
    }
}
