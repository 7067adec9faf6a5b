// ── Core error types ──
//
// Domain errors for the replacement workflow. Consumers never see HTTP
// status codes or JSON parse failures directly; the
// `From<meraki_rma_api::Error>` impl translates transport-layer errors
// into these variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot reach the Dashboard at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Dashboard request timed out")]
    Timeout,

    #[error("Rate limited by the Dashboard -- retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    // ── Lookup errors ────────────────────────────────────────────────
    #[error("Non existing network '{name}'")]
    NetworkNotFound { name: String },

    #[error("Device not found: {serial}")]
    DeviceNotFound { serial: String },

    // ── Workflow errors ──────────────────────────────────────────────
    /// A data-model invariant does not hold (e.g. target already in network).
    #[error("Preflight check failed: {message}")]
    Preflight { message: String },

    #[error("Operation not supported: {operation} ({reason})")]
    Unsupported { operation: String, reason: String },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("Dashboard API error: {message}")]
    Api {
        message: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<meraki_rma_api::Error> for CoreError {
    fn from(err: meraki_rma_api::Error) -> Self {
        use meraki_rma_api::Error as ApiError;

        tracing::debug!(transient = err.is_transient(), error = %err, "dashboard call failed");

        match err {
            ApiError::InvalidApiKey => CoreError::AuthenticationFailed {
                message: "Invalid API key".into(),
            },
            ApiError::Forbidden { message } => CoreError::AuthenticationFailed {
                message: format!("access denied: {message}"),
            },
            ApiError::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            ApiError::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            ApiError::InvalidPathSegment(segment) => CoreError::Config {
                message: format!("{segment:?} is not a usable serial or id"),
            },
            ApiError::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            ApiError::RateLimited { retry_after_secs } => {
                CoreError::RateLimited { retry_after_secs }
            }
            ApiError::Api {
                status, message, ..
            } => CoreError::Api {
                message,
                status: Some(status),
            },
            ApiError::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
        }
    }
}
