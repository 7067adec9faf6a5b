// ── Runtime connection configuration ──
//
// Describes *how* to reach the Dashboard and which organization to act on.
// Carries credential data and connection tuning but never touches disk;
// the CLI builds an `RmaConfig` and hands it in.

use std::time::Duration;

use secrecy::SecretString;
use url::Url;

use meraki_rma_api::transport::{TlsMode, TransportConfig};
use meraki_rma_api::{DEFAULT_BASE_URL, DashboardClient};

use crate::error::CoreError;

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Additional CA certificate file (TLS-intercepting proxies).
    CustomCa(std::path::PathBuf),
}

/// Everything needed to run one replacement against one organization.
#[derive(Debug, Clone)]
pub struct RmaConfig {
    /// Dashboard base URL (e.g. `https://api.meraki.com/api/v1`).
    pub base_url: Url,
    /// Dashboard API key.
    pub api_key: SecretString,
    /// Organization that owns the network and the inventory.
    pub organization_id: String,
    /// TLS verification strategy.
    pub tls: TlsVerification,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl RmaConfig {
    /// Config pointing at the public Dashboard with default tuning.
    pub fn new(organization_id: impl Into<String>, api_key: SecretString) -> Result<Self, CoreError> {
        let base_url = DEFAULT_BASE_URL.parse().map_err(|e| CoreError::Config {
            message: format!("invalid default base URL: {e}"),
        })?;
        Ok(Self {
            base_url,
            api_key,
            organization_id: organization_id.into(),
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(30),
        })
    }

    /// Build the HTTP client described by this config.
    pub fn connect(&self) -> Result<DashboardClient, CoreError> {
        let transport = TransportConfig {
            tls: match &self.tls {
                TlsVerification::SystemDefaults => TlsMode::System,
                TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
            },
            timeout: self.timeout,
        };
        let client =
            DashboardClient::from_api_key(self.base_url.as_str(), &self.api_key, &transport)?;
        Ok(client)
    }
}
