//! CLI configuration -- thin wrapper around `meraki_rma_config`.
//!
//! Adds resolution that respects `GlobalOpts` flag overrides
//! (--org-id, --api-key, --base-url, --timeout).

use std::time::Duration;

use secrecy::SecretString;

use meraki_rma_core::{RmaConfig, TlsVerification};

use crate::cli::GlobalOpts;
use crate::error::CliError;

pub use meraki_rma_config::{
    Config, Profile, config_path, load_config_or_default, save_config, store_api_key,
};

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Build the `RmaConfig` for a replacement run.
///
/// Flags (and their environment variables) win over the profile. A missing
/// profile is not an error as long as flags supply the organization id and
/// API key.
pub fn build_rma_config(global: &GlobalOpts) -> Result<RmaConfig, CliError> {
    let cfg = load_config_or_default();
    let profile_name = active_profile_name(global, &cfg);

    let profile = match cfg.profiles.get(&profile_name) {
        Some(profile) => profile.clone(),
        None if global.profile.is_some() => {
            return Err(CliError::ProfileNotFound {
                available: available_profiles(&cfg),
                name: profile_name,
            });
        }
        None => Profile::default(),
    };

    resolve_profile(&profile, &profile_name, cfg.defaults.timeout, global)
}

/// Translate a `Profile` + global flags into an `RmaConfig`.
pub fn resolve_profile(
    profile: &Profile,
    profile_name: &str,
    default_timeout: u64,
    global: &GlobalOpts,
) -> Result<RmaConfig, CliError> {
    // 1. Base URL (flag > profile > public Dashboard)
    let base_url = match global.base_url.as_deref() {
        Some(raw) => raw.parse().map_err(|_| CliError::InvalidArgument {
            flag: "base-url".into(),
            reason: format!("invalid URL: {raw}"),
        })?,
        None => meraki_rma_config::profile_base_url(profile)?,
    };

    // 2. API key (flag > credential chain)
    let api_key = match global.api_key {
        Some(ref key) => SecretString::from(key.clone()),
        None => meraki_rma_config::resolve_api_key(profile, profile_name)?,
    };

    // 3. Organization (flag > env > profile)
    let organization_id = match global.org_id {
        Some(ref id) => id.clone(),
        None => meraki_rma_config::resolve_organization_id(profile, profile_name)?,
    };

    // 4. TLS
    let tls = profile
        .ca_cert
        .clone()
        .map_or(TlsVerification::SystemDefaults, TlsVerification::CustomCa);

    // 5. Timeout
    let timeout = Duration::from_secs(
        global
            .timeout
            .or(profile.timeout)
            .unwrap_or(default_timeout),
    );

    Ok(RmaConfig {
        base_url,
        api_key,
        organization_id,
        tls,
        timeout,
    })
}

/// Comma-separated profile names, or `(none)`.
pub fn available_profiles(cfg: &Config) -> String {
    let mut names: Vec<_> = cfg.profiles.keys().cloned().collect();
    if names.is_empty() {
        return "(none)".into();
    }
    names.sort();
    names.join(", ")
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use secrecy::ExposeSecret;

    use super::*;
    use crate::cli::ColorMode;
    use crate::error::exit_code;

    fn flags() -> GlobalOpts {
        GlobalOpts {
            profile: None,
            org_id: Some("O_1".into()),
            api_key: Some("flag-key".into()),
            base_url: None,
            timeout: None,
            color: ColorMode::Never,
            verbose: 0,
        }
    }

    #[test]
    fn flags_win_over_profile() {
        let profile = Profile {
            organization_id: Some("O_PROFILE".into()),
            base_url: Some("https://api.meraki.ca/api/v1".into()),
            api_key: Some("profile-key".into()),
            timeout: Some(10),
            ..Profile::default()
        };
        let global = GlobalOpts {
            base_url: Some("https://api.meraki.cn/api/v1".into()),
            timeout: Some(5),
            ..flags()
        };

        let cfg = resolve_profile(&profile, "default", 30, &global).unwrap();

        assert_eq!(cfg.organization_id, "O_1");
        assert_eq!(cfg.api_key.expose_secret(), "flag-key");
        assert_eq!(cfg.base_url.as_str(), "https://api.meraki.cn/api/v1");
        assert_eq!(cfg.timeout, Duration::from_secs(5));
    }

    #[test]
    fn timeout_falls_back_to_config_defaults() {
        let cfg = resolve_profile(&Profile::default(), "default", 45, &flags()).unwrap();
        assert_eq!(cfg.timeout, Duration::from_secs(45));
        assert_eq!(cfg.base_url.as_str(), meraki_rma_core::DEFAULT_BASE_URL);

        let profile = Profile {
            timeout: Some(12),
            ..Profile::default()
        };
        let cfg = resolve_profile(&profile, "default", 45, &flags()).unwrap();
        assert_eq!(cfg.timeout, Duration::from_secs(12));
    }

    #[test]
    fn bad_base_url_flag_is_a_usage_error() {
        let global = GlobalOpts {
            base_url: Some("not a url".into()),
            ..flags()
        };
        let err = resolve_profile(&Profile::default(), "default", 30, &global).unwrap_err();
        assert!(matches!(err, CliError::InvalidArgument { ref flag, .. } if flag == "base-url"));
        assert_eq!(err.exit_code(), exit_code::USAGE);
    }

    #[test]
    fn bad_base_url_in_profile_is_a_runtime_error() {
        let profile = Profile {
            base_url: Some("not a url".into()),
            ..Profile::default()
        };
        let err = resolve_profile(&profile, "default", 30, &flags()).unwrap_err();
        assert!(matches!(err, CliError::Validation { ref field, .. } if field == "base_url"));
        assert_eq!(err.exit_code(), exit_code::GENERAL);
    }
}
