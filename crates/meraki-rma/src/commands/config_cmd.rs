//! Config subcommand handlers.

use dialoguer::{Input, Select};
use tabled::Tabled;

use meraki_rma_config::ConfigError;
use meraki_rma_core::DEFAULT_BASE_URL;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::{self, Profile};
use crate::error::CliError;
use crate::output;

// ── Helpers ─────────────────────────────────────────────────────────

/// Map a dialoguer / interactive I/O failure into CliError.
fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

fn prompt_api_key() -> Result<String, CliError> {
    let key = rpassword::prompt_password("Dashboard API key: ").map_err(prompt_err)?;
    if key.trim().is_empty() {
        return Err(CliError::Validation {
            field: "api_key".into(),
            reason: "API key cannot be empty".into(),
        });
    }
    Ok(key.trim().to_owned())
}

#[derive(Tabled)]
struct ProfileRow {
    #[tabled(rename = "Profile")]
    name: String,
    #[tabled(rename = "Default")]
    default: String,
    #[tabled(rename = "Organization")]
    organization: String,
    #[tabled(rename = "Base URL")]
    base_url: String,
    #[tabled(rename = "API key")]
    api_key: String,
}

impl ProfileRow {
    fn new(name: &str, profile: &Profile, is_default: bool) -> Self {
        let api_key = match (&profile.api_key_env, &profile.api_key) {
            (Some(var), _) => format!("env {var}"),
            (None, Some(_)) => "config file".into(),
            (None, None) => "keyring".into(),
        };
        Self {
            name: name.to_owned(),
            default: if is_default { "*".into() } else { String::new() },
            organization: profile.organization_id.clone().unwrap_or_else(|| "-".into()),
            base_url: profile
                .base_url
                .clone()
                .unwrap_or_else(|| DEFAULT_BASE_URL.into()),
            api_key,
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Init => init(),

        // ── Show ────────────────────────────────────────────────────
        ConfigCommand::Show => {
            let mut cfg = config::load_config_or_default();
            for profile in cfg.profiles.values_mut() {
                if profile.api_key.is_some() {
                    profile.api_key = Some("********".into());
                }
            }
            let rendered = toml::to_string_pretty(&cfg).map_err(ConfigError::from)?;
            eprintln!("# {}", config::config_path().display());
            println!("{rendered}");
            Ok(())
        }

        // ── Profiles ────────────────────────────────────────────────
        ConfigCommand::Profiles => {
            let cfg = config::load_config_or_default();
            if cfg.profiles.is_empty() {
                eprintln!("No profiles configured. Run: meraki-rma config init");
                return Ok(());
            }

            let default = cfg.default_profile.as_deref().unwrap_or("default");
            let mut names: Vec<_> = cfg.profiles.keys().collect();
            names.sort();
            let rows: Vec<_> = names
                .into_iter()
                .map(|name| ProfileRow::new(name, &cfg.profiles[name], name == default))
                .collect();
            println!("{}", output::render_table(&rows));
            Ok(())
        }

        // ── Use <name> ─────────────────────────────────────────────
        ConfigCommand::Use { name } => {
            let mut cfg = config::load_config_or_default();

            if !cfg.profiles.contains_key(&name) {
                return Err(CliError::ProfileNotFound {
                    available: config::available_profiles(&cfg),
                    name,
                });
            }

            cfg.default_profile = Some(name.clone());
            config::save_config(&cfg)?;
            eprintln!("✓ Default profile set to '{name}'");
            Ok(())
        }

        // ── SetApiKey ───────────────────────────────────────────────
        ConfigCommand::SetApiKey { profile } => {
            let cfg = config::load_config_or_default();
            let profile_name =
                profile.unwrap_or_else(|| config::active_profile_name(global, &cfg));

            let key = prompt_api_key()?;
            config::store_api_key(&profile_name, &key)?;

            eprintln!("✓ API key stored in system keyring for profile '{profile_name}'");
            Ok(())
        }
    }
}

// ── Init: interactive wizard ────────────────────────────────────────

fn init() -> Result<(), CliError> {
    let config_path = config::config_path();
    eprintln!("meraki-rma -- configuration wizard");
    eprintln!("   Config path: {}\n", config_path.display());

    // 1. Profile name
    let profile_name: String = Input::new()
        .with_prompt("Profile name")
        .default("default".into())
        .interact_text()
        .map_err(prompt_err)?;

    // 2. Organization
    let organization_id: String = Input::new()
        .with_prompt("Organization id")
        .interact_text()
        .map_err(prompt_err)?;

    // 3. Base URL
    let base_url: String = Input::new()
        .with_prompt("Dashboard base URL")
        .default(DEFAULT_BASE_URL.into())
        .interact_text()
        .map_err(prompt_err)?;
    if let Err(e) = base_url.parse::<url::Url>() {
        return Err(CliError::Validation {
            field: "base_url".into(),
            reason: format!("invalid URL {base_url}: {e}"),
        });
    }

    // 4. API key and where it lives
    let key = prompt_api_key()?;
    let store_choices = &[
        "Store in system keyring (recommended)",
        "Save to config file (plaintext)",
    ];
    let store_selection = Select::new()
        .with_prompt("Where to store the API key?")
        .items(store_choices)
        .default(0)
        .interact()
        .map_err(prompt_err)?;

    let api_key = if store_selection == 0 {
        config::store_api_key(&profile_name, &key)?;
        eprintln!("   ✓ API key stored in system keyring");
        None
    } else {
        Some(key)
    };

    // 5. Merge into existing config and write
    let profile = Profile {
        organization_id: Some(organization_id),
        base_url: (base_url != DEFAULT_BASE_URL).then_some(base_url),
        api_key,
        ..Profile::default()
    };

    let mut cfg = config::load_config_or_default();
    cfg.profiles.insert(profile_name.clone(), profile);
    cfg.default_profile = Some(profile_name.clone());
    let written = config::save_config(&cfg)?;

    eprintln!("\n✓ Configuration written to {}", written.display());
    eprintln!("  Active profile: {profile_name}");
    eprintln!("\n  Try it: meraki-rma ap <broken-serial> <new-serial> \"<network name>\"");

    Ok(())
}
