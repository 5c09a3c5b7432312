//! Flag-aware wrappers over `vitrine-config`.
//!
//! Resolution order for every connection setting: CLI flag (or its env
//! var) > profile > `[defaults]`. Output format and color follow flag >
//! `[defaults]` > built-in.

use std::time::Duration;

use clap::ValueEnum;
use tracing::warn;

use vitrine_core::{CatalogConfig, TlsVerification};

pub use vitrine_config::{
    Config, Defaults, Profile, config_path, load_config_or_default, profile_to_catalog_config,
    save_config,
};

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Fill `global.output` and `global.color` from flags, then `defaults`.
///
/// An unrecognized value in the config file is logged and skipped.
pub fn apply_display_defaults(global: &mut GlobalOpts, defaults: &Defaults) {
    global.output = global
        .output_flag
        .clone()
        .or_else(|| from_config("output", &defaults.output))
        .unwrap_or_default();
    global.color = global
        .color_flag
        .clone()
        .or_else(|| from_config("color", &defaults.color))
        .unwrap_or_default();
}

fn from_config<T: ValueEnum>(key: &str, raw: &str) -> Option<T> {
    T::from_str(raw, true)
        .inspect_err(|e| warn!(key, value = raw, error = %e, "ignoring [defaults] value"))
        .ok()
}

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    config
        .active_profile_name(global.profile.as_deref())
        .to_owned()
}

/// Comma-separated profile names for error help text.
pub fn available_profiles(config: &Config) -> String {
    if config.profiles.is_empty() {
        "(none)".into()
    } else {
        config.profiles.keys().cloned().collect::<Vec<_>>().join(", ")
    }
}

/// Translate config file + global flags into a `CatalogConfig`.
///
/// This is the single boundary where CLI config types cross into core.
pub fn resolve_catalog_config(
    global: &GlobalOpts,
    config: &Config,
) -> Result<CatalogConfig, CliError> {
    let profile_name = active_profile_name(global, config);

    let mut profile = match (config.profiles.get(&profile_name), &global.api_url) {
        (Some(profile), _) => profile.clone(),
        (None, Some(url)) => Profile::new(url.clone()),
        (None, None) if global.profile.is_some() => {
            return Err(CliError::ProfileNotFound {
                name: profile_name,
                available: available_profiles(config),
            });
        }
        (None, None) => {
            return Err(CliError::NoConfig {
                path: config_path().display().to_string(),
            });
        }
    };

    if let Some(ref url) = global.api_url {
        profile.api_url.clone_from(url);
    }

    let mut catalog = profile_to_catalog_config(&profile, &config.defaults)?;
    if global.insecure {
        catalog.tls = TlsVerification::DangerAcceptInvalid;
    }
    if let Some(secs) = global.timeout {
        catalog.timeout = Duration::from_secs(secs);
    }

    tracing::debug!(profile = %profile_name, url = %catalog.url, "resolved catalog config");
    Ok(catalog)
}
