//! CLI-owned configuration: TOML file + `POSTLOOK_*` env overrides,
//! resolved into a `postlook_core::LookupConfig`.
//!
//! Core never sees these types -- it receives a pre-built `LookupConfig`.

use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use url::Url;

use postlook_core::LookupConfig;

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── TOML config struct ───────────────────────────────────────────────

#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Relay endpoint URL.
    pub endpoint: Option<String>,

    /// Action discriminator query parameter.
    #[serde(default = "default_action")]
    pub action: String,

    /// Countries eligible for lookup.
    #[serde(default = "default_countries")]
    pub countries: Vec<String>,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_action() -> String {
    "lookup".into()
}

fn default_countries() -> Vec<String> {
    vec!["NL".into()]
}

fn default_timeout_secs() -> u64 {
    5
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: None,
            action: default_action(),
            countries: default_countries(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Path of the user config file (`…/postlook/config.toml`).
pub fn config_path() -> PathBuf {
    ProjectDirs::from("", "", "postlook")
        .map(|dirs| dirs.config_dir().join("config.toml"))
        .unwrap_or_else(|| PathBuf::from("postlook.toml"))
}

/// Load the config file (if present) merged with env overrides.
pub fn load() -> Result<Config, CliError> {
    Figment::from(Serialized::defaults(Config::default()))
        .merge(Toml::file(config_path()))
        .merge(Env::prefixed("POSTLOOK_"))
        .extract()
        .map_err(|e| CliError::Config {
            message: e.to_string(),
        })
}

/// Resolve file/env config plus CLI flag overrides into a `LookupConfig`.
pub fn resolve(config: &Config, global: &GlobalOpts) -> Result<LookupConfig, CliError> {
    let endpoint = global
        .endpoint
        .as_deref()
        .or(config.endpoint.as_deref())
        .ok_or(CliError::NoEndpoint)?;

    let endpoint: Url = endpoint.parse().map_err(|_| CliError::InvalidEndpoint {
        value: endpoint.to_owned(),
    })?;

    let mut lookup = LookupConfig::new(endpoint);
    lookup.action.clone_from(&config.action);
    lookup.supported_countries.clone_from(&config.countries);
    lookup.timeout = Duration::from_secs(global.timeout.unwrap_or(config.timeout_secs));

    Ok(lookup)
}
