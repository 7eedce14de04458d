//! Service configuration.
//!
//! Loaded from a TOML file layered with `MONEK_ROUTER__`-prefixed
//! environment overrides, then validated before the server starts. Every
//! recognized key is enumerated here; unknown keys are ignored, missing
//! required values fail startup.

use std::{collections::HashMap, path::PathBuf};

use masking::Secret;
use monek_connector::types::CompletionMode;
use serde::Deserialize;

use crate::errors::ApplicationError;

/// Environment variable pointing at an alternate configuration file.
pub const CONFIG_PATH_ENV: &str = "MONEK_ROUTER_CONFIG";

#[derive(Clone, Debug, Deserialize)]
pub struct Settings {
    pub server: Server,
    #[serde(default)]
    pub log: LogSettings,
    pub monek: MonekSettings,
    pub store: StoreSettings,
    #[serde(default)]
    pub codes: CodeOverrides,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Server {
    pub host: String,
    pub port: u16,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct LogSettings {
    #[serde(default)]
    pub console: ConsoleLogSettings,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ConsoleLogSettings {
    pub enabled: bool,
    /// Default filter directive, e.g. `info` or `monek_router=debug`.
    pub level: String,
}

impl Default for ConsoleLogSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            level: "info".to_string(),
        }
    }
}

/// Vendor credentials and integration mode.
#[derive(Clone, Debug, Deserialize)]
pub struct MonekSettings {
    #[serde(default)]
    pub completion_mode: CompletionMode,
    pub api_base_url: String,
    /// Required for the server-completion mode only.
    #[serde(default)]
    pub merchant_id: String,
    /// Publishable key, sent as `X-Api-Key` in embedded mode.
    #[serde(default)]
    pub api_key: Secret<String>,
    pub secret_key: Secret<String>,
    /// Accepted for forward compatibility; webhook deliveries are not
    /// currently verified against it.
    #[serde(default)]
    pub signing_secret: Option<Secret<String>>,
}

/// Store-level facts the vendor payloads carry.
#[derive(Clone, Debug, Deserialize)]
pub struct StoreSettings {
    /// Alpha-2 country the store settles under.
    pub country_code: String,
    pub site_url: String,
    #[serde(default = "default_basket_summary")]
    pub basket_summary: String,
}

fn default_basket_summary() -> String {
    "Goods".to_string()
}

/// Additions to the built-in ISO numeric code tables, taking precedence
/// over them.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct CodeOverrides {
    #[serde(default)]
    pub currency: HashMap<String, String>,
    #[serde(default)]
    pub country: HashMap<String, String>,
}

impl Settings {
    /// Reads configuration from `config/development.toml` (or the file named
    /// by `MONEK_ROUTER_CONFIG`), layered with environment overrides like
    /// `MONEK_ROUTER__SERVER__PORT=8080`.
    pub fn new() -> Result<Self, ApplicationError> {
        Self::with_config_path(None)
    }

    pub fn with_config_path(explicit_path: Option<PathBuf>) -> Result<Self, ApplicationError> {
        let config_path = explicit_path
            .or_else(|| std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from("config/development.toml"));

        let settings = config::Config::builder()
            .add_source(config::File::from(config_path).required(false))
            .add_source(
                config::Environment::with_prefix("MONEK_ROUTER")
                    .try_parsing(true)
                    .separator("__"),
            )
            .build()?
            .try_deserialize::<Self>()?;

        settings.validate()?;
        Ok(settings)
    }
}
