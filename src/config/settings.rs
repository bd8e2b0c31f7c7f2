//! Runtime settings for the `fragment-runtime` binary.
//!
//! Read from an optional TOML file. Every field has a default so an empty
//! file (or no file) is a valid configuration.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for settings loading.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid base URL '{url}': {source}")]
    BaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

/// Root settings.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RuntimeSettings {
    /// Logging settings.
    pub observability: ObservabilitySettings,

    /// Resource loader settings.
    pub loader: LoaderSettings,

    /// Conditional fragment settings.
    pub conditions: ConditionSettings,
}

/// Logging settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilitySettings {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub log_filter: String,

    /// Emit JSON log lines instead of the human-readable format.
    pub json_logs: bool,
}

impl Default for ObservabilitySettings {
    fn default() -> Self {
        Self {
            log_filter: "fragment_runtime=info".to_string(),
            json_logs: false,
        }
    }
}

/// Resource loader settings.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct LoaderSettings {
    /// Base URL relative asset links are resolved against.
    pub base_url: Option<String>,
}

impl LoaderSettings {
    /// Parsed base URL, if configured.
    pub fn base_url(&self) -> Result<Option<url::Url>, SettingsError> {
        self.base_url
            .as_deref()
            .map(|raw| {
                url::Url::parse(raw).map_err(|source| SettingsError::BaseUrl {
                    url: raw.to_string(),
                    source,
                })
            })
            .transpose()
    }
}

/// Conditional fragment settings.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ConditionSettings {
    /// Condition expressions that evaluate true.
    pub flags: Vec<String>,
}

/// Load and validate settings from a TOML file.
pub fn load_settings(path: &Path) -> Result<RuntimeSettings, SettingsError> {
    let content = fs::read_to_string(path)?;
    let settings: RuntimeSettings = toml::from_str(&content)?;

    settings.loader.base_url()?;

    Ok(settings)
}
