//! Local credentials store.
//!
//! The desktop app keeps its API credentials in a small JSON file in the
//! user's home directory. Loading is deliberately tolerant: a missing or
//! unreadable file yields defaults with a warning, because first launch
//! happens before any settings exist. Saving is fallible and reported.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::cloudbeds::Credentials;

/// Environment override for the config file location.
pub const CONFIG_PATH_ENV: &str = "ALLOTMENT_REPORT_CONFIG";

const CONFIG_FILE_NAME: &str = ".allotment_report_config.json";
const DEFAULT_PROPERTY_ID: &str = "6000";

/// Persisted application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_property_id")]
    pub property_id: String,
}

fn default_property_id() -> String {
    DEFAULT_PROPERTY_ID.to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            property_id: default_property_id(),
        }
    }
}

impl AppConfig {
    /// Whether a non-blank API key has been configured.
    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    pub fn credentials(&self) -> Credentials {
        Credentials {
            api_key: self.api_key.clone(),
            property_id: self.property_id.clone(),
        }
    }
}

/// Handle to the on-disk config file.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    /// Resolve the config path: `$ALLOTMENT_REPORT_CONFIG` if set, else the
    /// dotfile in `$HOME`, else the current directory.
    pub fn from_env() -> Self {
        let path = std::env::var_os(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(CONFIG_FILE_NAME)))
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME));
        Self { path }
    }

    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the config, falling back to defaults when the file is missing or
    /// unreadable. Never fails: a corrupt settings file must not brick the
    /// app, the user can re-enter credentials through the settings page.
    pub fn load(&self) -> AppConfig {
        if !self.path.exists() {
            return AppConfig::default();
        }
        match fs::read_to_string(&self.path)
            .map_err(anyhow::Error::from)
            .and_then(|text| serde_json::from_str(&text).map_err(anyhow::Error::from))
        {
            Ok(config) => config,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "could not load configuration, using defaults");
                AppConfig::default()
            }
        }
    }

    /// Persist the config as pretty-printed JSON.
    pub fn save(&self, config: &AppConfig) -> Result<()> {
        let text = serde_json::to_string_pretty(config).context("Failed to serialize configuration")?;
        fs::write(&self.path, text)
            .with_context(|| format!("Failed to write configuration to {}", self.path.display()))
    }
}
