//! Home directory resolution and the optional TOML configuration file.

use crate::catalog::DEFAULT_DB_NAME;
use crate::naming::{LabelEntry, Vocabulary, ZoneRule};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const CONFIG_FILE_NAME: &str = "config.toml";
pub const HOME_ENV: &str = "IMGINDEX_HOME";

/// Resolve the imgindex home directory.
///
/// Priority:
/// 1) IMGINDEX_HOME
/// 2) home directory
/// 3) ./.imgindex
pub fn imgindex_home() -> PathBuf {
    if let Ok(override_path) = std::env::var(HOME_ENV) {
        return PathBuf::from(override_path);
    }
    if let Some(home) = dirs::home_dir() {
        return home.join(".imgindex");
    }
    PathBuf::from(".").join(".imgindex")
}

/// Default logs directory: ~/.imgindex/logs
pub fn logs_dir() -> PathBuf {
    imgindex_home().join("logs")
}

/// Default config file: ~/.imgindex/config.toml
pub fn default_config_path() -> PathBuf {
    imgindex_home().join(CONFIG_FILE_NAME)
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Prefix for item URLs in the JSON database
    #[serde(default)]
    pub base_url: Option<String>,

    #[serde(default = "default_db_name")]
    pub db_name: String,

    /// Abort a pass on the first semantic failure
    #[serde(default)]
    pub strict: bool,

    /// Extra or relabelled zones
    #[serde(default)]
    pub zones: Vec<LabelEntry>,

    #[serde(default)]
    pub categories: Vec<LabelEntry>,

    /// Appended to the built-in per-zone rules
    #[serde(default)]
    pub zone_rules: Vec<ZoneRule>,
}

fn default_db_name() -> String {
    DEFAULT_DB_NAME.to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            db_name: default_db_name(),
            strict: false,
            zones: Vec::new(),
            categories: Vec::new(),
            zone_rules: Vec::new(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file that must exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Load an explicit file, or the default location if it exists.
    ///
    /// Only an explicit path is required to exist.
    pub fn load_or_default(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::load(path),
            None => {
                let path = default_config_path();
                if path.exists() {
                    Self::load(&path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Effective vocabulary: built-in tables extended by this file.
    pub fn vocabulary(&self) -> Vocabulary {
        Vocabulary::extended(&self.zones, &self.categories, &self.zone_rules)
    }
}
