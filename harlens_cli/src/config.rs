//! CLI configuration management

use anyhow::{Context, Result};
use harlens_common::classifier::{DEFAULT_BATCH_METHOD, DEFAULT_BATCH_PATH_SUFFIX};
use harlens_common::PathClassifier;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Get the configuration directory path
pub fn config_dir() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("harlens")
    }

    #[cfg(not(target_os = "windows"))]
    {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".harlens")
    }
}

/// Get the default config file path
pub fn config_file() -> PathBuf {
    config_dir().join("config.yml")
}

/// Get the logs directory
pub fn logs_dir() -> PathBuf {
    config_dir().join("logs")
}

/// Ensure all config directories exist
pub fn ensure_dirs() -> Result<()> {
    let config = config_dir();
    let logs = logs_dir();

    fs::create_dir_all(&config).context("Failed to create config directory")?;
    fs::create_dir_all(&logs).context("Failed to create logs directory")?;

    Ok(())
}

/// Main configuration file structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// How batch calls are recognized
    #[serde(default)]
    pub batch: BatchConfig,

    /// Inspector server settings
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchConfig {
    /// HTTP methods used by batch calls (default: POST)
    #[serde(default = "default_batch_methods")]
    pub methods: Vec<String>,

    /// URL path suffixes of batch endpoints (default: /batch)
    #[serde(default = "default_path_suffixes")]
    pub path_suffixes: Vec<String>,
}

fn default_batch_methods() -> Vec<String> {
    vec![DEFAULT_BATCH_METHOD.to_string()]
}

fn default_path_suffixes() -> Vec<String> {
    vec![DEFAULT_BATCH_PATH_SUFFIX.to_string()]
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            methods: default_batch_methods(),
            path_suffixes: default_path_suffixes(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Preferred inspector port (default: 4041)
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_port() -> u16 {
    4041
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
        }
    }
}

impl Config {
    /// Load config from `path`, or from the default location
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from(path),
            None => {
                let path = config_file();
                if !path.exists() {
                    return Ok(Self::default());
                }
                Self::load_from(&path)
            }
        }
    }

    /// Load config from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Config = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        if config.batch.path_suffixes.is_empty() {
            tracing::warn!("No batch path suffixes configured; batch calls will not be expanded");
        }

        Ok(config)
    }

    /// Save config to a file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }
        let content = self.to_yaml()?;
        fs::write(path, content).context("Failed to write config file")?;
        Ok(())
    }

    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize config")
    }

    /// Batch classifier described by this config
    pub fn classifier(&self) -> PathClassifier {
        PathClassifier::new(
            self.batch.methods.iter().cloned(),
            self.batch.path_suffixes.iter().cloned(),
        )
    }
}
