use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ReleaseError, Result};

/// Runtime configuration for the release workflow.
///
/// Paths are explicit so the runner never depends on the process working
/// directory beyond the initial repository discovery.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    /// Where repository discovery starts (walks upward like git does).
    #[serde(default = "default_repository_root")]
    pub repository_root: PathBuf,

    /// Directory holding one `<version>.txt` message file per release.
    /// Resolved against `repository_root` when relative.
    #[serde(default = "default_message_dir")]
    pub message_dir: PathBuf,

    /// Remote pushed to when none is given on the command line.
    #[serde(default = "default_remote")]
    pub remote: String,

    /// Branch pushed when none is given on the command line.
    #[serde(default = "default_branch")]
    pub branch: String,
}

fn default_repository_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_message_dir() -> PathBuf {
    PathBuf::from("messages")
}

fn default_remote() -> String {
    "origin".to_string()
}

fn default_branch() -> String {
    "main".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            repository_root: default_repository_root(),
            message_dir: default_message_dir(),
            remote: default_remote(),
            branch: default_branch(),
        }
    }
}

impl Config {
    /// Message directory resolved against the repository root when relative.
    pub fn resolved_message_dir(&self) -> PathBuf {
        if self.message_dir.is_absolute() {
            self.message_dir.clone()
        } else {
            self.repository_root.join(&self.message_dir)
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `gitrelease.toml` in current directory
/// 3. `gitrelease.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new("./gitrelease.toml").exists() {
        fs::read_to_string("./gitrelease.toml")?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join("gitrelease.toml");
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    toml::from_str(&config_str).map_err(|e| ReleaseError::Config(e.to_string()))
}
