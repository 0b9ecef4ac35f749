use crate::error::{BumpError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Represents the complete configuration for git-bump.
///
/// Carries the rewrite target paths and the remote name, threaded
/// explicitly through the pipeline rather than held as process-wide state.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    /// Settings-like file that receives VERSION / VERSION_REFERENCE fields
    #[serde(default = "default_settings_file")]
    pub settings_file: PathBuf,

    /// Packaging-metadata file whose `version` field is rewritten
    #[serde(default = "default_packaging_file")]
    pub packaging_file: PathBuf,

    /// Remote that receives the branch and tag pushes
    #[serde(default = "default_remote")]
    pub remote: String,
}

fn default_settings_file() -> PathBuf {
    PathBuf::from("backend/settings.py")
}

fn default_packaging_file() -> PathBuf {
    PathBuf::from("configs/pyproject.toml")
}

fn default_remote() -> String {
    "origin".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            settings_file: default_settings_file(),
            packaging_file: default_packaging_file(),
            remote: default_remote(),
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `gitbump.toml` in current directory
/// 3. `.gitbump.toml` in the user config directory
/// 4. Default configuration if no file found
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new("./gitbump.toml").exists() {
        fs::read_to_string("./gitbump.toml")?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(".gitbump.toml");
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    let config: Config = toml::from_str(&config_str)
        .map_err(|e| BumpError::config(format!("Cannot parse configuration: {}", e)))?;
    Ok(config)
}
