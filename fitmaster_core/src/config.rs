//! Configuration file support for FitMaster.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/fitmaster/config.toml`.

use crate::selection::{clamp_count, DEFAULT_EXERCISES_PER_GROUP};
use crate::timer::{validate_duration, DEFAULT_REST_SECONDS};
use crate::{Error, Result, UserId};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub user: UserConfig,

    #[serde(default)]
    pub timer: TimerConfig,

    #[serde(default)]
    pub generator: GeneratorConfig,
}

/// Data storage configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// Signed-in user
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct UserConfig {
    #[serde(default)]
    pub id: Option<String>,
}

/// Rest timer configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TimerConfig {
    #[serde(default = "default_rest_seconds")]
    pub rest_seconds: u32,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            rest_seconds: default_rest_seconds(),
        }
    }
}

/// Workout generator configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GeneratorConfig {
    #[serde(default = "default_exercise_count")]
    pub default_exercise_count: u32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            default_exercise_count: default_exercise_count(),
        }
    }
}

// Default value functions
fn default_data_dir() -> PathBuf {
    let base = dirs::data_local_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."));
    base.join("fitmaster")
}

fn default_rest_seconds() -> u32 {
    DEFAULT_REST_SECONDS
}

fn default_exercise_count() -> u32 {
    DEFAULT_EXERCISES_PER_GROUP
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!(
                "No config file found at {:?}, using defaults",
                config_path
            );
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&contents)?;
        config.validate()?;
        config.generator.default_exercise_count =
            clamp_count(config.generator.default_exercise_count);
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
            .unwrap_or_else(|| PathBuf::from("."));
        base.join("fitmaster").join("config.toml")
    }

    /// Check values that serde cannot
    pub fn validate(&self) -> Result<()> {
        validate_duration(self.timer.rest_seconds)
            .map_err(|e| Error::Config(format!("[timer] rest_seconds: {}", e)))
    }

    /// The configured user, if any
    pub fn user_id(&self) -> Option<UserId> {
        self.user.id.as_ref().map(UserId::new)
    }

    /// Save the current configuration to the default path
    pub fn save(&self) -> Result<()> {
        let config_path = Self::default_config_path();
        self.save_to(&config_path)
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }
}
