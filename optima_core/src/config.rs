//! Configuration file support for Optima.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/optima/config.toml`.

use crate::{Error, Result, Sex, UserProfile};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub profile: ProfileConfig,
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

/// User profile used by the BMR and step formulas
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProfileConfig {
    #[serde(default = "default_age")]
    pub age: u32,

    #[serde(default = "default_sex")]
    pub sex: Sex,

    #[serde(default = "default_height_cm")]
    pub height_cm: f64,

    #[serde(default = "default_weight_kg")]
    pub weight_kg: f64,

    #[serde(default)]
    pub body_fat_pct: Option<f64>,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            age: default_age(),
            sex: default_sex(),
            height_cm: default_height_cm(),
            weight_kg: default_weight_kg(),
            body_fat_pct: None,
        }
    }
}

impl ProfileConfig {
    pub fn to_profile(&self) -> UserProfile {
        UserProfile {
            age: self.age,
            sex: self.sex,
            height_cm: self.height_cm,
            weight_kg: self.weight_kg,
            body_fat_pct: self.body_fat_pct,
        }
    }
}

// Default value functions
fn default_data_dir() -> PathBuf {
    let base = dirs::data_local_dir().unwrap_or_else(|| {
        std::env::var_os("HOME")
            .map(|home| PathBuf::from(home).join(".local/share"))
            .unwrap_or_else(|| PathBuf::from("."))
    });
    base.join("optima")
}

fn default_age() -> u32 {
    25
}

fn default_sex() -> Sex {
    Sex::Male
}

fn default_height_cm() -> f64 {
    170.0
}

fn default_weight_kg() -> f64 {
    70.0
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
        let config: Config = toml::from_str(&contents)?;
        config
            .profile
            .to_profile()
            .validate()
            .map_err(|e| Error::Config(format!("Invalid profile in {:?}: {}", path, e)))?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir().unwrap_or_else(|| {
            std::env::var_os("HOME")
                .map(|home| PathBuf::from(home).join(".config"))
                .unwrap_or_else(|| PathBuf::from("."))
        });
        base.join("optima").join("config.toml")
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
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
