//! Configuration file support for the cycle tracker.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/cycle/config.toml`.

use crate::projector::MAX_CYCLES_TO_GENERATE;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub cycle: CycleConfig,

    #[serde(default)]
    pub bounds: SettingsBounds,
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

/// Defaults used when setting up a cycle and projecting it
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CycleConfig {
    #[serde(default = "default_cycle_length")]
    pub default_cycle_length: u32,

    #[serde(default = "default_period_length")]
    pub default_period_length: u32,

    /// How many cycles ahead the projection covers
    #[serde(default = "default_cycles_to_generate")]
    pub cycles_to_generate: u32,
}

impl Default for CycleConfig {
    fn default() -> Self {
        Self {
            default_cycle_length: default_cycle_length(),
            default_period_length: default_period_length(),
            cycles_to_generate: default_cycles_to_generate(),
        }
    }
}

/// Accepted ranges for user-entered cycle settings
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SettingsBounds {
    #[serde(default = "default_min_cycle_length")]
    pub min_cycle_length: u32,

    #[serde(default = "default_max_cycle_length")]
    pub max_cycle_length: u32,

    #[serde(default = "default_min_period_length")]
    pub min_period_length: u32,

    #[serde(default = "default_max_period_length")]
    pub max_period_length: u32,
}

impl Default for SettingsBounds {
    fn default() -> Self {
        Self {
            min_cycle_length: default_min_cycle_length(),
            max_cycle_length: default_max_cycle_length(),
            min_period_length: default_min_period_length(),
            max_period_length: default_max_period_length(),
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
    base.join("cycle")
}

fn default_cycle_length() -> u32 {
    28
}

fn default_period_length() -> u32 {
    5
}

fn default_cycles_to_generate() -> u32 {
    crate::projector::DEFAULT_CYCLES_TO_GENERATE
}

fn default_min_cycle_length() -> u32 {
    21
}

fn default_max_cycle_length() -> u32 {
    35
}

fn default_min_period_length() -> u32 {
    2
}

fn default_max_period_length() -> u32 {
    10
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
        config.check()?;
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
        base.join("cycle").join("config.toml")
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

    /// Reject configurations that cannot produce a projection
    fn check(&self) -> Result<()> {
        let b = &self.bounds;
        if b.min_cycle_length > b.max_cycle_length {
            return Err(Error::Config(format!(
                "min_cycle_length {} > max_cycle_length {}",
                b.min_cycle_length, b.max_cycle_length
            )));
        }
        if b.min_period_length > b.max_period_length {
            return Err(Error::Config(format!(
                "min_period_length {} > max_period_length {}",
                b.min_period_length, b.max_period_length
            )));
        }
        let cycles = self.cycle.cycles_to_generate;
        if cycles == 0 || cycles > MAX_CYCLES_TO_GENERATE {
            return Err(Error::Config(format!(
                "cycles_to_generate {} outside 1..={}",
                cycles, MAX_CYCLES_TO_GENERATE
            )));
        }
        Ok(())
    }
}
