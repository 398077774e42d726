//! Configuration file support for the BMI tracker.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/bmi-tracker/config.toml`.

use crate::{Error, PersistenceMode, ProgressEvaluator, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name of the measurement store inside the data directory
pub const STORE_FILE_NAME: &str = "bmi_records.json";

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub persistence: PersistenceConfig,

    #[serde(default)]
    pub progress: ProgressConfig,
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

/// Persistence failure handling
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct PersistenceConfig {
    /// Surface load/save failures instead of logging them
    #[serde(default)]
    pub strict: bool,
}

/// Progress evaluation parameters
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct ProgressConfig {
    /// Weight difference (kg) still counted as "no change". 0 means exact.
    #[serde(default)]
    pub weight_tolerance_kg: f64,
}

fn default_data_dir() -> PathBuf {
    let base = dirs::data_local_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."));
    base.join("bmi-tracker")
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
        config.validate()?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
            .unwrap_or_else(|| PathBuf::from("."));
        base.join("bmi-tracker").join("config.toml")
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

    fn validate(&self) -> Result<()> {
        let tolerance = self.progress.weight_tolerance_kg;
        if !tolerance.is_finite() || tolerance < 0.0 {
            return Err(Error::Config(format!(
                "progress.weight_tolerance_kg must be a non-negative number, got {}",
                tolerance
            )));
        }
        Ok(())
    }

    /// Path of the measurement store file inside `data_dir`
    pub fn store_path(data_dir: &Path) -> PathBuf {
        data_dir.join(STORE_FILE_NAME)
    }

    pub fn persistence_mode(&self) -> PersistenceMode {
        if self.persistence.strict {
            PersistenceMode::Strict
        } else {
            PersistenceMode::Lenient
        }
    }

    pub fn evaluator(&self) -> ProgressEvaluator {
        ProgressEvaluator::with_tolerance(self.progress.weight_tolerance_kg)
    }
}
