//! Configuration management for recipebox.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::recipe::{DEFAULT_PREP_FACTOR, DEFAULT_SOURCE};
use crate::storage::DataFile;

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default data directory name.
const DATA_DIR_NAME: &str = "recipebox";

/// Default data file name.
const DATA_FILE_NAME: &str = "recipe_data.json";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `RECIPEBOX_`, `__` between levels)
/// 2. TOML config file at `~/.config/recipebox/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Storage configuration.
    pub storage: StorageConfig,
    /// Recipe configuration.
    pub recipes: RecipesConfig,
    /// First-run seed configuration.
    pub seed: SeedConfig,
}

/// Storage-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the data file.
    /// Defaults to `~/.local/share/recipebox/recipe_data.json`
    pub data_path: Option<PathBuf>,
    /// Write to a temporary file and rename it over the data file.
    pub atomic_writes: bool,
}

/// Recipe-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecipesConfig {
    /// Fraction of cooking time estimated for preparation.
    pub prep_factor: f64,
    /// Source label for homemade recipes added without one.
    pub default_source: String,
    /// Cooking times above this many minutes are flagged as long.
    pub long_cook_minutes: u32,
}

/// Seeding of default data on first run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    /// Populate sample recipes and shopping items when no data was loaded.
    pub enabled: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_path: None, // Will be resolved to default at runtime
            atomic_writes: true,
        }
    }
}

impl Default for RecipesConfig {
    fn default() -> Self {
        Self {
            prep_factor: DEFAULT_PREP_FACTOR,
            default_source: DEFAULT_SOURCE.to_string(),
            long_cook_minutes: 60,
        }
    }
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed("RECIPEBOX_").split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(DATA_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Get the default data directory path.
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from(".local/share"))
            .join(DATA_DIR_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        let factor = self.recipes.prep_factor;
        if !factor.is_finite() || !(0.0..=1.0).contains(&factor) {
            return Err(Error::ConfigValidation {
                message: format!("prep_factor must be between 0 and 1, got {factor}"),
            });
        }

        if self.recipes.default_source.trim().is_empty() {
            return Err(Error::ConfigValidation {
                message: "default_source must not be empty".to_string(),
            });
        }

        Ok(())
    }

    /// Get the data file path, resolving defaults if not set.
    #[must_use]
    pub fn data_path(&self) -> PathBuf {
        self.storage
            .data_path
            .clone()
            .unwrap_or_else(|| Self::default_data_dir().join(DATA_FILE_NAME))
    }

    /// The data file described by this configuration.
    #[must_use]
    pub fn data_file(&self) -> DataFile {
        DataFile::new(self.data_path())
            .with_default_source(self.recipes.default_source.clone())
            .with_atomic_writes(self.storage.atomic_writes)
    }
}
