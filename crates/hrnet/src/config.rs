//! Configuration management for hrnet.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::collections::HashSet;
use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::form::FormOptions;
use crate::table::PageSize;
use crate::widgets::select::{normalize, OptionInput, SelectOption};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default data directory name.
const DATA_DIR_NAME: &str = "hrnet";

/// Default database file name.
const DATABASE_FILE_NAME: &str = "hrnet.db";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `HRNET_`, sections separated by
///    `__`, e.g. `HRNET_TABLE__PAGE_SIZE`)
/// 2. TOML config file at `~/.config/hrnet/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Storage configuration.
    pub storage: StorageConfig,
    /// Employee table configuration.
    pub table: TableConfig,
    /// Option list overrides.
    pub options: OptionsConfig,
}

/// Storage-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the database file.
    /// Defaults to `~/.local/share/hrnet/hrnet.db`
    pub database_path: Option<PathBuf>,
    /// Key the employee records are stored under.
    pub key: String,
}

/// Employee table configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Rows per page: 10, 25, 50 or 100.
    pub page_size: usize,
}

/// Replacement option lists for the select fields.
///
/// Each entry is a plain string or a `{ label, value }` table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptionsConfig {
    /// States; the built-in US list when unset.
    pub states: Option<Vec<OptionInput>>,
    /// Departments; the built-in list when unset.
    pub departments: Option<Vec<OptionInput>>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: None, // Resolved at runtime
            key: crate::store::DEFAULT_KEY.to_string(),
        }
    }
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            page_size: PageSize::default().rows(),
        }
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
            .merge(Env::prefixed("HRNET_").split("__"));

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
        if self.storage.key.trim().is_empty() {
            return Err(Error::config("storage.key must not be empty"));
        }

        if PageSize::try_from(self.table.page_size).is_err() {
            return Err(Error::config(format!(
                "table.page_size must be one of 10, 25, 50, 100 (got {})",
                self.table.page_size
            )));
        }

        validate_options("options.states", self.options.states.as_deref())?;
        validate_options("options.departments", self.options.departments.as_deref())?;

        Ok(())
    }

    /// Get the database path, resolving defaults if not set.
    #[must_use]
    pub fn database_path(&self) -> PathBuf {
        self.storage
            .database_path
            .clone()
            .unwrap_or_else(|| Self::default_data_dir().join(DATABASE_FILE_NAME))
    }

    /// Configured page size, falling back to the default if invalid.
    #[must_use]
    pub fn page_size(&self) -> PageSize {
        PageSize::try_from(self.table.page_size).unwrap_or_default()
    }

    /// State options, configured or built in.
    #[must_use]
    pub fn state_options(&self) -> Vec<SelectOption> {
        self.options
            .states
            .clone()
            .map_or_else(crate::data::state_options, normalize)
    }

    /// Department options, configured or built in.
    #[must_use]
    pub fn department_options(&self) -> Vec<SelectOption> {
        self.options
            .departments
            .clone()
            .map_or_else(crate::data::department_options, normalize)
    }

    /// Option lists for the employee form.
    #[must_use]
    pub fn form_options(&self) -> FormOptions {
        FormOptions {
            states: self.state_options(),
            departments: self.department_options(),
        }
    }
}

fn validate_options(name: &str, inputs: Option<&[OptionInput]>) -> Result<()> {
    let Some(inputs) = inputs else {
        return Ok(());
    };
    if inputs.is_empty() {
        return Err(Error::config(format!("{name} must not be empty")));
    }

    let mut seen = HashSet::new();
    for option in normalize(inputs.iter().cloned()) {
        if option.label.trim().is_empty() {
            return Err(Error::config(format!("{name} contains an empty label")));
        }
        if !seen.insert(option.value.clone()) {
            return Err(Error::config(format!(
                "{name} contains duplicate value '{}'",
                option.value
            )));
        }
    }
    Ok(())
}
