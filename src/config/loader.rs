//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the engine
//! configuration from YAML files.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{HistorySettings, RateConfig, SettingsConfig, TopUpConfig};

/// Loads and provides access to the engine configuration.
///
/// # Directory Structure
///
/// ```text
/// config/driverpay/
/// ├── settings.yaml        # Deployment metadata and history settings
/// └── rates/
///     └── 2024-01-01.yaml  # Hourly rate effective from this date
/// ```
///
/// # Example
///
/// ```no_run
/// use topup_engine::config::ConfigLoader;
/// use chrono::NaiveDate;
///
/// let loader = ConfigLoader::load("./config/driverpay")?;
/// let date = NaiveDate::from_ymd_opt(2025, 8, 1).unwrap();
/// println!("Hourly rate: ${}", loader.get_hourly_rate(date)?);
/// # Ok::<(), topup_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: TopUpConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if `settings.yaml` or the `rates` directory is
    /// missing, if any file contains invalid YAML, or if no rate files exist.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let settings = Self::load_yaml::<SettingsConfig>(&path.join("settings.yaml"))?;
        let rates = Self::load_rates(&path.join("rates"))?;

        tracing::debug!(
            path = %path.display(),
            rate_count = rates.len(),
            "Loaded top-up configuration"
        );

        Ok(Self {
            config: TopUpConfig::new(settings.app, rates, settings.history),
        })
    }

    /// Wraps an already-built configuration.
    pub fn from_config(config: TopUpConfig) -> Self {
        Self { config }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Loads all rate files from the rates directory.
    fn load_rates(rates_dir: &Path) -> EngineResult<Vec<RateConfig>> {
        let rates_dir_str = rates_dir.display().to_string();

        let entries = fs::read_dir(rates_dir).map_err(|_| EngineError::ConfigNotFound {
            path: rates_dir_str.clone(),
        })?;

        let mut rates = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: rates_dir_str.clone(),
            })?;

            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                rates.push(Self::load_yaml::<RateConfig>(&path)?);
            }
        }

        if rates.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no rate files found)", rates_dir_str),
            });
        }

        Ok(rates)
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &TopUpConfig {
        &self.config
    }

    /// Returns the history persistence settings.
    pub fn history(&self) -> &HistorySettings {
        self.config.history()
    }

    /// Gets the hourly rate in force on a given date.
    ///
    /// Finds the most recent rate that is effective on or before the date.
    pub fn get_hourly_rate(&self, date: NaiveDate) -> EngineResult<Decimal> {
        self.config
            .rates()
            .iter()
            .rfind(|rc| rc.effective_date <= date)
            .map(|rc| rc.hourly_rate)
            .ok_or(EngineError::RateNotFound { date })
    }
}
