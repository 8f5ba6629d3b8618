//! Configuration types for the top-up engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use std::path::PathBuf;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;

/// The storage key the history collection lives under unless configured otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "driverPay_calculationHistory";

/// Returns the baseline hourly rate used when no configuration is loaded.
///
/// The rate is $70.00 per hour.
pub fn default_hourly_rate() -> Decimal {
    Decimal::new(7000, 2)
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

/// Metadata about the deployment.
#[derive(Debug, Clone, Deserialize)]
pub struct AppMetadata {
    /// Human-readable name of the deployment.
    pub name: String,
    /// Version of the configuration set.
    pub version: String,
}

impl Default for AppMetadata {
    fn default() -> Self {
        Self {
            name: "DriverPay".to_string(),
            version: "default".to_string(),
        }
    }
}

/// Where and under which key calculation history is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HistorySettings {
    /// The single storage key holding the serialized history array.
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
    /// Directory used by the file-backed store.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self {
            storage_key: default_storage_key(),
            data_dir: default_data_dir(),
        }
    }
}

/// settings.yaml file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct SettingsConfig {
    /// Deployment metadata.
    pub app: AppMetadata,
    /// History persistence settings.
    #[serde(default)]
    pub history: HistorySettings,
}

/// An hourly rate effective from a given date.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RateConfig {
    /// The first date this rate applies to.
    pub effective_date: NaiveDate,
    /// Guaranteed earnings per hour of shift.
    pub hourly_rate: Decimal,
}

/// The complete configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct TopUpConfig {
    metadata: AppMetadata,
    /// Rates sorted oldest first.
    rates: Vec<RateConfig>,
    history: HistorySettings,
}

impl TopUpConfig {
    /// Creates a new TopUpConfig from its component parts.
    pub fn new(metadata: AppMetadata, rates: Vec<RateConfig>, history: HistorySettings) -> Self {
        let mut sorted_rates = rates;
        sorted_rates.sort_by(|a, b| a.effective_date.cmp(&b.effective_date));
        Self {
            metadata,
            rates: sorted_rates,
            history,
        }
    }

    /// Returns the deployment metadata.
    pub fn app(&self) -> &AppMetadata {
        &self.metadata
    }

    /// Returns all rate configurations, oldest first.
    pub fn rates(&self) -> &[RateConfig] {
        &self.rates
    }

    /// Returns the history persistence settings.
    pub fn history(&self) -> &HistorySettings {
        &self.history
    }
}

impl Default for TopUpConfig {
    /// A single $70.00 rate effective since the earliest representable date.
    fn default() -> Self {
        Self::new(
            AppMetadata::default(),
            vec![RateConfig {
                effective_date: NaiveDate::MIN,
                hourly_rate: default_hourly_rate(),
            }],
            HistorySettings::default(),
        )
    }
}
