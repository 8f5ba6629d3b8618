//! Configuration loading and management for the Top-up Engine.
//!
//! This module loads the hourly rate schedule and history persistence
//! settings from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use topup_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/driverpay").unwrap();
//! println!("Loaded settings for: {}", config.config().app().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    AppMetadata, DEFAULT_STORAGE_KEY, HistorySettings, RateConfig, SettingsConfig, TopUpConfig,
    default_hourly_rate,
};
