//! Error types for the Top-up Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while loading configuration,
//! assembling a calculation, or talking to the storage substrate.
//!
//! Parse problems in user input (an empty time field, a fare of `"abc"`) are
//! deliberately *not* represented here: they are recovered with safe defaults
//! by the calculation functions.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the Top-up Engine.
///
/// # Example
///
/// ```
/// use topup_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/settings.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/settings.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// No hourly rate is effective on the given date.
    #[error("No hourly rate effective on {date}")]
    RateNotFound {
        /// The date for which the rate was requested.
        date: NaiveDate,
    },

    /// A shift was submitted with blank required fields.
    #[error("Shift is missing required fields: {fields}")]
    MissingShiftFields {
        /// Comma-separated names of the blank fields.
        fields: String,
    },

    /// A calculation record was requested before the session had enough data.
    #[error("Cannot build calculation: {reason}")]
    IncompleteCalculation {
        /// Why the calculation cannot be built yet.
        reason: String,
    },

    /// The storage substrate failed to read a key.
    #[error("Failed to read storage key '{key}': {message}")]
    StorageRead {
        /// The storage key.
        key: String,
        /// A description of the failure.
        message: String,
    },

    /// The storage substrate failed to write or delete a key.
    #[error("Failed to write storage key '{key}': {message}")]
    StorageWrite {
        /// The storage key.
        key: String,
        /// A description of the failure.
        message: String,
    },

    /// Writing the value would exceed the storage quota.
    #[error("Storage quota of {limit} bytes exceeded while writing '{key}'")]
    QuotaExceeded {
        /// The storage key.
        key: String,
        /// The configured quota in bytes.
        limit: usize,
    },

    /// A value could not be serialized or deserialized.
    #[error("Serialization error: {message}")]
    Serialization {
        /// A description of the serialization failure.
        message: String,
    },

    /// A storage key contains characters the backend cannot store.
    #[error("Invalid storage key: {key}")]
    InvalidStorageKey {
        /// The rejected key.
        key: String,
    },

    /// A history sort field name was not recognised.
    #[error("Unknown sort key: {key}")]
    InvalidSortKey {
        /// The rejected field name.
        key: String,
    },

    /// A history sort direction was not recognised.
    #[error("Unknown sort direction: {direction}")]
    InvalidSortDirection {
        /// The rejected direction.
        direction: String,
    },
}

impl From<serde_json::Error> for EngineError {
    fn from(err: serde_json::Error) -> Self {
        EngineError::Serialization {
            message: err.to_string(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
