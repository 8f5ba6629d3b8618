//! Shift model and related types.
//!
//! This module defines the [`ShiftInput`] captured before bookings are
//! entered, and the [`ShiftDuration`] derived from its clock times.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// The shift details entered before bookings.
///
/// Times are wall-clock `HH:MM` strings as produced by a time input. A
/// finish time earlier than the start time means the shift ran past
/// midnight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftInput {
    /// The calendar date the shift started on.
    pub date: NaiveDate,
    /// Start time, `HH:MM`.
    pub time_started: String,
    /// Finish time, `HH:MM`.
    pub time_finished: String,
    /// The driver's dispatch call sign.
    pub driver_call_sign: String,
    /// The driver's name.
    pub driver_name: String,
    /// The vehicle's fleet number.
    pub vehicle_number: String,
}

impl ShiftInput {
    /// Returns the names of required fields that are blank.
    ///
    /// # Examples
    ///
    /// ```
    /// use topup_engine::models::ShiftInput;
    /// use chrono::NaiveDate;
    ///
    /// let shift = ShiftInput {
    ///     date: NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
    ///     time_started: "09:00".to_string(),
    ///     time_finished: "17:00".to_string(),
    ///     driver_call_sign: "".to_string(),
    ///     driver_name: "Sam Okafor".to_string(),
    ///     vehicle_number: " ".to_string(),
    /// };
    /// assert_eq!(shift.missing_fields(), vec!["driverCallSign", "vehicleNumber"]);
    /// ```
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("timeStarted", &self.time_started),
            ("timeFinished", &self.time_finished),
            ("driverCallSign", &self.driver_call_sign),
            ("driverName", &self.driver_name),
            ("vehicleNumber", &self.vehicle_number),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }

    /// Returns true if every required field is filled in.
    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }

    /// Checks that every required field is filled in.
    pub fn validate(&self) -> EngineResult<()> {
        let missing = self.missing_fields();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(EngineError::MissingShiftFields {
                fields: missing.join(", "),
            })
        }
    }
}

/// The length of a shift, or the fact that it cannot be known yet.
///
/// `Unknown` is distinct from a zero-length shift: it means a clock time is
/// still missing, and anything derived from it should be shown as a
/// placeholder rather than a figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "status", content = "hours", rename_all = "snake_case")]
pub enum ShiftDuration {
    /// The shift lasted this many hours (rounded to 2 dp, never negative).
    Known(Decimal),
    /// At least one clock time is missing or unreadable.
    #[default]
    Unknown,
}

impl ShiftDuration {
    /// Returns the hours if known.
    pub fn hours(&self) -> Option<Decimal> {
        match self {
            ShiftDuration::Known(hours) => Some(*hours),
            ShiftDuration::Unknown => None,
        }
    }

    /// Returns true if the duration is known.
    pub fn is_known(&self) -> bool {
        matches!(self, ShiftDuration::Known(_))
    }

    /// Returns the hours, or zero when unknown.
    ///
    /// Only for arithmetic defaults; never for display.
    pub fn hours_or_zero(&self) -> Decimal {
        self.hours().unwrap_or(Decimal::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_shift() -> ShiftInput {
        ShiftInput {
            date: NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
            time_started: "22:00".to_string(),
            time_finished: "06:00".to_string(),
            driver_call_sign: "K42".to_string(),
            driver_name: "Sam Okafor".to_string(),
            vehicle_number: "V-118".to_string(),
        }
    }

    #[test]
    fn test_complete_shift_validates() {
        let shift = make_shift();
        assert!(shift.is_complete());
        assert!(shift.validate().is_ok());
    }

    #[test]
    fn test_blank_fields_reported_in_form_order() {
        let mut shift = make_shift();
        shift.time_started.clear();
        shift.driver_name = "   ".to_string();

        assert_eq!(shift.missing_fields(), vec!["timeStarted", "driverName"]);
        match shift.validate() {
            Err(EngineError::MissingShiftFields { fields }) => {
                assert_eq!(fields, "timeStarted, driverName")
            }
            other => panic!("Expected MissingShiftFields, got {:?}", other),
        }
    }

    #[test]
    fn test_shift_input_deserializes_from_form_payload() {
        let json = r#"{
            "date": "2025-03-14",
            "timeStarted": "09:00",
            "timeFinished": "17:30",
            "driverCallSign": "K42",
            "driverName": "Sam Okafor",
            "vehicleNumber": "V-118"
        }"#;

        let shift: ShiftInput = serde_json::from_str(json).unwrap();
        assert_eq!(shift.time_finished, "17:30");
        assert_eq!(shift.date, NaiveDate::from_ymd_opt(2025, 3, 14).unwrap());
    }

    #[test]
    fn test_unknown_duration_is_not_zero() {
        let unknown = ShiftDuration::Unknown;
        let zero = ShiftDuration::Known(Decimal::ZERO);

        assert_ne!(unknown, zero);
        assert_eq!(unknown.hours(), None);
        assert_eq!(zero.hours(), Some(Decimal::ZERO));
        assert_eq!(unknown.hours_or_zero(), Decimal::ZERO);
        assert!(!unknown.is_known());
        assert!(zero.is_known());
    }

    #[test]
    fn test_duration_serialization_is_tagged() {
        let json = serde_json::to_value(ShiftDuration::Known(Decimal::new(85, 1))).unwrap();
        assert_eq!(json["status"], "known");

        let json = serde_json::to_value(ShiftDuration::Unknown).unwrap();
        assert_eq!(json["status"], "unknown");
    }
}
