//! Sort keys and ordering for saved calculations.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::models::CalculationHistoryItem;

/// A field saved calculations can be sorted by.
///
/// Names parse from and display as the persisted camelCase field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    /// Storage-assigned id.
    Id,
    /// Shift date.
    Date,
    /// Driver name (case-insensitive).
    DriverName,
    /// Driver call sign (case-insensitive).
    DriverCallSign,
    /// Vehicle number (case-insensitive).
    VehicleNumber,
    /// Start time text (case-insensitive).
    ShiftStartTime,
    /// Finish time text (case-insensitive).
    ShiftEndTime,
    /// Shift hours.
    ShiftDuration,
    /// Total fares.
    TotalFare,
    /// Top-up amount.
    TopUpAmount,
    /// Hourly rate used.
    HourlyRate,
    /// Save time.
    #[default]
    CreatedAt,
}

impl SortKey {
    /// All sort keys, in persisted field order.
    pub const ALL: [SortKey; 12] = [
        SortKey::Id,
        SortKey::Date,
        SortKey::DriverName,
        SortKey::DriverCallSign,
        SortKey::VehicleNumber,
        SortKey::ShiftStartTime,
        SortKey::ShiftEndTime,
        SortKey::ShiftDuration,
        SortKey::TotalFare,
        SortKey::TopUpAmount,
        SortKey::HourlyRate,
        SortKey::CreatedAt,
    ];

    /// Returns the persisted field name.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Id => "id",
            SortKey::Date => "date",
            SortKey::DriverName => "driverName",
            SortKey::DriverCallSign => "driverCallSign",
            SortKey::VehicleNumber => "vehicleNumber",
            SortKey::ShiftStartTime => "shiftStartTime",
            SortKey::ShiftEndTime => "shiftEndTime",
            SortKey::ShiftDuration => "shiftDuration",
            SortKey::TotalFare => "totalFare",
            SortKey::TopUpAmount => "topUpAmount",
            SortKey::HourlyRate => "hourlyRate",
            SortKey::CreatedAt => "createdAt",
        }
    }

    /// Compares two items by this field in ascending order.
    pub fn compare(&self, a: &CalculationHistoryItem, b: &CalculationHistoryItem) -> Ordering {
        let (ra, rb) = (&a.record, &b.record);
        match self {
            SortKey::Id => caseless(&a.id.to_string(), &b.id.to_string()),
            SortKey::Date => ra.date.cmp(&rb.date),
            SortKey::DriverName => caseless(&ra.driver_name, &rb.driver_name),
            SortKey::DriverCallSign => caseless(&ra.driver_call_sign, &rb.driver_call_sign),
            SortKey::VehicleNumber => caseless(&ra.vehicle_number, &rb.vehicle_number),
            SortKey::ShiftStartTime => caseless(&ra.shift_start_time, &rb.shift_start_time),
            SortKey::ShiftEndTime => caseless(&ra.shift_end_time, &rb.shift_end_time),
            SortKey::ShiftDuration => ra.shift_duration.cmp(&rb.shift_duration),
            SortKey::TotalFare => ra.total_fare.cmp(&rb.total_fare),
            SortKey::TopUpAmount => ra.top_up_amount.cmp(&rb.top_up_amount),
            SortKey::HourlyRate => ra.hourly_rate.cmp(&rb.hourly_rate),
            SortKey::CreatedAt => a.created_at.cmp(&b.created_at),
        }
    }
}

fn caseless(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| EngineError::InvalidSortKey { key: s.to_string() })
    }
}

/// Ascending or descending order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Smallest first.
    Asc,
    /// Largest first.
    #[default]
    Desc,
}

impl SortDirection {
    /// Applies this direction to an ascending ordering.
    pub fn apply(&self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

impl FromStr for SortDirection {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            _ => Err(EngineError::InvalidSortDirection {
                direction: s.to_string(),
            }),
        }
    }
}

/// Sorts items in place. Items that compare equal keep their relative order.
pub fn sort_items(items: &mut [CalculationHistoryItem], key: SortKey, direction: SortDirection) {
    items.sort_by(|a, b| direction.apply(key.compare(a, b)));
}
