//! Calculation record models.
//!
//! This module contains the flattened [`CalculationRecord`] produced when a
//! shift calculation is saved or exported, the [`CalculationHistoryItem`]
//! snapshot the history store persists, and [`HistoryTotals`] aggregated
//! over a set of saved items.
//!
//! The JSON layout matches the history collection written by earlier
//! releases: camelCase field names. Amounts and hours are written as exact
//! decimal strings; plain JSON numbers written by earlier releases are
//! still read.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::default_hourly_rate;

/// A booking frozen into a saved calculation, with its fare parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryBooking {
    /// The booking's id from the editing session.
    pub id: Uuid,
    /// Free-text booking reference.
    pub booking_id: String,
    /// Parsed fare; unreadable input was stored as zero.
    pub fare_amount: Decimal,
}

/// A completed shift calculation, flattened for saving or export.
///
/// This is everything a report renderer needs; nothing in it requires
/// further computation except [`CalculationRecord::shift_earnings`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationRecord {
    /// The shift date.
    pub date: NaiveDate,
    /// The driver's name.
    pub driver_name: String,
    /// The driver's call sign.
    pub driver_call_sign: String,
    /// The vehicle's fleet number.
    pub vehicle_number: String,
    /// Start time, `HH:MM`.
    pub shift_start_time: String,
    /// Finish time, `HH:MM`.
    pub shift_end_time: String,
    /// Shift length in hours.
    pub shift_duration: Decimal,
    /// The bookings worked during the shift.
    #[serde(default)]
    pub bookings: Vec<HistoryBooking>,
    /// Sum of booking fares.
    pub total_fare: Decimal,
    /// The top-up owed to the driver.
    pub top_up_amount: Decimal,
    /// The hourly rate in force when the calculation was made.
    #[serde(default = "default_hourly_rate")]
    pub hourly_rate: Decimal,
}

impl CalculationRecord {
    /// Returns the guaranteed earnings for the shift (`duration * rate`).
    pub fn shift_earnings(&self) -> Decimal {
        self.shift_duration.saturating_mul(self.hourly_rate)
    }
}

/// A saved calculation as stored in history.
///
/// Immutable once created: the store assigns `id` and `created_at` and
/// nothing rewrites an existing item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationHistoryItem {
    /// Storage-assigned unique id.
    pub id: Uuid,
    /// The calculation itself.
    #[serde(flatten)]
    pub record: CalculationRecord,
    /// When the item was saved.
    pub created_at: DateTime<Utc>,
}

impl CalculationHistoryItem {
    /// Wraps a record with a fresh id and the current time.
    pub fn new(record: CalculationRecord) -> Self {
        Self {
            id: Uuid::new_v4(),
            record,
            created_at: Utc::now(),
        }
    }

    /// Returns true if the driver name, call sign or vehicle number contains
    /// `query`, ignoring case. A blank query matches everything.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }

        [
            &self.record.driver_name,
            &self.record.driver_call_sign,
            &self.record.vehicle_number,
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(&query))
    }
}

impl From<&CalculationHistoryItem> for CalculationRecord {
    fn from(item: &CalculationHistoryItem) -> Self {
        item.record.clone()
    }
}

/// Aggregate figures over a set of saved calculations.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryTotals {
    /// Number of calculations aggregated.
    pub count: usize,
    /// Total shift hours.
    pub shift_hours: Decimal,
    /// Total fares collected.
    pub total_fare: Decimal,
    /// Total top-ups owed.
    pub top_up_amount: Decimal,
}

impl HistoryTotals {
    /// Sums hours, fares and top-ups across `items`.
    ///
    /// Sums saturate at [`Decimal::MAX`] rather than overflow.
    pub fn from_items(items: &[CalculationHistoryItem]) -> Self {
        items.iter().fold(Self::default(), |mut totals, item| {
            totals.count += 1;
            totals.shift_hours = totals.shift_hours.saturating_add(item.record.shift_duration);
            totals.total_fare = totals.total_fare.saturating_add(item.record.total_fare);
            totals.top_up_amount = totals
                .top_up_amount
                .saturating_add(item.record.top_up_amount);
            totals
        })
    }
}
