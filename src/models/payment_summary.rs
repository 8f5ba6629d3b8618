//! Payment summary model.
//!
//! The summary is always derived from a shift's duration and fares; it is
//! never persisted on its own.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ShiftDuration;

/// The derived payment figures for a shift.
///
/// # Example
///
/// ```
/// use topup_engine::models::{PaymentSummary, ShiftDuration};
/// use rust_decimal::Decimal;
///
/// let summary = PaymentSummary {
///     shift_duration: ShiftDuration::Unknown,
///     total_fare: Decimal::new(4000, 2),
///     hourly_rate: Decimal::new(70, 0),
///     shift_earnings: None,
///     top_up_amount: None,
/// };
/// assert_eq!(summary.top_up_or_zero(), Decimal::ZERO);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentSummary {
    /// How long the shift lasted, if known.
    pub shift_duration: ShiftDuration,
    /// Sum of all parsed booking fares.
    pub total_fare: Decimal,
    /// The hourly rate the earnings were computed with.
    pub hourly_rate: Decimal,
    /// Duration multiplied by the hourly rate. `None` while duration is unknown.
    pub shift_earnings: Option<Decimal>,
    /// `max(0, shift_earnings - total_fare)`. `None` while duration is unknown.
    pub top_up_amount: Option<Decimal>,
}

impl PaymentSummary {
    /// Returns the top-up, treating an unknown duration as owing nothing.
    pub fn top_up_or_zero(&self) -> Decimal {
        self.top_up_amount.unwrap_or(Decimal::ZERO)
    }

    /// Returns true if the summary carries computed figures.
    pub fn is_complete(&self) -> bool {
        self.shift_duration.is_known()
    }
}
