//! Payment calculation functionality.
//!
//! This module derives shift earnings and the top-up owed to a driver from
//! the shift duration, the fares collected, and the hourly baseline rate.

use rust_decimal::Decimal;

use crate::models::{PaymentSummary, ShiftDuration};

/// Calculates the top-up owed for given earnings and fares.
///
/// The driver never owes money back: fares above the baseline give zero.
pub fn top_up(shift_earnings: Decimal, total_fare: Decimal) -> Decimal {
    shift_earnings
        .saturating_sub(total_fare)
        .max(Decimal::ZERO)
}

/// Summarizes the payment for a shift.
///
/// Earnings are `hours * hourly_rate` and the top-up is
/// `max(0, earnings - total_fare)`. Both saturate at [`Decimal::MAX`]
/// instead of overflowing. When the duration is unknown neither
/// figure is computed: both are `None`, so the caller shows a placeholder
/// instead of billing a zero-hour shift.
///
/// # Arguments
///
/// * `duration` - The shift duration from [`shift_duration`](super::shift_duration)
/// * `total_fare` - The sum of fares from [`total_fare`](super::total_fare)
/// * `hourly_rate` - The baseline rate, normally from
///   [`ConfigLoader::get_hourly_rate`](crate::config::ConfigLoader::get_hourly_rate)
///
/// # Examples
///
/// ```
/// use topup_engine::calculation::summarize;
/// use topup_engine::models::ShiftDuration;
/// use rust_decimal::Decimal;
///
/// let summary = summarize(
///     ShiftDuration::Known(Decimal::new(8, 0)),
///     Decimal::new(400, 0),
///     Decimal::new(70, 0),
/// );
/// assert_eq!(summary.shift_earnings, Some(Decimal::new(560, 0)));
/// assert_eq!(summary.top_up_amount, Some(Decimal::new(160, 0)));
/// ```
pub fn summarize(
    duration: ShiftDuration,
    total_fare: Decimal,
    hourly_rate: Decimal,
) -> PaymentSummary {
    let shift_earnings = duration
        .hours()
        .map(|hours| hours.saturating_mul(hourly_rate));
    let top_up_amount = shift_earnings.map(|earnings| top_up(earnings, total_fare));

    PaymentSummary {
        shift_duration: duration,
        total_fare,
        hourly_rate,
        shift_earnings,
        top_up_amount,
    }
}
