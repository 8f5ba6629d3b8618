//! Wall-clock time arithmetic.
//!
//! This module converts pairs of `HH:MM` clock times into elapsed hours,
//! treating a finish time earlier than the start as belonging to the next
//! day.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::ShiftDuration;

/// Minutes in one day, added when a shift crosses midnight.
pub const MINUTES_PER_DAY: i64 = 24 * 60;

/// Parses an `HH:MM` clock time into minutes since midnight.
///
/// Components are read as integers and are not range checked: `"25:00"`
/// parses to 1500. Anything after the minutes (such as seconds in
/// `HH:MM:SS`) is ignored. Returns `None` for blank or malformed input, or
/// for values too large to represent.
///
/// # Examples
///
/// ```
/// use topup_engine::calculation::parse_clock;
///
/// assert_eq!(parse_clock("07:45"), Some(465));
/// assert_eq!(parse_clock("07:45:30"), Some(465));
/// assert_eq!(parse_clock(""), None);
/// assert_eq!(parse_clock("7pm"), None);
/// ```
pub fn parse_clock(time: &str) -> Option<i64> {
    let mut parts = time.trim().split(':');
    let hours: i64 = parts.next()?.trim().parse().ok()?;
    let minutes: i64 = parts.next()?.trim().parse().ok()?;
    hours.checked_mul(60)?.checked_add(minutes)
}

fn minutes_between(start: i64, end: i64) -> Option<i64> {
    let diff = end.checked_sub(start)?;
    if diff < 0 {
        // Finished the next day
        Some(diff.rem_euclid(MINUTES_PER_DAY))
    } else {
        Some(diff)
    }
}

fn minutes_to_hours(minutes: i64) -> Decimal {
    (Decimal::from(minutes) / Decimal::from(60))
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Calculates the hours elapsed between two clock times.
///
/// If the finish time is numerically before the start time the shift is
/// assumed to run past midnight, so no valid pair of clock times produces
/// more than 24 hours or a negative result. The value is rounded to 2
/// decimal places.
///
/// Missing or unreadable input on either side yields zero; use
/// [`shift_duration`] when "not entered yet" must be told apart from a
/// zero-length shift.
///
/// # Arguments
///
/// * `start` - Start time, `HH:MM`
/// * `end` - Finish time, `HH:MM`
///
/// # Examples
///
/// ```
/// use topup_engine::calculation::elapsed_hours;
/// use rust_decimal::Decimal;
///
/// assert_eq!(elapsed_hours("09:00", "17:00"), Decimal::new(8, 0));
/// assert_eq!(elapsed_hours("22:00", "06:00"), Decimal::new(8, 0));
/// assert_eq!(elapsed_hours("", "17:00"), Decimal::ZERO);
/// ```
pub fn elapsed_hours(start: &str, end: &str) -> Decimal {
    shift_duration(start, end).hours_or_zero()
}

/// Calculates a shift's duration, or `Unknown` if either time is missing.
pub fn shift_duration(start: &str, end: &str) -> ShiftDuration {
    parse_clock(start)
        .zip(parse_clock(end))
        .and_then(|(start, end)| minutes_between(start, end))
        .map_or(ShiftDuration::Unknown, |minutes| {
            ShiftDuration::Known(minutes_to_hours(minutes))
        })
}
