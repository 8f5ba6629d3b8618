//! Fare aggregation.
//!
//! Sums the fares typed against a shift's bookings. A fare that cannot be
//! read as a number never fails the total; it simply contributes nothing.

use rust_decimal::Decimal;
use std::str::FromStr;

use crate::models::Booking;

/// Returns the longest leading part of `text` that reads as a number:
/// optional sign, digits with an optional fraction, optional exponent.
fn numeric_prefix(text: &str) -> &str {
    let bytes = text.as_bytes();
    let digits_from = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_end = digits_from(end);
    let mut has_digits = int_end > end;
    end = int_end;

    // A trailing "." without digits is left out, so "5." reads as "5"
    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        if frac_end > end + 1 {
            has_digits = true;
            end = frac_end;
        }
    }
    if !has_digits {
        return "";
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_end = digits_from(exp);
        if exp_end > exp {
            end = exp_end;
        }
    }

    &text[..end]
}

fn parse_number(number: &str) -> Option<Decimal> {
    let number = number.strip_prefix('+').unwrap_or(number);
    let (sign, unsigned) = match number.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", number),
    };
    // ".5" needs a leading zero
    let normalized = if unsigned.starts_with('.') {
        format!("{}0{}", sign, unsigned)
    } else {
        number.to_string()
    };

    if normalized.contains(['e', 'E']) {
        Decimal::from_scientific(&normalized).ok()
    } else {
        Decimal::from_str(&normalized).ok()
    }
}

/// Parses a fare as typed by the user.
///
/// Leading whitespace is skipped and the longest leading number is read, so
/// `"12abc"` is 12 and `"12.5.1"` is 12.5. Blank, non-numeric, negative and
/// out-of-range input all give zero.
///
/// # Examples
///
/// ```
/// use topup_engine::calculation::parse_fare;
/// use rust_decimal::Decimal;
///
/// assert_eq!(parse_fare("12.50"), Decimal::new(1250, 2));
/// assert_eq!(parse_fare("12abc"), Decimal::new(12, 0));
/// assert_eq!(parse_fare("abc"), Decimal::ZERO);
/// ```
pub fn parse_fare(fare: &str) -> Decimal {
    let prefix = numeric_prefix(fare.trim_start());
    if prefix.is_empty() {
        return Decimal::ZERO;
    }

    match parse_number(prefix) {
        Some(amount) if amount.is_sign_negative() => {
            tracing::warn!(fare, "Negative fare ignored");
            Decimal::ZERO
        }
        Some(amount) => amount,
        None => {
            tracing::warn!(fare, "Fare out of range ignored");
            Decimal::ZERO
        }
    }
}

/// Sums the fares of all bookings.
///
/// The result is not rounded; rounding to cents is a display concern. A
/// fare that would push the sum past [`Decimal::MAX`] is skipped like an
/// unreadable one.
///
/// # Arguments
///
/// * `bookings` - The bookings recorded for the shift (may be empty)
///
/// # Examples
///
/// ```
/// use topup_engine::calculation::total_fare;
/// use topup_engine::models::Booking;
/// use rust_decimal::Decimal;
///
/// let bookings = vec![
///     Booking::with_fare("BK-1", "10.50"),
///     Booking::with_fare("BK-2", "abc"),
///     Booking::with_fare("BK-3", "5"),
/// ];
/// assert_eq!(total_fare(&bookings), Decimal::new(155, 1));
/// ```
pub fn total_fare(bookings: &[Booking]) -> Decimal {
    bookings.iter().fold(Decimal::ZERO, |total, booking| {
        let fare = parse_fare(&booking.fare_amount);
        match total.checked_add(fare) {
            Some(sum) => sum,
            None => {
                tracing::warn!(fare = %booking.fare_amount, "Fare overflows total, ignored");
                total
            }
        }
    })
}
