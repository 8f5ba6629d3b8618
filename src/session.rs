//! The shift calculation session.
//!
//! A [`ShiftSession`] holds everything entered for one shift calculation
//! and keeps the derived fields (duration, total fare) consistent as the
//! input changes. Every mutation recomputes them immediately, so reads are
//! always current.

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::calculation::{parse_fare, shift_duration, summarize, total_fare};
use crate::error::{EngineError, EngineResult};
use crate::models::{
    Booking, BookingField, CalculationRecord, HistoryBooking, PaymentSummary, ShiftDuration,
    ShiftInput,
};

/// One in-progress shift calculation.
///
/// # Example
///
/// ```
/// use topup_engine::models::{BookingField, ShiftInput};
/// use topup_engine::session::ShiftSession;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let mut session = ShiftSession::new(Decimal::new(70, 0));
/// session.submit_shift(ShiftInput {
///     date: NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
///     time_started: "22:00".to_string(),
///     time_finished: "06:00".to_string(),
///     driver_call_sign: "K42".to_string(),
///     driver_name: "Sam Okafor".to_string(),
///     vehicle_number: "V-118".to_string(),
/// })?;
///
/// let booking = session.bookings()[0].id;
/// session.update_booking(booking, BookingField::FareAmount, "400");
///
/// assert_eq!(session.summary().top_up_amount, Some(Decimal::new(160, 0)));
/// # Ok::<(), topup_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ShiftSession {
    hourly_rate: Decimal,
    time_started: String,
    time_finished: String,
    shift: Option<ShiftInput>,
    bookings: Vec<Booking>,
    duration: ShiftDuration,
    total_fare: Decimal,
}

impl ShiftSession {
    /// Starts an empty session at the given hourly rate.
    pub fn new(hourly_rate: Decimal) -> Self {
        Self {
            hourly_rate,
            time_started: String::new(),
            time_finished: String::new(),
            shift: None,
            bookings: Vec::new(),
            duration: ShiftDuration::Unknown,
            total_fare: Decimal::ZERO,
        }
    }

    fn recompute_duration(&mut self) {
        self.duration = shift_duration(&self.time_started, &self.time_finished);
    }

    fn recompute_total_fare(&mut self) {
        self.total_fare = total_fare(&self.bookings);
    }

    /// Returns the hourly rate the session computes earnings with.
    pub fn hourly_rate(&self) -> Decimal {
        self.hourly_rate
    }

    /// Updates the clock times.
    ///
    /// The duration follows immediately, so it can be previewed before the
    /// shift is submitted. After submission the submitted shift's times are
    /// corrected too, keeping them in step with the duration.
    pub fn set_times(
        &mut self,
        time_started: impl Into<String>,
        time_finished: impl Into<String>,
    ) {
        self.time_started = time_started.into();
        self.time_finished = time_finished.into();
        if let Some(shift) = self.shift.as_mut() {
            shift.time_started.clone_from(&self.time_started);
            shift.time_finished.clone_from(&self.time_finished);
        }
        self.recompute_duration();
    }

    /// Accepts the completed shift details.
    ///
    /// Fails with [`EngineError::MissingShiftFields`] if any field is blank.
    /// On success the clock times are taken from the input and, if no
    /// bookings exist yet, one empty booking is added to start from.
    pub fn submit_shift(&mut self, input: ShiftInput) -> EngineResult<()> {
        input.validate()?;

        self.time_started.clone_from(&input.time_started);
        self.time_finished.clone_from(&input.time_finished);
        self.recompute_duration();
        tracing::debug!(
            date = %input.date,
            driver = %input.driver_name,
            duration = ?self.duration,
            "Shift submitted"
        );
        self.shift = Some(input);

        if self.bookings.is_empty() {
            self.add_booking();
        }
        Ok(())
    }

    /// Returns the submitted shift, if any.
    pub fn shift(&self) -> Option<&ShiftInput> {
        self.shift.as_ref()
    }

    /// Appends an empty booking and returns its id.
    pub fn add_booking(&mut self) -> Uuid {
        let booking = Booking::new();
        let id = booking.id;
        self.bookings.push(booking);
        self.recompute_total_fare();
        id
    }

    /// Removes a booking. Returns `false` if no booking has that id.
    pub fn remove_booking(&mut self, id: Uuid) -> bool {
        let before = self.bookings.len();
        self.bookings.retain(|b| b.id != id);
        let removed = self.bookings.len() != before;
        if removed {
            self.recompute_total_fare();
        }
        removed
    }

    /// Sets one field of a booking. Returns `false` if no booking has that id.
    pub fn update_booking(
        &mut self,
        id: Uuid,
        field: BookingField,
        value: impl Into<String>,
    ) -> bool {
        let Some(booking) = self.bookings.iter_mut().find(|b| b.id == id) else {
            tracing::warn!(id = %id, ?field, "Booking to update not found");
            return false;
        };
        booking.set(field, value);
        self.recompute_total_fare();
        true
    }

    /// Returns the bookings in entry order.
    pub fn bookings(&self) -> &[Booking] {
        &self.bookings
    }

    /// Returns the current shift duration.
    pub fn duration(&self) -> ShiftDuration {
        self.duration
    }

    /// Returns the current sum of fares.
    pub fn total_fare(&self) -> Decimal {
        self.total_fare
    }

    /// Returns the payment summary for the current input.
    pub fn summary(&self) -> PaymentSummary {
        summarize(self.duration, self.total_fare, self.hourly_rate)
    }

    /// Flattens the session into a record for saving or export.
    ///
    /// Fails with [`EngineError::IncompleteCalculation`] if no shift has
    /// been submitted or its duration cannot be determined.
    pub fn to_record(&self) -> EngineResult<CalculationRecord> {
        let shift = self
            .shift
            .as_ref()
            .ok_or_else(|| EngineError::IncompleteCalculation {
                reason: "no shift details submitted".to_string(),
            })?;

        let summary = summarize(
            shift_duration(&shift.time_started, &shift.time_finished),
            self.total_fare,
            self.hourly_rate,
        );
        let (Some(shift_duration), Some(top_up_amount)) =
            (summary.shift_duration.hours(), summary.top_up_amount)
        else {
            return Err(EngineError::IncompleteCalculation {
                reason: "shift duration is unknown".to_string(),
            });
        };

        let bookings = self
            .bookings
            .iter()
            .map(|b| HistoryBooking {
                id: b.id,
                booking_id: b.booking_id.clone(),
                fare_amount: parse_fare(&b.fare_amount),
            })
            .collect();

        Ok(CalculationRecord {
            date: shift.date,
            driver_name: shift.driver_name.clone(),
            driver_call_sign: shift.driver_call_sign.clone(),
            vehicle_number: shift.vehicle_number.clone(),
            shift_start_time: shift.time_started.clone(),
            shift_end_time: shift.time_finished.clone(),
            shift_duration,
            bookings,
            total_fare: summary.total_fare,
            top_up_amount,
            hourly_rate: self.hourly_rate,
        })
    }

    /// Discards all input, keeping the hourly rate.
    pub fn reset(&mut self) {
        *self = Self::new(self.hourly_rate);
    }
}
