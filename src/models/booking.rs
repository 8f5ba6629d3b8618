//! Booking model and related types.
//!
//! A booking is one fare-generating job completed during a shift. While a
//! shift is being entered the fare is kept exactly as typed; it is only
//! parsed into a number when totals are computed or a record is frozen.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents a booking while it is being edited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    /// Unique identifier for the booking within its list. Never reused.
    pub id: Uuid,
    /// Free-text booking reference entered by the user.
    pub booking_id: String,
    /// The fare as typed, e.g. `"12.50"`. May be empty or non-numeric.
    pub fare_amount: String,
}

impl Booking {
    /// Creates an empty booking with a freshly generated id.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            booking_id: String::new(),
            fare_amount: String::new(),
        }
    }

    /// Creates a booking with the given reference and fare text.
    ///
    /// # Examples
    ///
    /// ```
    /// use topup_engine::models::Booking;
    ///
    /// let booking = Booking::with_fare("BK-1001", "18.40");
    /// assert_eq!(booking.fare_amount, "18.40");
    /// ```
    pub fn with_fare(booking_id: impl Into<String>, fare_amount: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            booking_id: booking_id.into(),
            fare_amount: fare_amount.into(),
        }
    }

    /// Sets one editable field to a new value.
    pub fn set(&mut self, field: BookingField, value: impl Into<String>) {
        match field {
            BookingField::BookingId => self.booking_id = value.into(),
            BookingField::FareAmount => self.fare_amount = value.into(),
        }
    }
}

impl Default for Booking {
    fn default() -> Self {
        Self::new()
    }
}

/// The fields of a [`Booking`] that can be edited in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BookingField {
    /// The free-text booking reference.
    BookingId,
    /// The fare text.
    FareAmount,
}
