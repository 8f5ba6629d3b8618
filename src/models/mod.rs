//! Core data models for the Top-up Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod booking;
mod calculation_record;
mod payment_summary;
mod shift;

pub use booking::{Booking, BookingField};
pub use calculation_record::{
    CalculationHistoryItem, CalculationRecord, HistoryBooking, HistoryTotals,
};
pub use payment_summary::PaymentSummary;
pub use shift::{ShiftDuration, ShiftInput};
