//! Calculation logic for the Top-up Engine.
//!
//! This module contains the pure functions that turn raw shift input into a
//! payment summary: clock-time arithmetic (including shifts that run past
//! midnight), fare aggregation, and the earnings and top-up calculation.

mod fare_aggregator;
mod payment;
mod time_arithmetic;

pub use fare_aggregator::{parse_fare, total_fare};
pub use payment::{summarize, top_up};
pub use time_arithmetic::{MINUTES_PER_DAY, elapsed_hours, parse_clock, shift_duration};
