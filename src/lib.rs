//! Top-up Engine for driver shift payments
//!
//! This crate computes the top-up owed to a driver whose collected fares fall
//! short of a guaranteed hourly baseline: it derives shift duration from
//! wall-clock times (including shifts past midnight), totals booking fares,
//! calculates earnings and top-up, and keeps a persisted history of saved
//! calculations.

#![warn(missing_docs)]

pub mod calculation;
pub mod config;
pub mod error;
pub mod history;
pub mod models;
pub mod session;
