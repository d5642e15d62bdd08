//! Calculation logic for the Timesheet Engine.
//!
//! This module contains the pure functions behind clock-out and reporting:
//! workload multiplier lookup, shift pay with its zero floor, and the
//! day and week-to-date windows dashboards aggregate over.

mod reporting_window;
mod shift_pay;
mod workload;

pub use reporting_window::{TimeWindow, day_window, week_start, week_to_date_window};
pub use shift_pay::{PERSISTED_DECIMAL_PLACES, ShiftPay, calculate_shift_pay};
pub use workload::{
    HEAVY_MULTIPLIER, LIGHT_MULTIPLIER, NORMAL_MULTIPLIER, OVERTIME_MULTIPLIER, multiplier_for,
    workload_multiplier,
};
