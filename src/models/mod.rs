//! Core data models for the Timesheet Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod employee;
mod pay_adjustment;
mod session;
mod stats;
mod time_entry;

pub use employee::{Employee, NewEmployee, Role, display_name};
pub use pay_adjustment::{
    HOURLY_RATE_ADJUSTMENT, HOURLY_RATE_REASON, NewPayAdjustment, PayAdjustment,
};
pub use session::Session;
pub use stats::{AdminStats, EmployeeStats, PeriodTotals};
pub use time_entry::{
    ClosedShift, DailyTimeEntry, EntryStatus, NewTimeEntry, TimeEntry, WorkloadLevel,
};
