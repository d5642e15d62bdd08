//! Time entry model and related types.
//!
//! A time entry is one shift: opened on clock-in, closed exactly once on
//! clock-out.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::multiplier_for;

/// The perceived intensity of a shift, which scales its pay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkloadLevel {
    /// Paid at 0.8x.
    Light,
    /// Paid at 1.0x.
    #[default]
    Normal,
    /// Paid at 1.2x.
    Heavy,
    /// Paid at 1.5x.
    Overtime,
}

impl WorkloadLevel {
    /// Returns the stored representation of the level.
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkloadLevel::Light => "light",
            WorkloadLevel::Normal => "normal",
            WorkloadLevel::Heavy => "heavy",
            WorkloadLevel::Overtime => "overtime",
        }
    }

    /// Parses a level name, falling back to `Normal` for anything unrecognized.
    ///
    /// # Examples
    ///
    /// ```
    /// use timesheet_engine::models::WorkloadLevel;
    ///
    /// assert_eq!(WorkloadLevel::from_name("heavy"), WorkloadLevel::Heavy);
    /// assert_eq!(WorkloadLevel::from_name("frantic"), WorkloadLevel::Normal);
    /// ```
    pub fn from_name(name: &str) -> Self {
        name.parse().unwrap_or_default()
    }

    /// Returns the pay multiplier for this level.
    pub fn multiplier(&self) -> Decimal {
        multiplier_for(*self)
    }
}

impl fmt::Display for WorkloadLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WorkloadLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(WorkloadLevel::Light),
            "normal" => Ok(WorkloadLevel::Normal),
            "heavy" => Ok(WorkloadLevel::Heavy),
            "overtime" => Ok(WorkloadLevel::Overtime),
            other => Err(format!("unknown workload level '{}'", other)),
        }
    }
}

/// Lifecycle state of a time entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryStatus {
    /// Clocked in, not yet clocked out.
    Active,
    /// Clocked out; totals are filled in.
    Completed,
}

impl EntryStatus {
    /// Returns the stored representation of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryStatus::Active => "active",
            EntryStatus::Completed => "completed",
        }
    }
}

impl FromStr for EntryStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(EntryStatus::Active),
            "completed" => Ok(EntryStatus::Completed),
            other => Err(format!("unknown entry status '{}'", other)),
        }
    }
}

/// One shift in the ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeEntry {
    /// Unique identifier for the entry.
    pub id: i64,
    /// The employee who worked the shift.
    pub employee_id: i64,
    /// When the shift started.
    pub clock_in_time: DateTime<Utc>,
    /// When the shift ended; `None` while the shift is open.
    pub clock_out_time: Option<DateTime<Utc>>,
    /// Workload chosen at clock-in.
    pub workload_level: WorkloadLevel,
    /// Multiplier resolved from the workload level at clock-in.
    pub workload_multiplier: Decimal,
    /// Hourly rate snapshotted at clock-in.
    pub daily_rate: Decimal,
    /// Unpaid break taken during the shift.
    pub break_duration_minutes: i64,
    /// Worked hours, filled on clock-out.
    pub total_hours: Option<Decimal>,
    /// Pay for the shift, filled on clock-out.
    pub total_pay: Option<Decimal>,
    /// Lifecycle state.
    pub status: EntryStatus,
    /// Free-text notes from clock-in and clock-out.
    pub notes: String,
}

impl TimeEntry {
    /// Returns true while the shift has not been clocked out.
    pub fn is_open(&self) -> bool {
        self.clock_out_time.is_none()
    }

    /// Returns the UTC date the shift started on.
    pub fn date(&self) -> NaiveDate {
        self.clock_in_time.date_naive()
    }
}

/// A time entry together with the name of the employee who worked it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyTimeEntry {
    /// The entry itself.
    #[serde(flatten)]
    pub entry: TimeEntry,
    /// "first last" of the owning employee.
    pub employee_name: String,
    /// The UTC date the shift started on.
    pub date: NaiveDate,
}

/// The fields written when a shift is opened.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTimeEntry {
    /// The employee clocking in.
    pub employee_id: i64,
    /// The clock-in instant.
    pub clock_in_time: DateTime<Utc>,
    /// Chosen workload.
    pub workload_level: WorkloadLevel,
    /// Multiplier resolved from the workload.
    pub workload_multiplier: Decimal,
    /// Hourly rate at the moment of clock-in.
    pub daily_rate: Decimal,
    /// Notes supplied at clock-in.
    pub notes: String,
}

/// The fields written when a shift is closed.
#[derive(Debug, Clone, PartialEq)]
pub struct ClosedShift {
    /// The clock-out instant.
    pub clock_out_time: DateTime<Utc>,
    /// Unpaid break minutes.
    pub break_duration_minutes: i64,
    /// Worked hours, already clamped and rounded.
    pub total_hours: Decimal,
    /// Pay, already clamped and rounded.
    pub total_pay: Decimal,
    /// Notes supplied at clock-out; appended to the clock-in notes.
    pub notes: String,
}
