//! Clock-in, clock-out and an employee's own history.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::TimesheetService;
use crate::calculation::calculate_shift_pay;
use crate::error::{EngineError, EngineResult};
use crate::models::{ClosedShift, Employee, NewTimeEntry, TimeEntry, WorkloadLevel};
use crate::store::time_entries;

/// How many entries an employee sees in their recent history.
pub const RECENT_ENTRY_LIMIT: i64 = 10;

/// What a clock-out recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockOutSummary {
    /// The entry that was closed.
    pub entry_id: i64,
    /// When the shift ended.
    pub clock_out_time: DateTime<Utc>,
    /// Persisted worked hours.
    pub total_hours: Decimal,
    /// Persisted pay.
    pub total_pay: Decimal,
}

fn resolve_workload(requested: Option<&str>, employee_id: i64) -> WorkloadLevel {
    match requested {
        None => WorkloadLevel::default(),
        Some(name) => name.parse().unwrap_or_else(|_| {
            warn!(employee_id, workload = %name, "Unknown workload level, using normal");
            WorkloadLevel::default()
        }),
    }
}

impl TimesheetService {
    /// Opens a shift for `employee`.
    ///
    /// The employee's current hourly rate and the workload multiplier are
    /// snapshotted onto the entry, so later rate changes never touch it.
    pub async fn clock_in(
        &self,
        employee: &Employee,
        workload_level: Option<&str>,
        notes: Option<&str>,
    ) -> EngineResult<TimeEntry> {
        if time_entries::find_open(self.store.pool(), employee.id)
            .await?
            .is_some()
        {
            return Err(EngineError::AlreadyClockedIn);
        }

        let workload_level = resolve_workload(workload_level, employee.id);
        let new = NewTimeEntry {
            employee_id: employee.id,
            clock_in_time: self.now(),
            workload_level,
            workload_multiplier: workload_level.multiplier(),
            daily_rate: employee.hourly_rate,
            notes: notes.unwrap_or_default().to_string(),
        };
        let entry = time_entries::insert_open(self.store.pool(), &new).await?;

        info!(
            employee_id = employee.id,
            entry_id = entry.id,
            workload = %entry.workload_level,
            daily_rate = %entry.daily_rate,
            "Clocked in"
        );
        Ok(entry)
    }

    /// Closes the employee's open shift and records its hours and pay.
    pub async fn clock_out(
        &self,
        employee: &Employee,
        break_minutes: Option<i64>,
        notes: Option<&str>,
    ) -> EngineResult<ClockOutSummary> {
        let break_minutes = break_minutes.unwrap_or(0);
        let break_u32 = u32::try_from(break_minutes).map_err(|_| {
            EngineError::validation(
                "break_duration_minutes",
                format!("must be between 0 and {}", u32::MAX),
            )
        })?;

        let entry = time_entries::find_open(self.store.pool(), employee.id)
            .await?
            .ok_or(EngineError::NoActiveEntry)?;

        let clock_out_time = self.now();
        let pay = calculate_shift_pay(
            entry.clock_in_time,
            clock_out_time,
            break_u32,
            entry.daily_rate,
            entry.workload_multiplier,
        )?;
        if pay.was_clamped() {
            warn!(
                employee_id = employee.id,
                entry_id = entry.id,
                elapsed_hours = %pay.elapsed_hours,
                "Break exceeds shift length, hours clamped to zero"
            );
        }
        let pay = pay.rounded();

        let shift = ClosedShift {
            clock_out_time,
            break_duration_minutes: break_minutes,
            total_hours: pay.total_hours,
            total_pay: pay.total_pay,
            notes: notes.unwrap_or_default().to_string(),
        };
        // Another request may have closed it between the lookup and here.
        if !time_entries::close(self.store.pool(), entry.id, &shift).await? {
            return Err(EngineError::NoActiveEntry);
        }

        info!(
            employee_id = employee.id,
            entry_id = entry.id,
            total_hours = %pay.total_hours,
            total_pay = %pay.total_pay,
            "Clocked out"
        );
        Ok(ClockOutSummary {
            entry_id: entry.id,
            clock_out_time,
            total_hours: pay.total_hours,
            total_pay: pay.total_pay,
        })
    }

    /// Returns the employee's latest entries, newest first.
    pub async fn recent_entries(&self, employee: &Employee) -> EngineResult<Vec<TimeEntry>> {
        time_entries::list_recent_for_employee(self.store.pool(), employee.id, RECENT_ENTRY_LIMIT)
            .await
    }
}
