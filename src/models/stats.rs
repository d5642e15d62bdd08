//! Dashboard rollups.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::WorkloadLevel;

/// Summed hours and pay over some set of entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PeriodTotals {
    /// Sum of `total_hours`.
    pub hours: Decimal,
    /// Sum of `total_pay`.
    pub pay: Decimal,
}

impl PeriodTotals {
    /// Adds two totals, returning `None` if either sum leaves the decimal range.
    pub fn checked_add(self, other: PeriodTotals) -> Option<PeriodTotals> {
        Some(PeriodTotals {
            hours: self.hours.checked_add(other.hours)?,
            pay: self.pay.checked_add(other.pay)?,
        })
    }
}

/// Company-wide dashboard for admins and managers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminStats {
    /// Active staff with role employee or manager.
    pub total_employees: i64,
    /// Open entries that started today.
    pub currently_clocked_in: i64,
    /// Hours from entries started today.
    pub total_hours_today: Decimal,
    /// Pay from entries started today.
    pub total_cost_today: Decimal,
    /// Hours from entries started since the most recent Sunday.
    pub total_hours_week: Decimal,
    /// Pay from entries started since the most recent Sunday.
    pub total_cost_week: Decimal,
    /// Every entry in the ledger.
    pub entries_total: i64,
}

/// Personal dashboard for one employee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeStats {
    /// Hours from the employee's entries started today.
    pub today_hours: Decimal,
    /// Pay from the employee's entries started today.
    pub today_pay: Decimal,
    /// Hours since the most recent Sunday.
    pub week_hours: Decimal,
    /// Pay since the most recent Sunday.
    pub week_pay: Decimal,
    /// Whether the employee has an open entry.
    pub is_clocked_in: bool,
    /// Start of the open entry, if any.
    pub current_shift_start: Option<DateTime<Utc>>,
    /// Workload of the open entry, if any.
    pub current_workload: Option<WorkloadLevel>,
    /// Break minutes recorded on the open entry.
    pub current_break_minutes: i64,
}
