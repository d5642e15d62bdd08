//! Pay adjustment audit records.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Adjustment type recorded when an hourly rate changes.
pub const HOURLY_RATE_ADJUSTMENT: &str = "hourly_rate";

/// Reason recorded when an hourly rate changes.
pub const HOURLY_RATE_REASON: &str = "Hourly rate updated by admin";

/// An append-only audit row describing a change to an employee's pay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayAdjustment {
    /// Unique identifier for the adjustment.
    pub id: i64,
    /// The employee whose pay changed.
    pub employee_id: i64,
    /// The date the adjustment was made.
    pub adjustment_date: NaiveDate,
    /// The kind of adjustment (e.g., "hourly_rate").
    pub adjustment_type: String,
    /// The new value.
    pub amount: Decimal,
    /// Why the adjustment was made.
    pub reason: String,
    /// The admin or manager who made the change.
    pub created_by: i64,
    /// When the row was written.
    pub created_at: DateTime<Utc>,
}

/// The fields written for a new adjustment.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPayAdjustment {
    /// The employee whose pay changed.
    pub employee_id: i64,
    /// The date the adjustment was made.
    pub adjustment_date: NaiveDate,
    /// The kind of adjustment.
    pub adjustment_type: String,
    /// The new value.
    pub amount: Decimal,
    /// Why the adjustment was made.
    pub reason: String,
    /// The admin or manager who made the change.
    pub created_by: i64,
    /// When the row is written.
    pub created_at: DateTime<Utc>,
}

impl NewPayAdjustment {
    /// Builds the audit row for an hourly rate change.
    pub fn hourly_rate(
        employee_id: i64,
        amount: Decimal,
        created_by: i64,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            employee_id,
            adjustment_date: created_at.date_naive(),
            adjustment_type: HOURLY_RATE_ADJUSTMENT.to_string(),
            amount,
            reason: HOURLY_RATE_REASON.to_string(),
            created_by,
            created_at,
        }
    }
}
