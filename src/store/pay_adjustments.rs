//! Pay adjustment audit trail.

use sqlx::{SqliteConnection, SqlitePool};

use super::{date_column, decimal_column, timestamp_column};
use crate::error::{EngineError, EngineResult};
use crate::models::{NewPayAdjustment, PayAdjustment};

#[derive(sqlx::FromRow)]
struct PayAdjustmentRow {
    id: i64,
    employee_id: i64,
    adjustment_date: String,
    adjustment_type: String,
    amount: String,
    reason: String,
    created_by: i64,
    created_at: i64,
}

impl TryFrom<PayAdjustmentRow> for PayAdjustment {
    type Error = EngineError;

    fn try_from(row: PayAdjustmentRow) -> EngineResult<Self> {
        Ok(PayAdjustment {
            id: row.id,
            employee_id: row.employee_id,
            adjustment_date: date_column("adjustment_date", &row.adjustment_date)?,
            adjustment_type: row.adjustment_type,
            amount: decimal_column("amount", &row.amount)?,
            reason: row.reason,
            created_by: row.created_by,
            created_at: timestamp_column("created_at", row.created_at)?,
        })
    }
}

/// Appends an audit row. Runs on the caller's connection so it can share a
/// transaction with the change it records.
pub async fn insert(
    conn: &mut SqliteConnection,
    new: &NewPayAdjustment,
) -> EngineResult<PayAdjustment> {
    let done = sqlx::query(
        "INSERT INTO pay_adjustments (employee_id, adjustment_date, adjustment_type, amount, reason, created_by, created_at) VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(new.employee_id)
    .bind(new.adjustment_date.to_string())
    .bind(&new.adjustment_type)
    .bind(new.amount.to_string())
    .bind(&new.reason)
    .bind(new.created_by)
    .bind(new.created_at.timestamp_millis())
    .execute(&mut *conn)
    .await?;

    Ok(PayAdjustment {
        id: done.last_insert_rowid(),
        employee_id: new.employee_id,
        adjustment_date: new.adjustment_date,
        adjustment_type: new.adjustment_type.clone(),
        amount: new.amount,
        reason: new.reason.clone(),
        created_by: new.created_by,
        created_at: new.created_at,
    })
}

/// Lists an employee's adjustments, newest first.
pub async fn list_for_employee(
    pool: &SqlitePool,
    employee_id: i64,
) -> EngineResult<Vec<PayAdjustment>> {
    let rows: Vec<PayAdjustmentRow> = sqlx::query_as(
        "SELECT id, employee_id, adjustment_date, adjustment_type, amount, reason, created_by, created_at FROM pay_adjustments WHERE employee_id = ? ORDER BY created_at DESC, id DESC",
    )
    .bind(employee_id)
    .fetch_all(pool)
    .await?;
    rows.into_iter().map(PayAdjustment::try_from).collect()
}
