//! Time-entry ledger queries.

use sqlx::SqlitePool;

use super::{
    decimal_column, enum_column, is_unique_violation, optional_decimal_column, timestamp_column,
};
use crate::calculation::TimeWindow;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    ClosedShift, DailyTimeEntry, NewTimeEntry, TimeEntry, WorkloadLevel, display_name,
};

/// Separator placed between clock-in notes and clock-out notes.
pub const CLOCK_OUT_NOTES_SEPARATOR: &str = "\n\nClock-out notes: ";

const ENTRY_COLUMNS: &str = "t.id, t.employee_id, t.clock_in_time, t.clock_out_time, t.workload_level, t.workload_multiplier, t.daily_rate, t.break_duration_minutes, t.total_hours, t.total_pay, t.status, t.notes";

#[derive(sqlx::FromRow)]
struct TimeEntryRow {
    id: i64,
    employee_id: i64,
    clock_in_time: i64,
    clock_out_time: Option<i64>,
    workload_level: String,
    workload_multiplier: String,
    daily_rate: String,
    break_duration_minutes: i64,
    total_hours: Option<String>,
    total_pay: Option<String>,
    status: String,
    notes: String,
}

impl TryFrom<TimeEntryRow> for TimeEntry {
    type Error = EngineError;

    fn try_from(row: TimeEntryRow) -> EngineResult<Self> {
        Ok(TimeEntry {
            id: row.id,
            employee_id: row.employee_id,
            clock_in_time: timestamp_column("clock_in_time", row.clock_in_time)?,
            clock_out_time: row
                .clock_out_time
                .map(|millis| timestamp_column("clock_out_time", millis))
                .transpose()?,
            // Rows written before a level was renamed still read back.
            workload_level: WorkloadLevel::from_name(&row.workload_level),
            workload_multiplier: decimal_column("workload_multiplier", &row.workload_multiplier)?,
            daily_rate: decimal_column("daily_rate", &row.daily_rate)?,
            break_duration_minutes: row.break_duration_minutes,
            total_hours: optional_decimal_column("total_hours", row.total_hours.as_deref())?,
            total_pay: optional_decimal_column("total_pay", row.total_pay.as_deref())?,
            status: enum_column("status", &row.status)?,
            notes: row.notes,
        })
    }
}

#[derive(sqlx::FromRow)]
struct DailyEntryRow {
    #[sqlx(flatten)]
    entry: TimeEntryRow,
    first_name: String,
    last_name: String,
}

impl TryFrom<DailyEntryRow> for DailyTimeEntry {
    type Error = EngineError;

    fn try_from(row: DailyEntryRow) -> EngineResult<Self> {
        let entry = TimeEntry::try_from(row.entry)?;
        Ok(DailyTimeEntry {
            date: entry.date(),
            employee_name: display_name(&row.first_name, &row.last_name),
            entry,
        })
    }
}

/// Returns the employee's open entry, if any.
pub async fn find_open(pool: &SqlitePool, employee_id: i64) -> EngineResult<Option<TimeEntry>> {
    let sql = format!(
        "SELECT {ENTRY_COLUMNS} FROM time_entries t WHERE t.employee_id = ? AND t.clock_out_time IS NULL"
    );
    let row: Option<TimeEntryRow> = sqlx::query_as(&sql)
        .bind(employee_id)
        .fetch_optional(pool)
        .await?;
    row.map(TimeEntry::try_from).transpose()
}

/// Finds an entry by id.
pub async fn find_by_id(pool: &SqlitePool, id: i64) -> EngineResult<Option<TimeEntry>> {
    let sql = format!("SELECT {ENTRY_COLUMNS} FROM time_entries t WHERE t.id = ?");
    let row: Option<TimeEntryRow> = sqlx::query_as(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    row.map(TimeEntry::try_from).transpose()
}

/// Opens a shift.
///
/// Fails with [`EngineError::AlreadyClockedIn`] if the employee already has an
/// open entry; the partial unique index decides between concurrent callers.
pub async fn insert_open(pool: &SqlitePool, new: &NewTimeEntry) -> EngineResult<TimeEntry> {
    let result = sqlx::query(
        "INSERT INTO time_entries (employee_id, clock_in_time, workload_level, workload_multiplier, daily_rate, break_duration_minutes, status, notes) VALUES (?, ?, ?, ?, ?, 0, 'active', ?)",
    )
    .bind(new.employee_id)
    .bind(new.clock_in_time.timestamp_millis())
    .bind(new.workload_level.as_str())
    .bind(new.workload_multiplier.to_string())
    .bind(new.daily_rate.to_string())
    .bind(&new.notes)
    .execute(pool)
    .await;

    let id = match result {
        Ok(done) => done.last_insert_rowid(),
        Err(err) if is_unique_violation(&err) => return Err(EngineError::AlreadyClockedIn),
        Err(err) => return Err(err.into()),
    };

    find_by_id(pool, id).await?.ok_or_else(|| EngineError::Internal {
        message: format!("time entry {} vanished after insert", id),
    })
}

/// Closes an open entry. Returns false if the entry was already closed.
pub async fn close(pool: &SqlitePool, id: i64, shift: &ClosedShift) -> EngineResult<bool> {
    let appended_notes = if shift.notes.is_empty() {
        String::new()
    } else {
        format!("{}{}", CLOCK_OUT_NOTES_SEPARATOR, shift.notes)
    };

    let done = sqlx::query(
        "UPDATE time_entries SET clock_out_time = ?, break_duration_minutes = ?, total_hours = ?, total_pay = ?, status = 'completed', notes = notes || ? WHERE id = ? AND clock_out_time IS NULL",
    )
    .bind(shift.clock_out_time.timestamp_millis())
    .bind(shift.break_duration_minutes)
    .bind(shift.total_hours.to_string())
    .bind(shift.total_pay.to_string())
    .bind(appended_notes)
    .bind(id)
    .execute(pool)
    .await?;

    Ok(done.rows_affected() > 0)
}

/// Returns the employee's most recent entries, newest first.
pub async fn list_recent_for_employee(
    pool: &SqlitePool,
    employee_id: i64,
    limit: i64,
) -> EngineResult<Vec<TimeEntry>> {
    let sql = format!(
        "SELECT {ENTRY_COLUMNS} FROM time_entries t WHERE t.employee_id = ? ORDER BY t.clock_in_time DESC, t.id DESC LIMIT ?"
    );
    let rows: Vec<TimeEntryRow> = sqlx::query_as(&sql)
        .bind(employee_id)
        .bind(limit)
        .fetch_all(pool)
        .await?;
    rows.into_iter().map(TimeEntry::try_from).collect()
}

/// Returns every entry whose clock-in falls in `window`, with the employee's
/// name, newest first.
pub async fn list_started_in(
    pool: &SqlitePool,
    window: &TimeWindow,
) -> EngineResult<Vec<DailyTimeEntry>> {
    let sql = format!(
        "SELECT {ENTRY_COLUMNS}, e.first_name, e.last_name FROM time_entries t JOIN employees e ON e.id = t.employee_id WHERE t.clock_in_time >= ? AND t.clock_in_time < ? ORDER BY t.clock_in_time DESC, t.id DESC"
    );
    let rows: Vec<DailyEntryRow> = sqlx::query_as(&sql)
        .bind(window.start_millis())
        .bind(window.end_millis())
        .fetch_all(pool)
        .await?;
    rows.into_iter().map(DailyTimeEntry::try_from).collect()
}
