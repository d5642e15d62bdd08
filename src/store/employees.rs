//! Employee directory queries.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{SqliteConnection, SqlitePool};

use super::{date_column, decimal_column, enum_column, is_unique_violation};
use crate::error::{EngineError, EngineResult};
use crate::models::{Employee, NewEmployee};

/// Employee columns, qualified with the `e` alias every query uses.
pub(crate) const EMPLOYEE_COLUMNS: &str = "e.id, e.username, e.password_hash, e.first_name, e.last_name, e.email, e.role, e.hourly_rate, e.hire_date, e.is_active";

#[derive(sqlx::FromRow)]
pub(crate) struct EmployeeRow {
    id: i64,
    username: String,
    password_hash: String,
    first_name: String,
    last_name: String,
    email: String,
    role: String,
    hourly_rate: String,
    hire_date: String,
    is_active: bool,
}

impl TryFrom<EmployeeRow> for Employee {
    type Error = EngineError;

    fn try_from(row: EmployeeRow) -> EngineResult<Self> {
        Ok(Employee {
            id: row.id,
            username: row.username,
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            role: enum_column("role", &row.role)?,
            hourly_rate: decimal_column("hourly_rate", &row.hourly_rate)?,
            hire_date: date_column("hire_date", &row.hire_date)?,
            is_active: row.is_active,
            password_hash: row.password_hash,
        })
    }
}

/// Provisions a new, active employee.
pub async fn insert(pool: &SqlitePool, new: &NewEmployee, now: DateTime<Utc>) -> EngineResult<Employee> {
    let now_millis = now.timestamp_millis();
    let result = sqlx::query(
        "INSERT INTO employees (username, password_hash, first_name, last_name, email, role, hourly_rate, hire_date, is_active, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, 1, ?, ?)",
    )
    .bind(&new.username)
    .bind(&new.password_hash)
    .bind(&new.first_name)
    .bind(&new.last_name)
    .bind(&new.email)
    .bind(new.role.as_str())
    .bind(new.hourly_rate.to_string())
    .bind(new.hire_date.to_string())
    .bind(now_millis)
    .bind(now_millis)
    .execute(pool)
    .await;

    let id = match result {
        Ok(done) => done.last_insert_rowid(),
        Err(err) if is_unique_violation(&err) => {
            return Err(EngineError::validation(
                "username",
                format!("'{}' is already taken", new.username),
            ));
        }
        Err(err) => return Err(err.into()),
    };

    find_by_id(pool, id).await?.ok_or_else(|| EngineError::Internal {
        message: format!("employee {} vanished after insert", id),
    })
}

/// Finds an employee by id, active or not.
pub async fn find_by_id(pool: &SqlitePool, id: i64) -> EngineResult<Option<Employee>> {
    let sql = format!("SELECT {EMPLOYEE_COLUMNS} FROM employees e WHERE e.id = ?");
    let row: Option<EmployeeRow> = sqlx::query_as(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    row.map(Employee::try_from).transpose()
}

/// Finds an active employee by login name.
pub async fn find_active_by_username(
    pool: &SqlitePool,
    username: &str,
) -> EngineResult<Option<Employee>> {
    let sql = format!("SELECT {EMPLOYEE_COLUMNS} FROM employees e WHERE e.username = ? AND e.is_active = 1");
    let row: Option<EmployeeRow> = sqlx::query_as(&sql)
        .bind(username)
        .fetch_optional(pool)
        .await?;
    row.map(Employee::try_from).transpose()
}

/// Lists active employees and managers, ordered by name.
pub async fn list_active_staff(pool: &SqlitePool) -> EngineResult<Vec<Employee>> {
    let sql = format!(
        "SELECT {EMPLOYEE_COLUMNS} FROM employees e WHERE e.role IN ('employee', 'manager') AND e.is_active = 1 ORDER BY e.first_name, e.last_name"
    );
    let rows: Vec<EmployeeRow> = sqlx::query_as(&sql).fetch_all(pool).await?;
    rows.into_iter().map(Employee::try_from).collect()
}

/// Sets the hourly rate of an active employee. Returns the number of rows changed.
///
/// Takes a connection so the caller can run it inside a transaction.
pub async fn update_rate(
    conn: &mut SqliteConnection,
    id: i64,
    hourly_rate: Decimal,
    now: DateTime<Utc>,
) -> EngineResult<u64> {
    let done = sqlx::query(
        "UPDATE employees SET hourly_rate = ?, updated_at = ? WHERE id = ? AND is_active = 1",
    )
    .bind(hourly_rate.to_string())
    .bind(now.timestamp_millis())
    .bind(id)
    .execute(&mut *conn)
    .await?;
    Ok(done.rows_affected())
}

/// Activates or deactivates an employee. Returns false if no such employee exists.
pub async fn set_active(
    pool: &SqlitePool,
    id: i64,
    active: bool,
    now: DateTime<Utc>,
) -> EngineResult<bool> {
    let done = sqlx::query("UPDATE employees SET is_active = ?, updated_at = ? WHERE id = ?")
        .bind(active)
        .bind(now.timestamp_millis())
        .bind(id)
        .execute(pool)
        .await?;
    Ok(done.rows_affected() > 0)
}
