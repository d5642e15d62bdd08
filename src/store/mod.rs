//! Relational store for the Timesheet Engine.
//!
//! Holds the SQLite connection pool and the query modules for each table.
//! Timestamps are stored as Unix milliseconds and decimals as text; the
//! helpers here decode them back into domain types.

pub mod employees;
pub mod pay_adjustments;
pub mod reports;
pub mod sessions;
pub mod time_entries;

use std::str::FromStr;
use std::time::Duration;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use tracing::info;

use crate::config::DatabaseConfig;
use crate::error::{EngineError, EngineResult};

/// Owns the connection pool. Cheap to clone.
#[derive(Debug, Clone)]
pub struct Store {
    pool: SqlitePool,
}

impl Store {
    /// Opens (creating if missing) the database at `config.url` and applies migrations.
    pub async fn connect(config: &DatabaseConfig) -> EngineResult<Self> {
        let options = SqliteConnectOptions::from_str(&config.url)?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .foreign_keys(true)
            .busy_timeout(Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
            .connect_with(options)
            .await?;

        info!(
            url = %config.url,
            max_connections = config.max_connections,
            "Database connection established"
        );

        Self::migrated(pool).await
    }

    /// Opens a private in-memory database with the schema applied.
    ///
    /// The pool holds exactly one connection that never expires, since an
    /// in-memory SQLite database lives only as long as its connection.
    pub async fn in_memory() -> EngineResult<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        Self::migrated(pool).await
    }

    async fn migrated(pool: SqlitePool) -> EngineResult<Self> {
        sqlx::migrate!("./migrations").run(&pool).await?;
        info!("Database migrations applied");
        Ok(Self { pool })
    }

    /// Returns the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

fn corrupt(column: &str, message: impl ToString) -> EngineError {
    EngineError::CorruptRecord {
        column: column.to_string(),
        message: message.to_string(),
    }
}

pub(crate) fn decimal_column(column: &str, value: &str) -> EngineResult<Decimal> {
    Decimal::from_str(value).map_err(|e| corrupt(column, e))
}

pub(crate) fn optional_decimal_column(
    column: &str,
    value: Option<&str>,
) -> EngineResult<Option<Decimal>> {
    value.map(|v| decimal_column(column, v)).transpose()
}

pub(crate) fn timestamp_column(column: &str, millis: i64) -> EngineResult<DateTime<Utc>> {
    DateTime::from_timestamp_millis(millis)
        .ok_or_else(|| corrupt(column, format!("timestamp {} out of range", millis)))
}

pub(crate) fn date_column(column: &str, value: &str) -> EngineResult<NaiveDate> {
    NaiveDate::from_str(value).map_err(|e| corrupt(column, e))
}

pub(crate) fn enum_column<T>(column: &str, value: &str) -> EngineResult<T>
where
    T: FromStr<Err = String>,
{
    value.parse().map_err(|e: String| corrupt(column, e))
}

pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(|db_err| db_err.is_unique_violation())
}

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::{NaiveDate, TimeZone, Utc};
    use rust_decimal::Decimal;

    use super::{Store, employees};
    use crate::models::{Employee, NewEmployee, Role};

    pub async fn store() -> Store {
        Store::in_memory().await.unwrap()
    }

    pub async fn seed_employee(store: &Store, username: &str, role: Role, rate: &str) -> Employee {
        let new = NewEmployee {
            username: username.to_string(),
            password_hash: "not-a-real-hash".to_string(),
            first_name: username.to_string(),
            last_name: "Tester".to_string(),
            email: format!("{}@example.com", username),
            role,
            hourly_rate: rate.parse::<Decimal>().unwrap(),
            hire_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        };
        let now = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        employees::insert(store.pool(), &new, now).await.unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decimal_column_reports_column_on_failure() {
        match decimal_column("hourly_rate", "abc") {
            Err(EngineError::CorruptRecord { column, .. }) => assert_eq!(column, "hourly_rate"),
            other => panic!("expected CorruptRecord, got {:?}", other),
        }
        assert_eq!(decimal_column("x", "20.50").unwrap(), Decimal::new(2050, 2));
    }

    #[test]
    fn test_optional_decimal_column() {
        assert_eq!(optional_decimal_column("x", None).unwrap(), None);
        assert_eq!(
            optional_decimal_column("x", Some("7.5")).unwrap(),
            Some(Decimal::new(75, 1))
        );
    }

    #[tokio::test]
    async fn test_in_memory_store_has_schema() {
        let store = Store::in_memory().await.unwrap();
        let tables: Vec<String> = sqlx::query_scalar(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE '\\_%' ESCAPE '\\' AND name NOT LIKE 'sqlite%' ORDER BY name",
        )
        .fetch_all(store.pool())
        .await
        .unwrap();

        assert_eq!(
            tables,
            vec!["employees", "pay_adjustments", "time_entries", "user_sessions"]
        );
    }
}
