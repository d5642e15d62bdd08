//! Aggregate queries behind the dashboards.
//!
//! Counts run in SQL. Hours and pay are stored as decimal text, which SQLite
//! can only sum as floating point, so the rows are folded here instead.

use sqlx::SqlitePool;

use super::optional_decimal_column;
use crate::calculation::TimeWindow;
use crate::error::{EngineError, EngineResult};
use crate::models::PeriodTotals;

/// Counts active staff with role employee or manager.
pub async fn count_active_staff(pool: &SqlitePool) -> EngineResult<i64> {
    let count = sqlx::query_scalar(
        "SELECT COUNT(*) FROM employees WHERE role IN ('employee', 'manager') AND is_active = 1",
    )
    .fetch_one(pool)
    .await?;
    Ok(count)
}

/// Counts open entries whose clock-in falls in `window`.
pub async fn count_open_entries_in(pool: &SqlitePool, window: &TimeWindow) -> EngineResult<i64> {
    let count = sqlx::query_scalar(
        "SELECT COUNT(*) FROM time_entries WHERE clock_out_time IS NULL AND clock_in_time >= ? AND clock_in_time < ?",
    )
    .bind(window.start_millis())
    .bind(window.end_millis())
    .fetch_one(pool)
    .await?;
    Ok(count)
}

/// Counts every entry in the ledger.
pub async fn count_entries(pool: &SqlitePool) -> EngineResult<i64> {
    let count = sqlx::query_scalar("SELECT COUNT(*) FROM time_entries")
        .fetch_one(pool)
        .await?;
    Ok(count)
}

/// Sums hours and pay of entries whose clock-in falls in `window`,
/// optionally restricted to one employee. Open entries contribute zero.
pub async fn sum_totals(
    pool: &SqlitePool,
    window: &TimeWindow,
    employee_id: Option<i64>,
) -> EngineResult<PeriodTotals> {
    let rows: Vec<(Option<String>, Option<String>)> = sqlx::query_as(
        "SELECT total_hours, total_pay FROM time_entries WHERE clock_in_time >= ?1 AND clock_in_time < ?2 AND (?3 IS NULL OR employee_id = ?3)",
    )
    .bind(window.start_millis())
    .bind(window.end_millis())
    .bind(employee_id)
    .fetch_all(pool)
    .await?;

    rows.into_iter()
        .try_fold(PeriodTotals::default(), |acc, (hours, pay)| -> EngineResult<_> {
            let row = PeriodTotals {
                hours: optional_decimal_column("total_hours", hours.as_deref())?
                    .unwrap_or_default(),
                pay: optional_decimal_column("total_pay", pay.as_deref())?.unwrap_or_default(),
            };
            acc.checked_add(row).ok_or_else(|| EngineError::Overflow {
                quantity: "period totals".to_string(),
            })
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::{day_window, week_to_date_window};
    use crate::models::{ClosedShift, NewTimeEntry, Role, WorkloadLevel};
    use crate::store::test_support::{seed_employee, store};
    use crate::store::{Store, time_entries};
    use chrono::{DateTime, NaiveDate, TimeZone, Utc};
    use rust_decimal::Decimal;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 13).unwrap()
    }

    async fn worked(
        store: &Store,
        employee_id: i64,
        clock_in: DateTime<Utc>,
        hours: &str,
        pay: &str,
    ) {
        let entry = time_entries::insert_open(
            store.pool(),
            &NewTimeEntry {
                employee_id,
                clock_in_time: clock_in,
                workload_level: WorkloadLevel::Normal,
                workload_multiplier: Decimal::ONE,
                daily_rate: Decimal::new(20, 0),
                notes: String::new(),
            },
        )
        .await
        .unwrap();
        let closed = ClosedShift {
            clock_out_time: clock_in + chrono::Duration::hours(1),
            break_duration_minutes: 0,
            total_hours: hours.parse().unwrap(),
            total_pay: pay.parse().unwrap(),
            notes: String::new(),
        };
        time_entries::close(store.pool(), entry.id, &closed)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_sum_totals_by_window_and_employee() {
        let store = store().await;
        let asha = seed_employee(&store, "asha", Role::Employee, "20").await;
        let ravi = seed_employee(&store, "ravi", Role::Employee, "20").await;

        // Sunday, Monday, Tuesday of the same week; and the Saturday before.
        worked(&store, asha.id, Utc.with_ymd_and_hms(2026, 1, 11, 9, 0, 0).unwrap(), "1.10", "22.00").await;
        worked(&store, asha.id, Utc.with_ymd_and_hms(2026, 1, 13, 9, 0, 0).unwrap(), "2.20", "44.00").await;
        worked(&store, ravi.id, Utc.with_ymd_and_hms(2026, 1, 13, 10, 0, 0).unwrap(), "3.30", "66.01").await;
        worked(&store, ravi.id, Utc.with_ymd_and_hms(2026, 1, 10, 9, 0, 0).unwrap(), "9.00", "180.00").await;

        let day = sum_totals(store.pool(), &day_window(today()), None).await.unwrap();
        assert_eq!(day.hours, Decimal::new(550, 2));
        assert_eq!(day.pay, Decimal::new(11001, 2));

        let week = week_to_date_window(today());
        let asha_week = sum_totals(store.pool(), &week, Some(asha.id)).await.unwrap();
        assert_eq!(asha_week.hours, Decimal::new(330, 2));
        assert_eq!(asha_week.pay, Decimal::new(6600, 2));

        let everyone = sum_totals(store.pool(), &week, None).await.unwrap();
        assert_eq!(everyone.hours, Decimal::new(660, 2));

        assert_eq!(count_entries(store.pool()).await.unwrap(), 4);
    }

    #[tokio::test]
    async fn test_sum_totals_overflow_is_an_error() {
        let store = store().await;
        let asha = seed_employee(&store, "asha", Role::Employee, "20").await;
        let max = Decimal::MAX.to_string();
        worked(&store, asha.id, Utc.with_ymd_and_hms(2026, 1, 13, 9, 0, 0).unwrap(), "1", &max).await;
        worked(&store, asha.id, Utc.with_ymd_and_hms(2026, 1, 13, 11, 0, 0).unwrap(), "1", &max).await;

        let result = sum_totals(store.pool(), &day_window(today()), None).await;
        assert!(matches!(result, Err(EngineError::Overflow { .. })));
    }

    #[tokio::test]
    async fn test_open_entries_count_but_do_not_sum() {
        let store = store().await;
        let asha = seed_employee(&store, "asha", Role::Employee, "20").await;
        seed_employee(&store, "boss", Role::Admin, "50").await;
        time_entries::insert_open(
            store.pool(),
            &NewTimeEntry {
                employee_id: asha.id,
                clock_in_time: Utc.with_ymd_and_hms(2026, 1, 13, 8, 0, 0).unwrap(),
                workload_level: WorkloadLevel::Normal,
                workload_multiplier: Decimal::ONE,
                daily_rate: Decimal::new(20, 0),
                notes: String::new(),
            },
        )
        .await
        .unwrap();

        let window = day_window(today());
        assert_eq!(count_open_entries_in(store.pool(), &window).await.unwrap(), 1);
        assert_eq!(
            sum_totals(store.pool(), &window, None).await.unwrap(),
            PeriodTotals::default()
        );
        assert_eq!(count_active_staff(store.pool()).await.unwrap(), 1);

        let yesterday = day_window(today().pred_opt().unwrap());
        assert_eq!(count_open_entries_in(store.pool(), &yesterday).await.unwrap(), 0);
    }
}
