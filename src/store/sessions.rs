//! Login session queries.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

use super::employees::{EMPLOYEE_COLUMNS, EmployeeRow};
use crate::error::EngineResult;
use crate::models::{Employee, Session};

/// Opens a session for `employee_id` with a fresh random token.
pub async fn create(
    pool: &SqlitePool,
    employee_id: i64,
    expires_at: DateTime<Utc>,
    now: DateTime<Utc>,
) -> EngineResult<Session> {
    let id = Uuid::new_v4().to_string();
    sqlx::query(
        "INSERT INTO user_sessions (id, employee_id, expires_at, created_at) VALUES (?, ?, ?, ?)",
    )
    .bind(&id)
    .bind(employee_id)
    .bind(expires_at.timestamp_millis())
    .bind(now.timestamp_millis())
    .execute(pool)
    .await?;

    Ok(Session {
        id,
        employee_id,
        expires_at,
    })
}

/// Resolves a token to its employee, provided the session is unexpired and
/// the employee is still active.
pub async fn find_active_employee(
    pool: &SqlitePool,
    token: &str,
    now: DateTime<Utc>,
) -> EngineResult<Option<Employee>> {
    let sql = format!(
        "SELECT {EMPLOYEE_COLUMNS} FROM user_sessions s JOIN employees e ON e.id = s.employee_id WHERE s.id = ? AND s.expires_at > ? AND e.is_active = 1"
    );
    let row: Option<EmployeeRow> = sqlx::query_as(&sql)
        .bind(token)
        .bind(now.timestamp_millis())
        .fetch_optional(pool)
        .await?;
    row.map(Employee::try_from).transpose()
}

/// Deletes a session. Returns false if the token was unknown.
pub async fn delete(pool: &SqlitePool, token: &str) -> EngineResult<bool> {
    let done = sqlx::query("DELETE FROM user_sessions WHERE id = ?")
        .bind(token)
        .execute(pool)
        .await?;
    Ok(done.rows_affected() > 0)
}

/// Removes every session that expired at or before `now`.
pub async fn purge_expired(pool: &SqlitePool, now: DateTime<Utc>) -> EngineResult<u64> {
    let done = sqlx::query("DELETE FROM user_sessions WHERE expires_at <= ?")
        .bind(now.timestamp_millis())
        .execute(pool)
        .await?;
    Ok(done.rows_affected())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;
    use crate::store::employees;
    use crate::store::test_support::{seed_employee, store};
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 13, 9, 0, 0).unwrap()
    }

    async fn row_exists(pool: &SqlitePool, token: &str) -> bool {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM user_sessions WHERE id = ?")
            .bind(token)
            .fetch_one(pool)
            .await
            .unwrap();
        count == 1
    }

    #[tokio::test]
    async fn test_session_resolves_until_expiry() {
        let store = store().await;
        let employee = seed_employee(&store, "asha", Role::Employee, "20").await;
        let session = create(store.pool(), employee.id, now() + Duration::days(7), now())
            .await
            .unwrap();

        let found = find_active_employee(store.pool(), &session.id, now())
            .await
            .unwrap();
        assert_eq!(found.map(|e| e.id), Some(employee.id));

        let later = now() + Duration::days(7);
        assert!(
            find_active_employee(store.pool(), &session.id, later)
                .await
                .unwrap()
                .is_none()
        );
        // The row itself is still there until purged.
        assert!(row_exists(store.pool(), &session.id).await);
    }

    #[tokio::test]
    async fn test_deactivated_employee_session_does_not_resolve() {
        let store = store().await;
        let employee = seed_employee(&store, "ravi", Role::Employee, "20").await;
        let session = create(store.pool(), employee.id, now() + Duration::days(7), now())
            .await
            .unwrap();

        employees::set_active(store.pool(), employee.id, false, now())
            .await
            .unwrap();

        assert!(
            find_active_employee(store.pool(), &session.id, now())
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_tokens_are_unique() {
        let store = store().await;
        let employee = seed_employee(&store, "asha", Role::Employee, "20").await;
        let a = create(store.pool(), employee.id, now() + Duration::days(1), now())
            .await
            .unwrap();
        let b = create(store.pool(), employee.id, now() + Duration::days(1), now())
            .await
            .unwrap();
        assert_ne!(a.id, b.id);
    }

    #[tokio::test]
    async fn test_delete_and_purge() {
        let store = store().await;
        let employee = seed_employee(&store, "asha", Role::Employee, "20").await;
        let live = create(store.pool(), employee.id, now() + Duration::days(7), now())
            .await
            .unwrap();
        create(store.pool(), employee.id, now() - Duration::hours(1), now())
            .await
            .unwrap();

        assert_eq!(purge_expired(store.pool(), now()).await.unwrap(), 1);
        assert!(delete(store.pool(), &live.id).await.unwrap());
        assert!(!delete(store.pool(), &live.id).await.unwrap());
        assert!(!row_exists(store.pool(), &live.id).await);
    }
}
