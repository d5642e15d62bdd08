//! Dashboard rollups, recomputed on every call.

use chrono::NaiveDate;
use tracing::debug;

use super::{ADMIN_ROLES, TimesheetService, require_role};
use crate::calculation::{day_window, week_to_date_window};
use crate::error::EngineResult;
use crate::models::{AdminStats, DailyTimeEntry, Employee, EmployeeStats};
use crate::store::{employees, reports, time_entries};

impl TimesheetService {
    /// Company-wide totals for today and the week so far.
    pub async fn admin_stats(&self, actor: &Employee) -> EngineResult<AdminStats> {
        require_role(actor, ADMIN_ROLES)?;
        let today = self.today();
        let day = day_window(today);
        let week = week_to_date_window(today);
        let pool = self.store.pool();

        let today_totals = reports::sum_totals(pool, &day, None).await?;
        let week_totals = reports::sum_totals(pool, &week, None).await?;
        let stats = AdminStats {
            total_employees: reports::count_active_staff(pool).await?,
            currently_clocked_in: reports::count_open_entries_in(pool, &day).await?,
            total_hours_today: today_totals.hours,
            total_cost_today: today_totals.pay,
            total_hours_week: week_totals.hours,
            total_cost_week: week_totals.pay,
            entries_total: reports::count_entries(pool).await?,
        };

        debug!(actor_id = actor.id, %today, "Admin stats computed");
        Ok(stats)
    }

    /// The employee's own totals and current shift.
    pub async fn employee_stats(&self, employee: &Employee) -> EngineResult<EmployeeStats> {
        let today = self.today();
        let pool = self.store.pool();

        let today_totals = reports::sum_totals(pool, &day_window(today), Some(employee.id)).await?;
        let week_totals =
            reports::sum_totals(pool, &week_to_date_window(today), Some(employee.id)).await?;
        let open = time_entries::find_open(pool, employee.id).await?;

        Ok(EmployeeStats {
            today_hours: today_totals.hours,
            today_pay: today_totals.pay,
            week_hours: week_totals.hours,
            week_pay: week_totals.pay,
            is_clocked_in: open.is_some(),
            current_shift_start: open.as_ref().map(|e| e.clock_in_time),
            current_workload: open.as_ref().map(|e| e.workload_level),
            current_break_minutes: open.map_or(0, |e| e.break_duration_minutes),
        })
    }

    /// Every entry that started on `date` (today when absent), with employee names.
    pub async fn admin_time_entries(
        &self,
        actor: &Employee,
        date: Option<NaiveDate>,
    ) -> EngineResult<Vec<DailyTimeEntry>> {
        require_role(actor, ADMIN_ROLES)?;
        let date = date.unwrap_or_else(|| self.today());
        time_entries::list_started_in(self.store.pool(), &day_window(date)).await
    }

    /// Active employees and managers, ordered by name.
    pub async fn admin_employees(&self, actor: &Employee) -> EngineResult<Vec<Employee>> {
        require_role(actor, ADMIN_ROLES)?;
        employees::list_active_staff(self.store.pool()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use crate::models::{Role, WorkloadLevel};
    use crate::service::test_support::{hire, service, start};
    use chrono::Duration;
    use rust_decimal::Decimal;

    #[tokio::test]
    async fn test_admin_stats_today_and_week() {
        let (service, clock) = service().await;
        let boss = hire(&service, "boss", Role::Admin, "50").await;
        let asha = hire(&service, "asha", Role::Employee, "20").await;
        let ravi = hire(&service, "ravi", Role::Manager, "30").await;

        // Monday: 2h normal for asha.
        clock.set(start() - Duration::days(1));
        service.clock_in(&asha, None, None).await.unwrap();
        clock.advance(Duration::hours(2));
        service.clock_out(&asha, None, None).await.unwrap();

        // Tuesday: 8h heavy with a 30 minute break, and ravi still on shift.
        clock.set(start());
        service.clock_in(&asha, Some("heavy"), None).await.unwrap();
        service.clock_in(&ravi, None, None).await.unwrap();
        clock.advance(Duration::hours(8));
        service.clock_out(&asha, Some(30), None).await.unwrap();

        let stats = service.admin_stats(&boss).await.unwrap();
        assert_eq!(stats.total_employees, 2);
        assert_eq!(stats.currently_clocked_in, 1);
        assert_eq!(stats.total_hours_today, Decimal::new(75, 1));
        assert_eq!(stats.total_cost_today, Decimal::new(180, 0));
        assert_eq!(stats.total_hours_week, Decimal::new(95, 1));
        assert_eq!(stats.total_cost_week, Decimal::new(220, 0));
        assert_eq!(stats.entries_total, 3);
    }

    #[tokio::test]
    async fn test_week_resets_on_sunday() {
        let (service, clock) = service().await;
        let boss = hire(&service, "boss", Role::Admin, "50").await;
        let asha = hire(&service, "asha", Role::Employee, "20").await;

        // Saturday 10 January.
        clock.set(start() - Duration::days(3));
        service.clock_in(&asha, None, None).await.unwrap();
        clock.advance(Duration::hours(1));
        service.clock_out(&asha, None, None).await.unwrap();

        clock.set(start());
        let stats = service.admin_stats(&boss).await.unwrap();
        assert_eq!(stats.total_hours_week, Decimal::ZERO);
        assert_eq!(stats.entries_total, 1);
    }

    #[tokio::test]
    async fn test_employee_stats_reports_current_shift() {
        let (service, clock) = service().await;
        let asha = hire(&service, "asha", Role::Employee, "20").await;

        service.clock_in(&asha, None, None).await.unwrap();
        clock.advance(Duration::hours(3));
        service.clock_out(&asha, None, None).await.unwrap();
        service.clock_in(&asha, Some("overtime"), None).await.unwrap();

        let stats = service.employee_stats(&asha).await.unwrap();
        assert_eq!(stats.today_hours, Decimal::new(3, 0));
        assert_eq!(stats.today_pay, Decimal::new(60, 0));
        assert_eq!(stats.week_hours, Decimal::new(3, 0));
        assert!(stats.is_clocked_in);
        assert_eq!(stats.current_shift_start, Some(start() + Duration::hours(3)));
        assert_eq!(stats.current_workload, Some(WorkloadLevel::Overtime));
        assert_eq!(stats.current_break_minutes, 0);
    }

    #[tokio::test]
    async fn test_employee_stats_when_idle() {
        let (service, _clock) = service().await;
        let asha = hire(&service, "asha", Role::Employee, "20").await;

        let stats = service.employee_stats(&asha).await.unwrap();
        assert!(!stats.is_clocked_in);
        assert_eq!(stats.current_shift_start, None);
        assert_eq!(stats.current_workload, None);
        assert_eq!(stats.today_pay, Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_admin_time_entries_for_date() {
        let (service, clock) = service().await;
        let boss = hire(&service, "boss", Role::Manager, "50").await;
        let asha = hire(&service, "asha", Role::Employee, "20").await;

        service.clock_in(&asha, None, None).await.unwrap();
        clock.advance(Duration::hours(1));
        service.clock_out(&asha, None, None).await.unwrap();

        let today = service.admin_time_entries(&boss, None).await.unwrap();
        assert_eq!(today.len(), 1);
        assert_eq!(today[0].employee_name, "asha Tester");

        let yesterday = service.today().pred_opt().unwrap();
        assert!(
            service
                .admin_time_entries(&boss, Some(yesterday))
                .await
                .unwrap()
                .is_empty()
        );
    }

    #[tokio::test]
    async fn test_admin_views_require_admin_or_manager() {
        let (service, _clock) = service().await;
        let asha = hire(&service, "asha", Role::Employee, "20").await;

        assert!(matches!(
            service.admin_stats(&asha).await,
            Err(EngineError::Unauthorized { .. })
        ));
        assert!(matches!(
            service.admin_time_entries(&asha, None).await,
            Err(EngineError::Unauthorized { .. })
        ));
        assert!(matches!(
            service.admin_employees(&asha).await,
            Err(EngineError::Unauthorized { .. })
        ));
    }

    #[tokio::test]
    async fn test_admin_employees_lists_staff_only() {
        let (service, _clock) = service().await;
        let boss = hire(&service, "boss", Role::Admin, "50").await;
        hire(&service, "zoe", Role::Employee, "20").await;
        hire(&service, "amir", Role::Manager, "30").await;

        let staff = service.admin_employees(&boss).await.unwrap();
        let names: Vec<&str> = staff.iter().map(|e| e.username.as_str()).collect();
        assert_eq!(names, vec!["amir", "zoe"]);
    }
}
