//! Hourly rate changes and their audit trail.

use rust_decimal::Decimal;
use tracing::info;

use super::{ADMIN_ROLES, TimesheetService, require_role};
use crate::error::{EngineError, EngineResult};
use crate::models::{Employee, NewPayAdjustment, PayAdjustment};
use crate::store::{employees, pay_adjustments};

/// Highest hourly rate accepted, 99,999,999.99.
pub const MAX_HOURLY_RATE: Decimal = Decimal::from_parts(1_410_065_407, 2, 0, false, 2);

/// Accepts any present rate from zero up to [`MAX_HOURLY_RATE`].
pub fn validate_hourly_rate(rate: Option<Decimal>) -> EngineResult<Decimal> {
    match rate {
        None => Err(EngineError::InvalidRate {
            message: "hourly_rate is required".to_string(),
        }),
        Some(rate) if rate < Decimal::ZERO => Err(EngineError::InvalidRate {
            message: "must not be negative".to_string(),
        }),
        Some(rate) if rate > MAX_HOURLY_RATE => Err(EngineError::InvalidRate {
            message: format!("must not exceed {}", MAX_HOURLY_RATE),
        }),
        Some(rate) => Ok(rate),
    }
}

impl TimesheetService {
    /// Sets an employee's hourly rate and records who changed it.
    ///
    /// The new rate applies from the next clock-in; open and past entries keep
    /// their snapshotted rate. The update and its audit row commit together.
    pub async fn update_hourly_rate(
        &self,
        actor: &Employee,
        employee_id: i64,
        hourly_rate: Option<Decimal>,
    ) -> EngineResult<PayAdjustment> {
        require_role(actor, ADMIN_ROLES)?;
        let hourly_rate = validate_hourly_rate(hourly_rate)?;
        let now = self.now();

        let mut tx = self.store.pool().begin().await?;
        if employees::update_rate(&mut *tx, employee_id, hourly_rate, now).await? == 0 {
            return Err(EngineError::EmployeeNotFound { id: employee_id });
        }
        let adjustment = pay_adjustments::insert(
            &mut *tx,
            &NewPayAdjustment::hourly_rate(employee_id, hourly_rate, actor.id, now),
        )
        .await?;
        tx.commit().await?;

        info!(
            employee_id,
            actor_id = actor.id,
            hourly_rate = %hourly_rate,
            adjustment_id = adjustment.id,
            "Hourly rate updated"
        );
        Ok(adjustment)
    }

    /// Lists the pay adjustments recorded for an employee, newest first.
    pub async fn pay_adjustments(
        &self,
        actor: &Employee,
        employee_id: i64,
    ) -> EngineResult<Vec<PayAdjustment>> {
        require_role(actor, ADMIN_ROLES)?;
        if employees::find_by_id(self.store.pool(), employee_id)
            .await?
            .is_none()
        {
            return Err(EngineError::EmployeeNotFound { id: employee_id });
        }
        pay_adjustments::list_for_employee(self.store.pool(), employee_id).await
    }
}
