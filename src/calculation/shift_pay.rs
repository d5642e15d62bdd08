//! Shift pay calculation.
//!
//! This module turns a clock-in/clock-out pair into worked hours and pay:
//! elapsed time minus the unpaid break, times the snapshotted hourly rate,
//! times the workload multiplier.

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Milliseconds in one hour.
const MILLIS_PER_HOUR: Decimal = Decimal::from_parts(3_600_000, 0, 0, false, 0);

/// Minutes in one hour.
const MINUTES_PER_HOUR: Decimal = Decimal::from_parts(60, 0, 0, false, 0);

/// Decimal places kept when a shift is persisted.
pub const PERSISTED_DECIMAL_PLACES: u32 = 2;

/// The outcome of a shift pay calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftPay {
    /// Elapsed hours minus break, before clamping. May be negative.
    pub elapsed_hours: Decimal,
    /// Worked hours, never negative.
    pub total_hours: Decimal,
    /// Pay for the shift, never negative.
    pub total_pay: Decimal,
}

impl ShiftPay {
    /// Rounds hours and pay to the persisted precision (half away from zero).
    pub fn rounded(&self) -> ShiftPay {
        ShiftPay {
            elapsed_hours: self.elapsed_hours,
            total_hours: self.total_hours.round_dp_with_strategy(
                PERSISTED_DECIMAL_PLACES,
                RoundingStrategy::MidpointAwayFromZero,
            ),
            total_pay: self.total_pay.round_dp_with_strategy(
                PERSISTED_DECIMAL_PLACES,
                RoundingStrategy::MidpointAwayFromZero,
            ),
        }
    }

    /// Returns true if the raw elapsed time had to be clamped to zero.
    pub fn was_clamped(&self) -> bool {
        self.elapsed_hours < Decimal::ZERO
    }
}

/// Calculates worked hours and pay for a shift.
///
/// `elapsed_hours = (clock_out - clock_in) / 1h - break_minutes / 60`.
/// Hours and pay are floored at zero, which absorbs clock skew and breaks
/// longer than the shift without ever producing a negative wage.
///
/// Returns [`EngineError::Overflow`] if pay exceeds the decimal range.
///
/// # Arguments
///
/// * `clock_in` - When the shift started
/// * `clock_out` - When the shift ended
/// * `break_minutes` - Unpaid break taken during the shift
/// * `hourly_rate` - The rate snapshotted at clock-in
/// * `multiplier` - The workload multiplier
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use rust_decimal::Decimal;
/// use timesheet_engine::calculation::calculate_shift_pay;
///
/// let clock_in = Utc.with_ymd_and_hms(2026, 1, 13, 9, 0, 0).unwrap();
/// let clock_out = Utc.with_ymd_and_hms(2026, 1, 13, 17, 0, 0).unwrap();
/// let pay = calculate_shift_pay(clock_in, clock_out, 30, Decimal::new(20, 0), Decimal::new(12, 1))?;
///
/// assert_eq!(pay.total_hours, Decimal::new(75, 1));
/// assert_eq!(pay.total_pay, Decimal::new(180, 0));
/// # Ok::<(), timesheet_engine::error::EngineError>(())
/// ```
pub fn calculate_shift_pay(
    clock_in: DateTime<Utc>,
    clock_out: DateTime<Utc>,
    break_minutes: u32,
    hourly_rate: Decimal,
    multiplier: Decimal,
) -> EngineResult<ShiftPay> {
    let elapsed_millis = (clock_out - clock_in).num_milliseconds();
    let elapsed_hours = Decimal::from(elapsed_millis) / MILLIS_PER_HOUR
        - Decimal::from(break_minutes) / MINUTES_PER_HOUR;

    let total_hours = elapsed_hours.max(Decimal::ZERO);
    let total_pay = total_hours
        .checked_mul(hourly_rate)
        .and_then(|pay| pay.checked_mul(multiplier))
        .ok_or_else(|| EngineError::Overflow {
            quantity: "total_pay".to_string(),
        })?
        .max(Decimal::ZERO);

    Ok(ShiftPay {
        elapsed_hours,
        total_hours,
        total_pay,
    })
}
