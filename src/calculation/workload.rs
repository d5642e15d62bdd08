//! Workload multiplier lookup.
//!
//! This module provides the fixed table that scales a shift's pay by its
//! perceived intensity.

use rust_decimal::Decimal;

use crate::models::WorkloadLevel;

/// Multiplier for a light shift (0.8).
pub const LIGHT_MULTIPLIER: Decimal = Decimal::from_parts(8, 0, 0, false, 1);

/// Multiplier for a normal shift (1.0).
pub const NORMAL_MULTIPLIER: Decimal = Decimal::from_parts(10, 0, 0, false, 1);

/// Multiplier for a heavy shift (1.2).
pub const HEAVY_MULTIPLIER: Decimal = Decimal::from_parts(12, 0, 0, false, 1);

/// Multiplier for an overtime shift (1.5).
pub const OVERTIME_MULTIPLIER: Decimal = Decimal::from_parts(15, 0, 0, false, 1);

/// Returns the pay multiplier for a workload level.
pub fn multiplier_for(level: WorkloadLevel) -> Decimal {
    match level {
        WorkloadLevel::Light => LIGHT_MULTIPLIER,
        WorkloadLevel::Normal => NORMAL_MULTIPLIER,
        WorkloadLevel::Heavy => HEAVY_MULTIPLIER,
        WorkloadLevel::Overtime => OVERTIME_MULTIPLIER,
    }
}

/// Returns the pay multiplier for a workload level name.
///
/// Any name outside {light, normal, heavy, overtime} yields 1.0.
///
/// # Examples
///
/// ```
/// use timesheet_engine::calculation::workload_multiplier;
/// use rust_decimal::Decimal;
///
/// assert_eq!(workload_multiplier("heavy"), Decimal::new(12, 1));
/// assert_eq!(workload_multiplier("extreme"), Decimal::ONE);
/// ```
pub fn workload_multiplier(level: &str) -> Decimal {
    multiplier_for(WorkloadLevel::from_name(level))
}
