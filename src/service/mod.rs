//! Timesheet operations.
//!
//! [`TimesheetService`] ties the store to a [`Clock`] and exposes every
//! operation the HTTP API and CLI perform. The acting employee is always an
//! explicit argument; nothing here reads ambient request state.

mod auth;
mod payroll;
mod reporting;
mod timesheet;

use std::sync::Arc;

use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::clock::Clock;
use crate::config::AppConfig;
use crate::models::Role;
use crate::store::Store;

pub use auth::{LoginOutcome, hash_password, require_role, verify_password};
pub use payroll::{MAX_HOURLY_RATE, validate_hourly_rate};
pub use timesheet::{ClockOutSummary, RECENT_ENTRY_LIMIT};

/// Roles allowed to see company-wide data and change rates.
pub const ADMIN_ROLES: &[Role] = &[Role::Admin, Role::Manager];

/// Tunables the service reads from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceSettings {
    /// How long a login session stays valid.
    pub session_ttl: Duration,
    /// bcrypt work factor for new password hashes.
    pub bcrypt_cost: u32,
}

impl ServiceSettings {
    /// Extracts the service settings from the application configuration.
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            session_ttl: config.sessions.ttl(),
            bcrypt_cost: config.auth.bcrypt_cost,
        }
    }
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self::from_config(&AppConfig::default())
    }
}

/// The timesheet engine's operations over a store and a clock.
pub struct TimesheetService {
    store: Store,
    clock: Arc<dyn Clock>,
    settings: ServiceSettings,
}

impl TimesheetService {
    /// Creates a service over `store`, reading time from `clock`.
    pub fn new(store: Store, clock: Arc<dyn Clock>, settings: ServiceSettings) -> Self {
        Self {
            store,
            clock,
            settings,
        }
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Returns the service settings.
    pub fn settings(&self) -> &ServiceSettings {
        &self.settings
    }

    /// Returns the current instant according to the service clock.
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Returns today's UTC date according to the service clock.
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use chrono::{NaiveDate, TimeZone, Utc};
    use rust_decimal::Decimal;

    use super::{ServiceSettings, TimesheetService};
    use crate::clock::ManualClock;
    use crate::models::{Employee, NewEmployee, Role};
    use crate::store::Store;

    /// Tuesday 13 January 2026, 09:00 UTC.
    pub fn start() -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 13, 9, 0, 0).unwrap()
    }

    pub async fn service() -> (TimesheetService, Arc<ManualClock>) {
        let store = Store::in_memory().await.unwrap();
        let clock = Arc::new(ManualClock::new(start()));
        let settings = ServiceSettings {
            bcrypt_cost: 4,
            ..ServiceSettings::default()
        };
        let service = TimesheetService::new(store, clock.clone(), settings);
        (service, clock)
    }

    pub fn new_employee(username: &str, role: Role, rate: Decimal) -> NewEmployee {
        NewEmployee {
            username: username.to_string(),
            password_hash: String::new(),
            first_name: username.to_string(),
            last_name: "Tester".to_string(),
            email: format!("{}@example.com", username),
            role,
            hourly_rate: rate,
            hire_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        }
    }

    /// Adds an employee whose password is "pw".
    pub async fn hire(service: &TimesheetService, username: &str, role: Role, rate: &str) -> Employee {
        service
            .add_employee(new_employee(username, role, rate.parse().unwrap()), "pw")
            .await
            .unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;

    #[test]
    fn test_settings_from_config() {
        let config = ConfigLoader::from_yaml_str("sessions:\n  ttl_days: 2\nauth:\n  bcrypt_cost: 6\n")
            .unwrap()
            .into_config();
        let settings = ServiceSettings::from_config(&config);
        assert_eq!(settings.session_ttl, Duration::days(2));
        assert_eq!(settings.bcrypt_cost, 6);
    }

    #[test]
    fn test_default_settings() {
        let settings = ServiceSettings::default();
        assert_eq!(settings.session_ttl, Duration::days(7));
        assert_eq!(settings.bcrypt_cost, 12);
    }
}
