//! Employee model and related types.
//!
//! This module defines the Employee struct and Role enum for representing
//! staff in the timesheet system.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The access level of an employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Regular staff: may clock in and out and view their own entries.
    Employee,
    /// Staff with access to the admin dashboards and rate updates.
    Manager,
    /// Full administrative access.
    Admin,
}

impl Role {
    /// Returns the stored representation of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Employee => "employee",
            Role::Manager => "manager",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "employee" => Ok(Role::Employee),
            "manager" => Ok(Role::Manager),
            "admin" => Ok(Role::Admin),
            other => Err(format!("unknown role '{}'", other)),
        }
    }
}

/// Represents an employee in the directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: i64,
    /// Login name.
    pub username: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Contact email address.
    pub email: String,
    /// Access level.
    pub role: Role,
    /// Current hourly rate.
    pub hourly_rate: Decimal,
    /// The date the employee was hired.
    pub hire_date: NaiveDate,
    /// Inactive employees cannot authenticate and are hidden from listings.
    pub is_active: bool,
    /// bcrypt hash of the password. Never serialized.
    #[serde(skip)]
    pub password_hash: String,
}

/// Joins a first and last name for display.
pub fn display_name(first_name: &str, last_name: &str) -> String {
    format!("{} {}", first_name, last_name)
}

impl Employee {
    /// Returns "first last".
    pub fn full_name(&self) -> String {
        display_name(&self.first_name, &self.last_name)
    }

    /// Returns true if the employee holds one of `roles`.
    pub fn has_role(&self, roles: &[Role]) -> bool {
        roles.contains(&self.role)
    }
}

/// The fields needed to provision a new employee.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEmployee {
    /// Login name; must be unique.
    pub username: String,
    /// bcrypt hash of the initial password.
    pub password_hash: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Contact email address.
    pub email: String,
    /// Access level.
    pub role: Role,
    /// Starting hourly rate.
    pub hourly_rate: Decimal,
    /// The date the employee was hired.
    pub hire_date: NaiveDate,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_employee(role: Role) -> Employee {
        Employee {
            id: 7,
            username: "asha".to_string(),
            first_name: "Asha".to_string(),
            last_name: "Rao".to_string(),
            email: "asha@example.com".to_string(),
            role,
            hourly_rate: Decimal::new(2000, 2),
            hire_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            is_active: true,
            password_hash: "$2b$04$secret".to_string(),
        }
    }

    #[test]
    fn test_serialize_employee_omits_password_hash() {
        let employee = create_test_employee(Role::Employee);
        let json = serde_json::to_string(&employee).unwrap();

        assert!(!json.contains("password_hash"));
        assert!(!json.contains("secret"));
        assert!(json.contains("\"role\":\"employee\""));
        assert!(json.contains("\"hourly_rate\":\"20.00\""));
    }

    #[test]
    fn test_role_round_trips_through_str() {
        for role in [Role::Employee, Role::Manager, Role::Admin] {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
        assert!("owner".parse::<Role>().is_err());
    }

    #[test]
    fn test_has_role() {
        let manager = create_test_employee(Role::Manager);
        assert!(manager.has_role(&[Role::Admin, Role::Manager]));
        assert!(!manager.has_role(&[Role::Admin]));
    }

    #[test]
    fn test_full_name() {
        assert_eq!(create_test_employee(Role::Admin).full_name(), "Asha Rao");
    }
}
