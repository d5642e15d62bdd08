//! Request types for the Timesheet Engine API.
//!
//! This module defines the JSON request bodies and query strings the
//! endpoints accept.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Request body for `POST /api/auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Login name.
    pub username: String,
    /// Plaintext password.
    pub password: String,
}

/// Request body for `POST /api/employee/clock-in`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClockInRequest {
    /// One of light, normal, heavy, overtime. Anything else counts as normal.
    pub workload_level: Option<String>,
    /// Free-text notes for the shift.
    pub notes: Option<String>,
}

/// Request body for `POST /api/employee/clock-out`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClockOutRequest {
    /// Unpaid break taken during the shift, in minutes.
    pub break_duration_minutes: Option<i64>,
    /// Notes appended to the entry.
    pub notes: Option<String>,
}

/// Request body for `PUT /api/admin/employees/:id/rate`.
///
/// The rate is kept as raw JSON so that a number, a numeric string, or
/// garbage all reach rate validation instead of failing deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RateUpdateRequest {
    /// The new hourly rate.
    pub hourly_rate: Option<serde_json::Value>,
}

impl RateUpdateRequest {
    /// Parses the rate exactly. `null` and absence both mean "missing".
    pub fn hourly_rate(&self) -> EngineResult<Option<Decimal>> {
        let text = match &self.hourly_rate {
            None | Some(serde_json::Value::Null) => return Ok(None),
            Some(serde_json::Value::Number(n)) => n.to_string(),
            Some(serde_json::Value::String(s)) => s.trim().to_string(),
            Some(other) => {
                return Err(EngineError::InvalidRate {
                    message: format!("expected a number, got {}", other),
                });
            }
        };

        Decimal::from_str(&text)
            .or_else(|_| Decimal::from_scientific(&text))
            .map(Some)
            .map_err(|_| EngineError::InvalidRate {
                message: format!("'{}' is not a number", text),
            })
    }
}

/// Query string for `GET /api/admin/time-entries`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimeEntriesQuery {
    /// Day to list, as `YYYY-MM-DD`. Defaults to today.
    pub date: Option<String>,
}

impl TimeEntriesQuery {
    /// Parses the requested date.
    pub fn date(&self) -> EngineResult<Option<NaiveDate>> {
        match self.date.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(text) => NaiveDate::from_str(text)
                .map(Some)
                .map_err(|_| EngineError::validation("date", format!("'{}' is not YYYY-MM-DD", text))),
        }
    }
}
