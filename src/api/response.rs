//! Response types for the Timesheet Engine API.
//!
//! This module defines the response bodies, the error response structure,
//! and the mapping from engine errors to HTTP statuses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::error::EngineError;
use crate::models::{Employee, Role};

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// A 400 with the given body.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(err: EngineError) -> Self {
        if err.is_internal() {
            error!(error = %err, "Request failed with internal error");
            return ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::new("INTERNAL_ERROR", "Internal server error"),
            };
        }

        let (status, error) = match err {
            EngineError::Unauthenticated => (
                StatusCode::UNAUTHORIZED,
                ApiError::new("UNAUTHENTICATED", "Not authenticated"),
            ),
            // Same status as an anonymous request; only the code differs.
            EngineError::Unauthorized { role } => (
                StatusCode::UNAUTHORIZED,
                ApiError::with_details(
                    "UNAUTHORIZED",
                    "Insufficient role",
                    format!("Role '{}' may not perform this operation", role),
                ),
            ),
            EngineError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                ApiError::new("INVALID_CREDENTIALS", "Invalid credentials"),
            ),
            EngineError::AlreadyClockedIn => (
                StatusCode::BAD_REQUEST,
                ApiError::new("ALREADY_CLOCKED_IN", "Already clocked in"),
            ),
            EngineError::NoActiveEntry => (
                StatusCode::BAD_REQUEST,
                ApiError::new("NO_ACTIVE_ENTRY", "No active time entry found"),
            ),
            EngineError::InvalidRate { message } => (
                StatusCode::BAD_REQUEST,
                ApiError::with_details("INVALID_RATE", "Invalid hourly rate", message),
            ),
            EngineError::EmployeeNotFound { id } => (
                StatusCode::NOT_FOUND,
                ApiError::new("EMPLOYEE_NOT_FOUND", format!("Employee not found: {}", id)),
            ),
            EngineError::Validation { field, message } => (
                StatusCode::BAD_REQUEST,
                ApiError::with_details(
                    "VALIDATION_ERROR",
                    format!("Invalid field '{}'", field),
                    message,
                ),
            ),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::new("INTERNAL_ERROR", "Internal server error"),
            ),
        };
        ApiErrorResponse { status, error }
    }
}

/// Public fields of an employee returned at login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeSummary {
    /// Employee id.
    pub id: i64,
    /// Login name.
    pub username: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Access level.
    pub role: Role,
}

impl From<&Employee> for EmployeeSummary {
    fn from(employee: &Employee) -> Self {
        Self {
            id: employee.id,
            username: employee.username.clone(),
            first_name: employee.first_name.clone(),
            last_name: employee.last_name.clone(),
            role: employee.role,
        }
    }
}

/// Response body for a successful login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Who logged in.
    pub employee: EmployeeSummary,
}

/// Identity returned by `GET /api/auth/me`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionIdentity {
    /// Employee id.
    pub id: i64,
    /// Login name.
    pub username: String,
    /// Access level.
    pub role: Role,
}

/// Response body for `GET /api/auth/me`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeResponse {
    /// The session's employee.
    pub employee: SessionIdentity,
}

/// `{ "success": true }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuccessResponse {
    /// Always true.
    pub success: bool,
}

impl SuccessResponse {
    /// The only value this type takes.
    pub fn ok() -> Self {
        Self { success: true }
    }
}

/// Response body for a clock-in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClockInResponse {
    /// Always true.
    pub success: bool,
    /// Human-readable confirmation.
    pub message: String,
    /// The id of the new entry.
    pub entry_id: i64,
    /// When the shift started.
    pub clock_in_time: DateTime<Utc>,
}

/// Response body for a clock-out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClockOutResponse {
    /// Always true.
    pub success: bool,
    /// Human-readable confirmation.
    pub message: String,
    /// When the shift ended.
    pub clock_out_time: DateTime<Utc>,
    /// Worked hours, two decimal places.
    pub total_hours: Decimal,
    /// Pay, two decimal places.
    pub total_pay: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details"));
    }

    #[test]
    fn test_api_error_with_details_serialization() {
        let error = ApiError::with_details("TEST_ERROR", "Test message", "Some details");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"details\":\"Some details\""));
    }

    #[test]
    fn test_auth_errors_map_to_401_with_distinct_codes() {
        let anonymous: ApiErrorResponse = EngineError::Unauthenticated.into();
        let wrong_role: ApiErrorResponse = EngineError::Unauthorized {
            role: "employee".to_string(),
        }
        .into();
        assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);
        assert_eq!(wrong_role.status, StatusCode::UNAUTHORIZED);
        assert_ne!(anonymous.error.code, wrong_role.error.code);
    }

    #[test]
    fn test_business_errors_map_to_400_and_404() {
        let cases = [
            (EngineError::AlreadyClockedIn, StatusCode::BAD_REQUEST, "ALREADY_CLOCKED_IN"),
            (EngineError::NoActiveEntry, StatusCode::BAD_REQUEST, "NO_ACTIVE_ENTRY"),
            (
                EngineError::InvalidRate {
                    message: "must not be negative".to_string(),
                },
                StatusCode::BAD_REQUEST,
                "INVALID_RATE",
            ),
            (
                EngineError::EmployeeNotFound { id: 3 },
                StatusCode::NOT_FOUND,
                "EMPLOYEE_NOT_FOUND",
            ),
        ];
        for (err, status, code) in cases {
            let response: ApiErrorResponse = err.into();
            assert_eq!(response.status, status);
            assert_eq!(response.error.code, code);
        }
    }

    #[test]
    fn test_storage_error_hides_detail() {
        let response: ApiErrorResponse =
            EngineError::from(sqlx::Error::Protocol("secret table layout".to_string())).into();
        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.error.code, "INTERNAL_ERROR");
        assert!(!response.error.message.contains("secret"));
        assert!(response.error.details.is_none());
    }

    #[test]
    fn test_employee_summary_has_no_password_hash() {
        let employee = Employee {
            id: 1,
            username: "asha".to_string(),
            first_name: "Asha".to_string(),
            last_name: "Rao".to_string(),
            email: "asha@example.com".to_string(),
            role: Role::Employee,
            hourly_rate: Decimal::new(20, 0),
            hire_date: chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            is_active: true,
            password_hash: "$2b$04$secret".to_string(),
        };
        let json = serde_json::to_string(&LoginResponse {
            employee: (&employee).into(),
        })
        .unwrap();
        assert!(!json.contains("secret"));
        assert!(json.contains("\"role\":\"employee\""));
    }
}
