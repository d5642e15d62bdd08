//! HTTP request handlers for the Timesheet Engine API.
//!
//! This module contains the router and the handler functions for all
//! endpoints.

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::{HeaderMap, StatusCode, header},
    response::IntoResponse,
    routing::{get, post, put},
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::EngineError;
use crate::models::{AdminStats, DailyTimeEntry, Employee, EmployeeStats, PayAdjustment, TimeEntry};

use super::request::{
    ClockInRequest, ClockOutRequest, LoginRequest, RateUpdateRequest, TimeEntriesQuery,
};
use super::response::{
    ApiError, ApiErrorResponse, ClockInResponse, ClockOutResponse, LoginResponse, MeResponse,
    SessionIdentity, SuccessResponse,
};
use super::session::CurrentEmployee;
use super::state::AppState;

type ApiResult<T> = Result<T, ApiErrorResponse>;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/api/auth/login", post(login_handler))
        .route("/api/auth/logout", post(logout_handler))
        .route("/api/auth/me", get(auth_me_handler))
        .route("/api/employee/me", get(employee_me_handler))
        .route("/api/employee/clock-in", post(clock_in_handler))
        .route("/api/employee/clock-out", post(clock_out_handler))
        .route("/api/employee/stats", get(employee_stats_handler))
        .route("/api/employee/time-entries", get(employee_time_entries_handler))
        .route("/api/admin/stats", get(admin_stats_handler))
        .route("/api/admin/time-entries", get(admin_time_entries_handler))
        .route("/api/admin/employees", get(admin_employees_handler))
        .route("/api/admin/employees/:id/rate", put(update_rate_handler))
        .route(
            "/api/admin/employees/:id/adjustments",
            get(pay_adjustments_handler),
        )
        .with_state(state)
}

/// Unwraps a JSON body, turning extractor rejections into API errors.
fn json_body<T>(
    payload: Result<Json<T>, JsonRejection>,
    correlation_id: Uuid,
) -> ApiResult<T> {
    let rejection = match payload {
        Ok(Json(body)) => return Ok(body),
        Err(rejection) => rejection,
    };

    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's description of the problem
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    Err(ApiErrorResponse::bad_request(error))
}

/// Logs a failed operation and converts it for the client.
fn failed(correlation_id: Uuid, operation: &str, err: EngineError) -> ApiErrorResponse {
    if !err.is_internal() {
        warn!(
            correlation_id = %correlation_id,
            operation,
            error = %err,
            "Request rejected"
        );
    }
    err.into()
}

/// Handler for GET /health.
async fn health_handler() -> &'static str {
    "ok"
}

/// Handler for POST /api/auth/login.
///
/// Sets the session cookie on success.
async fn login_handler(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let correlation_id = Uuid::new_v4();
    let request = json_body(payload, correlation_id)?;

    let outcome = state
        .service()
        .login(&request.username, &request.password)
        .await
        .map_err(|err| failed(correlation_id, "login", err))?;

    info!(
        correlation_id = %correlation_id,
        employee_id = outcome.employee.id,
        "Session issued"
    );
    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, state.cookies().issue(&outcome.session.id))],
        Json(LoginResponse {
            employee: (&outcome.employee).into(),
        }),
    ))
}

/// Handler for POST /api/auth/logout.
///
/// Always succeeds and always clears the cookie.
async fn logout_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<impl IntoResponse> {
    if let Some(token) = state.cookies().token_from(&headers) {
        state.service().logout(&token).await?;
    }
    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, state.cookies().clear())],
        Json(SuccessResponse::ok()),
    ))
}

/// Handler for GET /api/auth/me.
async fn auth_me_handler(CurrentEmployee(employee): CurrentEmployee) -> Json<MeResponse> {
    Json(MeResponse {
        employee: SessionIdentity {
            id: employee.id,
            username: employee.username,
            role: employee.role,
        },
    })
}

/// Handler for GET /api/employee/me.
async fn employee_me_handler(CurrentEmployee(employee): CurrentEmployee) -> Json<Employee> {
    Json(employee)
}

/// Handler for POST /api/employee/clock-in.
async fn clock_in_handler(
    State(state): State<AppState>,
    CurrentEmployee(employee): CurrentEmployee,
    payload: Result<Json<ClockInRequest>, JsonRejection>,
) -> ApiResult<Json<ClockInResponse>> {
    let correlation_id = Uuid::new_v4();
    let request = json_body(payload, correlation_id)?;

    let entry = state
        .service()
        .clock_in(
            &employee,
            request.workload_level.as_deref(),
            request.notes.as_deref(),
        )
        .await
        .map_err(|err| failed(correlation_id, "clock_in", err))?;

    Ok(Json(ClockInResponse {
        success: true,
        message: "Clocked in successfully".to_string(),
        entry_id: entry.id,
        clock_in_time: entry.clock_in_time,
    }))
}

/// Handler for POST /api/employee/clock-out.
async fn clock_out_handler(
    State(state): State<AppState>,
    CurrentEmployee(employee): CurrentEmployee,
    payload: Result<Json<ClockOutRequest>, JsonRejection>,
) -> ApiResult<Json<ClockOutResponse>> {
    let correlation_id = Uuid::new_v4();
    let request = json_body(payload, correlation_id)?;

    let summary = state
        .service()
        .clock_out(
            &employee,
            request.break_duration_minutes,
            request.notes.as_deref(),
        )
        .await
        .map_err(|err| failed(correlation_id, "clock_out", err))?;

    Ok(Json(ClockOutResponse {
        success: true,
        message: "Clocked out successfully".to_string(),
        clock_out_time: summary.clock_out_time,
        total_hours: summary.total_hours,
        total_pay: summary.total_pay,
    }))
}

/// Handler for GET /api/employee/stats.
async fn employee_stats_handler(
    State(state): State<AppState>,
    CurrentEmployee(employee): CurrentEmployee,
) -> ApiResult<Json<EmployeeStats>> {
    Ok(Json(state.service().employee_stats(&employee).await?))
}

/// Handler for GET /api/employee/time-entries.
async fn employee_time_entries_handler(
    State(state): State<AppState>,
    CurrentEmployee(employee): CurrentEmployee,
) -> ApiResult<Json<Vec<TimeEntry>>> {
    Ok(Json(state.service().recent_entries(&employee).await?))
}

/// Handler for GET /api/admin/stats.
async fn admin_stats_handler(
    State(state): State<AppState>,
    CurrentEmployee(actor): CurrentEmployee,
) -> ApiResult<Json<AdminStats>> {
    Ok(Json(state.service().admin_stats(&actor).await?))
}

/// Handler for GET /api/admin/time-entries?date=YYYY-MM-DD.
async fn admin_time_entries_handler(
    State(state): State<AppState>,
    CurrentEmployee(actor): CurrentEmployee,
    query: Result<Query<TimeEntriesQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<DailyTimeEntry>>> {
    let Query(query) = query.map_err(|rejection| {
        ApiErrorResponse::bad_request(ApiError::validation_error(rejection.body_text()))
    })?;
    let date = query.date()?;
    Ok(Json(state.service().admin_time_entries(&actor, date).await?))
}

/// Handler for GET /api/admin/employees.
async fn admin_employees_handler(
    State(state): State<AppState>,
    CurrentEmployee(actor): CurrentEmployee,
) -> ApiResult<Json<Vec<Employee>>> {
    Ok(Json(state.service().admin_employees(&actor).await?))
}

fn employee_id(path: Result<Path<i64>, PathRejection>) -> ApiResult<i64> {
    path.map(|Path(id)| id).map_err(|rejection| {
        ApiErrorResponse::bad_request(ApiError::validation_error(rejection.body_text()))
    })
}

/// Handler for PUT /api/admin/employees/:id/rate.
async fn update_rate_handler(
    State(state): State<AppState>,
    CurrentEmployee(actor): CurrentEmployee,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<RateUpdateRequest>, JsonRejection>,
) -> ApiResult<Json<SuccessResponse>> {
    let correlation_id = Uuid::new_v4();
    let employee_id = employee_id(path)?;
    let request = json_body(payload, correlation_id)?;

    let hourly_rate = request
        .hourly_rate()
        .map_err(|err| failed(correlation_id, "update_rate", err))?;
    state
        .service()
        .update_hourly_rate(&actor, employee_id, hourly_rate)
        .await
        .map_err(|err| failed(correlation_id, "update_rate", err))?;

    Ok(Json(SuccessResponse::ok()))
}

/// Handler for GET /api/admin/employees/:id/adjustments.
async fn pay_adjustments_handler(
    State(state): State<AppState>,
    CurrentEmployee(actor): CurrentEmployee,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Vec<PayAdjustment>>> {
    let employee_id = employee_id(path)?;
    Ok(Json(
        state
            .service()
            .pay_adjustments(&actor, employee_id)
            .await?,
    ))
}
