//! HTTP API module for the Timesheet Engine.
//!
//! This module provides the REST endpoints for login, clocking in and out,
//! and the employee and admin dashboards. Sessions travel in an HTTP-only
//! cookie.

mod cookie;
mod handlers;
mod request;
mod response;
mod session;
mod state;

pub use cookie::SessionCookie;
pub use handlers::create_router;
pub use request::{
    ClockInRequest, ClockOutRequest, LoginRequest, RateUpdateRequest, TimeEntriesQuery,
};
pub use response::{
    ApiError, ApiErrorResponse, ClockInResponse, ClockOutResponse, EmployeeSummary,
    LoginResponse, MeResponse, SessionIdentity, SuccessResponse,
};
pub use session::CurrentEmployee;
pub use state::AppState;
