//! Application state for the Timesheet Engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::service::TimesheetService;

use super::cookie::SessionCookie;

/// Shared application state.
///
/// Holds the timesheet service and the session cookie policy. Cloning is
/// cheap; every handler receives its own copy.
#[derive(Clone)]
pub struct AppState {
    service: Arc<TimesheetService>,
    cookies: Arc<SessionCookie>,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(service: TimesheetService, cookies: SessionCookie) -> Self {
        Self {
            service: Arc::new(service),
            cookies: Arc::new(cookies),
        }
    }

    /// Returns the timesheet service.
    pub fn service(&self) -> &TimesheetService {
        &self.service
    }

    /// Returns the session cookie policy.
    pub fn cookies(&self) -> &SessionCookie {
        &self.cookies
    }
}
