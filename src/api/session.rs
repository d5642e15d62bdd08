//! Request extractor for the logged-in employee.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::EngineError;
use crate::models::Employee;

use super::response::ApiErrorResponse;
use super::state::AppState;

/// The employee behind the request's session cookie.
///
/// Extraction fails with 401 when the cookie is missing, unknown or expired,
/// or when its owner has been deactivated.
#[derive(Debug, Clone)]
pub struct CurrentEmployee(
    /// The authenticated employee.
    pub Employee,
);

#[axum::async_trait]
impl FromRequestParts<AppState> for CurrentEmployee {
    type Rejection = ApiErrorResponse;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = state
            .cookies()
            .token_from(&parts.headers)
            .ok_or(EngineError::Unauthenticated)?;
        let employee = state.service().authenticate(&token).await?;
        Ok(CurrentEmployee(employee))
    }
}
