//! Login session model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Proof of a prior successful login, presented on each request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Opaque token.
    pub id: String,
    /// The employee who logged in.
    pub employee_id: i64,
    /// After this instant the session no longer authenticates.
    pub expires_at: DateTime<Utc>,
}
