//! Login, session validation and role checks.

use tracing::{info, warn};

use super::{TimesheetService, validate_hourly_rate};
use crate::error::{EngineError, EngineResult};
use crate::models::{Employee, NewEmployee, Role, Session};
use crate::store::{employees, sessions};

/// A successful login: who logged in and the session they were issued.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    /// The authenticated employee.
    pub employee: Employee,
    /// The freshly created session.
    pub session: Session,
}

/// Hashes a password with bcrypt at the given cost.
pub fn hash_password(password: &str, cost: u32) -> EngineResult<String> {
    Ok(bcrypt::hash(password, cost)?)
}

/// Checks a password against a stored bcrypt hash.
///
/// A malformed stored hash counts as a mismatch.
pub fn verify_password(password: &str, hash: &str) -> bool {
    match bcrypt::verify(password, hash) {
        Ok(matches) => matches,
        Err(err) => {
            warn!(error = %err, "Stored password hash could not be verified");
            false
        }
    }
}

/// Fails with [`EngineError::Unauthorized`] unless `employee` holds one of `roles`.
pub fn require_role(employee: &Employee, roles: &[Role]) -> EngineResult<()> {
    if employee.has_role(roles) {
        Ok(())
    } else {
        warn!(
            employee_id = employee.id,
            role = %employee.role,
            "Role not permitted for operation"
        );
        Err(EngineError::Unauthorized {
            role: employee.role.to_string(),
        })
    }
}

async fn blocking<T, F>(work: F) -> EngineResult<T>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| EngineError::Internal {
            message: format!("blocking task failed: {}", e),
        })
}

impl TimesheetService {
    /// Verifies credentials and opens a session.
    ///
    /// An unknown username, an inactive employee and a wrong password all
    /// produce the same [`EngineError::InvalidCredentials`].
    pub async fn login(&self, username: &str, password: &str) -> EngineResult<LoginOutcome> {
        let username = username.trim();
        if username.is_empty() {
            return Err(EngineError::validation("username", "is required"));
        }
        if password.is_empty() {
            return Err(EngineError::validation("password", "is required"));
        }

        let Some(employee) = employees::find_active_by_username(self.store.pool(), username).await?
        else {
            info!(username = %username, "Login rejected");
            return Err(EngineError::InvalidCredentials);
        };

        let password = password.to_string();
        let hash = employee.password_hash.clone();
        if !blocking(move || verify_password(&password, &hash)).await? {
            info!(username = %username, "Login rejected");
            return Err(EngineError::InvalidCredentials);
        }

        let now = self.now();
        let session = sessions::create(
            self.store.pool(),
            employee.id,
            now + self.settings.session_ttl,
            now,
        )
        .await?;

        info!(employee_id = employee.id, role = %employee.role, "Login succeeded");
        Ok(LoginOutcome { employee, session })
    }

    /// Resolves a session token to the employee it belongs to.
    pub async fn authenticate(&self, token: &str) -> EngineResult<Employee> {
        if token.is_empty() {
            return Err(EngineError::Unauthenticated);
        }
        sessions::find_active_employee(self.store.pool(), token, self.now())
            .await?
            .ok_or(EngineError::Unauthenticated)
    }

    /// Ends a session. Unknown tokens are ignored.
    pub async fn logout(&self, token: &str) -> EngineResult<()> {
        if sessions::delete(self.store.pool(), token).await? {
            info!("Session ended");
        }
        Ok(())
    }

    /// Deletes every expired session row. Returns how many were removed.
    pub async fn purge_expired_sessions(&self) -> EngineResult<u64> {
        let purged = sessions::purge_expired(self.store.pool(), self.now()).await?;
        info!(purged, "Expired sessions purged");
        Ok(purged)
    }

    /// Provisions an employee, hashing `password` into the new record.
    pub async fn add_employee(&self, mut new: NewEmployee, password: &str) -> EngineResult<Employee> {
        if password.is_empty() {
            return Err(EngineError::validation("password", "is required"));
        }
        validate_hourly_rate(Some(new.hourly_rate))?;

        let password = password.to_string();
        let cost = self.settings.bcrypt_cost;
        new.password_hash = blocking(move || hash_password(&password, cost)).await??;

        let employee = employees::insert(self.store.pool(), &new, self.now()).await?;
        info!(
            employee_id = employee.id,
            username = %employee.username,
            name = %employee.full_name(),
            role = %employee.role,
            "Employee added"
        );
        Ok(employee)
    }

    /// Marks an employee inactive. Their sessions stop authenticating at once.
    pub async fn deactivate_employee(&self, employee_id: i64) -> EngineResult<()> {
        if !employees::set_active(self.store.pool(), employee_id, false, self.now()).await? {
            return Err(EngineError::EmployeeNotFound { id: employee_id });
        }
        info!(employee_id, "Employee deactivated");
        Ok(())
    }
}
