//! Error types for the Timesheet Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure a timesheet operation can produce, from session checks
//! through storage.

use thiserror::Error;

/// The main error type for the Timesheet Engine.
///
/// Business errors (`AlreadyClockedIn`, `NoActiveEntry`, `InvalidRate`, ...)
/// are recoverable by the caller. Storage and internal errors are reported
/// to clients only as a generic failure.
///
/// # Example
///
/// ```
/// use timesheet_engine::error::EngineError;
///
/// let error = EngineError::EmployeeNotFound { id: 42 };
/// assert_eq!(error.to_string(), "Employee not found: 42");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// No session token, an unknown token, an expired session, or an inactive owner.
    #[error("Not authenticated")]
    Unauthenticated,

    /// The authenticated employee's role does not permit the operation.
    #[error("Insufficient role: {role}")]
    Unauthorized {
        /// The role the employee holds.
        role: String,
    },

    /// Login failed. Deliberately carries no hint about which field was wrong.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// The employee already has an open time entry.
    #[error("Already clocked in")]
    AlreadyClockedIn,

    /// The employee has no open time entry to close.
    #[error("No active time entry found")]
    NoActiveEntry,

    /// An hourly rate was missing or negative.
    #[error("Invalid hourly rate: {message}")]
    InvalidRate {
        /// Why the rate was rejected.
        message: String,
    },

    /// The target employee does not exist or is inactive.
    #[error("Employee not found: {id}")]
    EmployeeNotFound {
        /// The requested employee id.
        id: i64,
    },

    /// A request field failed validation.
    #[error("Invalid field '{field}': {message}")]
    Validation {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A stored value could not be decoded into its domain type.
    #[error("Corrupt value in column '{column}': {message}")]
    CorruptRecord {
        /// The column holding the bad value.
        column: String,
        /// A description of the decode failure.
        message: String,
    },

    /// A monetary or hours computation exceeded the decimal range.
    #[error("Arithmetic overflow computing {quantity}")]
    Overflow {
        /// What was being computed.
        quantity: String,
    },

    /// Password hashing or verification failed.
    #[error("Password hashing failed: {0}")]
    PasswordHash(#[from] bcrypt::BcryptError),

    /// The backing store reported an error.
    #[error("Storage error: {0}")]
    Storage(#[from] sqlx::Error),

    /// Schema migrations could not be applied.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Any other unexpected failure.
    #[error("Internal error: {message}")]
    Internal {
        /// A description of the failure.
        message: String,
    },
}

impl EngineError {
    /// Creates a validation error for the given field.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Returns true for errors whose detail must not reach API clients.
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            Self::ConfigNotFound { .. }
                | Self::ConfigParseError { .. }
                | Self::CorruptRecord { .. }
                | Self::Overflow { .. }
                | Self::PasswordHash(_)
                | Self::Storage(_)
                | Self::Migration(_)
                | Self::Internal { .. }
        )
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
