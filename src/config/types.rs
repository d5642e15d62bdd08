//! Configuration types for the timesheet service.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from the YAML configuration file. Every field has a
//! default, so an empty file is a valid configuration.

use chrono::Duration;
use serde::Deserialize;

/// Longest accepted session lifetime, in days.
pub const MAX_SESSION_TTL_DAYS: i64 = 3650;

/// Top-level service configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP listener settings.
    pub server: ServerConfig,
    /// Relational store settings.
    pub database: DatabaseConfig,
    /// Login session settings.
    pub sessions: SessionConfig,
    /// Password hashing settings.
    pub auth: AuthConfig,
    /// Log output settings.
    pub logging: LoggingConfig,
}

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address to bind, e.g. "0.0.0.0:8080".
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8080".to_string(),
        }
    }
}

/// Relational store settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// sqlx connection URL, e.g. "sqlite://timesheet.db".
    pub url: String,
    /// Upper bound on pooled connections.
    pub max_connections: u32,
    /// How long a request waits for a pooled connection before failing.
    pub acquire_timeout_secs: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://timesheet.db".to_string(),
            max_connections: 10,
            acquire_timeout_secs: 60,
        }
    }
}

/// Login session settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Lifetime of a session from login.
    pub ttl_days: i64,
    /// Name of the cookie carrying the session token.
    pub cookie_name: String,
    /// Whether the cookie is marked `Secure`.
    pub secure_cookie: bool,
}

impl SessionConfig {
    /// The session lifetime, with `ttl_days` held to `1..=MAX_SESSION_TTL_DAYS`.
    pub fn ttl(&self) -> Duration {
        Duration::days(self.ttl_days.clamp(1, MAX_SESSION_TTL_DAYS))
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl_days: 7,
            cookie_name: "session-id".to_string(),
            secure_cookie: false,
        }
    }
}

/// Password hashing settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// bcrypt work factor for newly hashed passwords.
    pub bcrypt_cost: u32,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self { bcrypt_cost: 12 }
    }
}

/// Log output settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive used when `RUST_LOG` is unset.
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "timesheet_engine=info,timesheet=info,tower_http=info".to_string(),
        }
    }
}
