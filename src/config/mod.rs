//! Configuration loading and management for the Timesheet Engine.
//!
//! This module provides functionality to load the service configuration from
//! a YAML file, including listener, database, session, password hashing and
//! logging settings.
//!
//! # Example
//!
//! ```no_run
//! use timesheet_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./timesheet.yaml").unwrap();
//! println!("Database: {}", config.config().database.url);
//! ```

mod loader;
mod types;

pub use loader::{BIND_ENV, ConfigLoader, DATABASE_URL_ENV};
pub use types::{
    AppConfig, AuthConfig, DatabaseConfig, LoggingConfig, MAX_SESSION_TTL_DAYS, ServerConfig,
    SessionConfig,
};
