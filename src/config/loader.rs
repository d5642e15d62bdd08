//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the service
//! configuration from a YAML file and layering environment overrides on top.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{AppConfig, MAX_SESSION_TTL_DAYS};

/// Environment variable overriding `database.url`.
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";

/// Environment variable overriding `server.bind`.
pub const BIND_ENV: &str = "TIMESHEET_BIND";

/// Loads and provides access to the service configuration.
///
/// # Example
///
/// ```no_run
/// use timesheet_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./timesheet.yaml")?.with_env_overrides();
/// println!("Listening on {}", loader.config().server.bind);
/// # Ok::<(), timesheet_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: AppConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified YAML file.
    ///
    /// Returns an error if the file is missing or is not valid YAML for
    /// [`AppConfig`]. Fields absent from the file take their defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        Self::from_yaml_str(&content).map_err(|err| match err {
            EngineError::ConfigParseError { message, .. } => EngineError::ConfigParseError {
                path: path_str,
                message,
            },
            other => other,
        })
    }

    /// Loads the file at `path` if given, otherwise starts from defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: Option<P>) -> EngineResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(content: &str) -> EngineResult<Self> {
        // An empty document deserializes as unit, not as an empty map.
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config = serde_yaml::from_str::<AppConfig>(content).map_err(|e| {
            EngineError::ConfigParseError {
                path: "<inline>".to_string(),
                message: e.to_string(),
            }
        })?;

        if !(1..=MAX_SESSION_TTL_DAYS).contains(&config.sessions.ttl_days) {
            return Err(EngineError::ConfigParseError {
                path: "<inline>".to_string(),
                message: format!(
                    "sessions.ttl_days must be between 1 and {}, got {}",
                    MAX_SESSION_TTL_DAYS, config.sessions.ttl_days
                ),
            });
        }

        Ok(Self { config })
    }

    /// Applies overrides from the process environment.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides from an arbitrary variable lookup.
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(DATABASE_URL_ENV).filter(|v| !v.is_empty()) {
            self.config.database.url = url;
        }
        if let Some(bind) = lookup(BIND_ENV).filter(|v| !v.is_empty()) {
            self.config.server.bind = bind;
        }
        self
    }

    /// Returns a reference to the loaded configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Consumes the loader and returns the configuration.
    pub fn into_config(self) -> AppConfig {
        self.config
    }
}
