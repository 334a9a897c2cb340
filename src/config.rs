//! Application configuration
//!
//! Holds the identity of an application and validates it.

use crate::{error::CliError, utils::text::normalize_description};
use serde::{Deserialize, Serialize};

/// Version used when the application does not declare one
pub const DEFAULT_VERSION: &str = "1.0.0";

/// Identity and behaviour of an application
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    /// Application name, shown in usage and help
    pub name: String,
    /// Free text description, one trimmed line per non-empty input line
    pub description: String,
    /// Application version, conventionally semantic-version shaped
    pub version: String,
    /// Prefix every log line with the application name
    pub log_prefix: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            version: DEFAULT_VERSION.to_string(),
            log_prefix: false,
        }
    }
}

impl AppConfig {
    /// Create a configuration with the default version
    pub fn new(name: impl Into<String>, description: &str) -> Self {
        Self {
            name: name.into(),
            description: normalize_description(description),
            ..Self::default()
        }
    }

    /// Set the application version
    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Enable or disable the application name prefix on log lines
    #[must_use]
    pub fn with_log_prefix(mut self, enabled: bool) -> Self {
        self.log_prefix = enabled;
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), CliError> {
        if self.name.trim().is_empty() {
            return Err(CliError::config("application name must not be empty"));
        }

        Ok(())
    }

    /// Prefix for log lines, if enabled
    pub fn log_prefix(&self) -> Option<String> {
        self.log_prefix.then(|| format!("{}: ", self.name))
    }
}
