//! Application configuration

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::fields::{self, ValidationErrors};

/// Closed interval of ports the application may bind.
const PORT_RANGE: (u32, u32) = (1024, 65535);

/// Closed interval for the connection pool size.
const MAX_CONNECTIONS_RANGE: (u32, u32) = (1, 1000);

/// Errors loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error reading the configuration file
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// One or more field rules were violated
    #[error(transparent)]
    Invalid(#[from] ValidationErrors),
}

/// Validated runtime configuration for the storefront application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "AppConfigDraft")]
pub struct AppConfig {
    /// Human-readable application name
    pub app_name: String,

    /// Port the application binds, within 1024..=65535
    pub port: u32,

    /// Whether debug output is enabled
    pub debug: bool,

    /// Database connection string
    pub database_url: String,

    /// Connection pool size, within 1..=1000
    pub max_connections: u32,
}

impl AppConfig {
    /// Load and validate configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::Io`]: the file could not be read.
    /// - [`ConfigError::Yaml`]: the contents are not valid YAML or are
    ///   missing required keys.
    /// - [`ConfigError::Invalid`]: a field rule was violated.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;

        Self::from_yaml_str(&contents)
    }

    /// Parse and validate configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::Yaml`]: the contents are not valid YAML or are
    ///   missing required keys.
    /// - [`ConfigError::Invalid`]: a field rule was violated.
    pub fn from_yaml_str(contents: &str) -> Result<Self, ConfigError> {
        let draft: AppConfigDraft = serde_norway::from_str(contents)?;

        Ok(Self::try_from(draft)?)
    }

    /// Re-run every field rule after direct field edits.
    ///
    /// # Errors
    ///
    /// Returns every violated rule as a [`ValidationErrors`].
    pub fn revalidated(self) -> Result<Self, ValidationErrors> {
        Self::try_from(AppConfigDraft::from(self))
    }
}

/// Unvalidated configuration input.
///
/// Only the database URL is required; every other field has a default.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfigDraft {
    /// Human-readable application name
    #[serde(default = "default_app_name")]
    pub app_name: String,

    /// Port the application binds
    #[serde(default = "default_port")]
    pub port: u32,

    /// Whether debug output is enabled
    #[serde(default)]
    pub debug: bool,

    /// Database connection string
    pub database_url: String,

    /// Connection pool size
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_app_name() -> String {
    "Emporium Online Store".to_owned()
}

fn default_port() -> u32 {
    8000
}

fn default_max_connections() -> u32 {
    100
}

impl AppConfigDraft {
    /// Draft with defaults for everything except the required database URL.
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            app_name: default_app_name(),
            port: default_port(),
            debug: false,
            database_url: database_url.into(),
            max_connections: default_max_connections(),
        }
    }
}

impl From<AppConfig> for AppConfigDraft {
    fn from(config: AppConfig) -> Self {
        Self {
            app_name: config.app_name,
            port: config.port,
            debug: config.debug,
            database_url: config.database_url,
            max_connections: config.max_connections,
        }
    }
}

impl TryFrom<AppConfigDraft> for AppConfig {
    type Error = ValidationErrors;

    fn try_from(draft: AppConfigDraft) -> Result<Self, Self::Error> {
        let port = fields::within_range("port", draft.port, PORT_RANGE.0, PORT_RANGE.1);
        let max_connections = fields::within_range(
            "max_connections",
            draft.max_connections,
            MAX_CONNECTIONS_RANGE.0,
            MAX_CONNECTIONS_RANGE.1,
        );

        match (port, max_connections) {
            (Ok(port), Ok(max_connections)) => Ok(Self {
                app_name: draft.app_name,
                port,
                debug: draft.debug,
                database_url: draft.database_url,
                max_connections,
            }),
            (port, max_connections) => Err([port.err(), max_connections.err()]
                .into_iter()
                .flatten()
                .collect()),
        }
    }
}
