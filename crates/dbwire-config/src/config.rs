// crates/dbwire-config/src/config.rs
// ============================================================================
// Module: dbwire Configuration
// Description: Configuration loading and validation for provisioning runs.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: dbwire-core, serde, toml
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with strict size and path limits,
//! or assembled from an orchestrator-supplied key/value source using the wire
//! keys `databaseCluster` and `name`. Missing or invalid configuration fails
//! closed before any resource-creation request can be issued: required keys
//! are checked first, then values are validated, including a load-time check
//! that the cluster string decomposes into a well-formed descriptor.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

use dbwire_core::ConnectionDescriptor;
use dbwire_core::DeletionPolicy;
use dbwire_core::ProvisionRequest;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
const DEFAULT_CONFIG_NAME: &str = "dbwire.toml";
/// Environment variable used to override the config path.
pub(crate) const CONFIG_ENV_VAR: &str = "DBWIRE_CONFIG";
/// Maximum configuration file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 64 * 1024;
/// Maximum length of a single configuration value.
pub(crate) const MAX_VALUE_LENGTH: usize = 4096;
/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Default project service required before database creation.
pub(crate) const DEFAULT_PROJECT_SERVICE: &str = "sqladmin.googleapis.com";
/// Orchestrator wire key for the composite cluster string.
pub const KEY_DATABASE_CLUSTER: &str = "databaseCluster";
/// Orchestrator wire key for the requested resource name.
pub const KEY_NAME: &str = "name";

// ============================================================================
// SECTION: Configuration Types
// ============================================================================

/// dbwire provisioning configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ProvisionConfig {
    /// Database resource configuration.
    pub database: DatabaseConfig,
    /// Project service dependency configuration.
    #[serde(default)]
    pub service: ServiceConfig,
    /// Export publication configuration.
    #[serde(default)]
    pub exports: ExportsConfig,
}

/// Database resource configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Composite cluster string, format `protocol/instance/host/port`.
    pub cluster: Option<String>,
    /// Raw requested resource name; may contain path separators.
    pub name: Option<String>,
    /// Deletion policy declared on the created resource.
    #[serde(default)]
    pub deletion_policy: DeletionPolicy,
}

/// Project service dependency configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Service that must be established before creation.
    pub name: String,
    /// Whether the service is disabled when the resource is destroyed.
    pub disable_on_destroy: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_PROJECT_SERVICE.to_string(),
            disable_on_destroy: false,
        }
    }
}

/// Export publication configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExportsConfig {
    /// Optional file path the export bundle is written to.
    pub path: Option<PathBuf>,
}

impl ProvisionConfig {
    /// Loads configuration from disk using the default resolution rules.
    ///
    /// The path is taken from the argument, then the `DBWIRE_CONFIG`
    /// environment variable, then the default filename.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let resolved = resolve_path(path)?;
        validate_path(&resolved)?;
        let bytes = fs::read(&resolved).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Assembles configuration from an orchestrator key/value source.
    ///
    /// Required wire keys are `databaseCluster` and `name`; their absence is
    /// surfaced before any parsing. Service and export settings take their
    /// defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingKey`] when a required key is absent and
    /// [`ConfigError`] validation failures otherwise.
    pub fn from_values(values: &BTreeMap<String, String>) -> Result<Self, ConfigError> {
        let cluster = values
            .get(KEY_DATABASE_CLUSTER)
            .ok_or_else(|| ConfigError::MissingKey(KEY_DATABASE_CLUSTER.to_string()))?;
        let name =
            values.get(KEY_NAME).ok_or_else(|| ConfigError::MissingKey(KEY_NAME.to_string()))?;
        let config = Self {
            database: DatabaseConfig {
                cluster: Some(cluster.clone()),
                name: Some(name.clone()),
                deletion_policy: DeletionPolicy::default(),
            },
            service: ServiceConfig::default(),
            exports: ExportsConfig::default(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let cluster = required_value(self.database.cluster.as_deref(), "database.cluster")?;
        let name = required_value(self.database.name.as_deref(), "database.name")?;
        if name.is_empty() {
            return Err(ConfigError::Invalid("database.name must not be empty".to_string()));
        }
        ConnectionDescriptor::parse(cluster)
            .map_err(|err| ConfigError::Invalid(err.to_string()))?;
        if self.service.name.is_empty() {
            return Err(ConfigError::Invalid("service.name must not be empty".to_string()));
        }
        if self.service.name.len() > MAX_VALUE_LENGTH {
            return Err(ConfigError::Invalid("service.name exceeds max length".to_string()));
        }
        if let Some(path) = &self.exports.path {
            if path.as_os_str().len() > MAX_TOTAL_PATH_LENGTH {
                return Err(ConfigError::Invalid("exports.path exceeds max length".to_string()));
            }
        }
        Ok(())
    }

    /// Converts validated configuration into a provisioning request.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when required values are absent; callers that
    /// have already validated never observe this.
    pub fn to_request(&self) -> Result<ProvisionRequest, ConfigError> {
        let cluster = required_value(self.database.cluster.as_deref(), "database.cluster")?;
        let name = required_value(self.database.name.as_deref(), "database.name")?;
        Ok(ProvisionRequest {
            database_cluster: cluster.to_string(),
            name: name.to_string(),
            deletion_policy: self.database.deletion_policy,
            service: self.service.name.clone(),
            disable_on_destroy: self.service.disable_on_destroy,
        })
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Required configuration key is absent.
    #[error("missing required config key: {0}")]
    MissingKey(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Returns the value for a required key, enforcing the length limit.
fn required_value<'a>(value: Option<&'a str>, key: &str) -> Result<&'a str, ConfigError> {
    let value = value.ok_or_else(|| ConfigError::MissingKey(key.to_string()))?;
    if value.len() > MAX_VALUE_LENGTH {
        return Err(ConfigError::Invalid(format!("{key} exceeds max length")));
    }
    Ok(value)
}

/// Resolves the config path from CLI or environment defaults.
fn resolve_path(path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = path {
        return Ok(path.to_path_buf());
    }
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok(PathBuf::from(env_path));
    }
    Ok(PathBuf::from(DEFAULT_CONFIG_NAME))
}

/// Validates the resolved path against security limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    if path.as_os_str().len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        if let Component::Normal(part) = component {
            if part.len() > MAX_PATH_COMPONENT_LENGTH {
                return Err(ConfigError::Invalid(
                    "config path component exceeds max length".to_string(),
                ));
            }
        }
    }
    Ok(())
}

// ============================================================================
// SECTION: Tests
// ============================================================================
