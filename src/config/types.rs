//! Configuration types, one section per concern

use crate::error::ConfigError;
use crate::identity::{EntityKind, LookupFields};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Top-level agent configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Identity catalog access
    pub catalog: CatalogConfig,

    /// Metric collection cadence and toggles
    pub collection: CollectionConfig,

    /// Identity resolution settings
    pub identity: IdentityConfig,

    /// Logging configuration
    pub logging: LoggingConfig,

    /// Checkpoint/inventory output sink
    pub output: OutputConfig,
}

impl AgentConfig {
    /// Load configuration using the layered loader.
    pub fn load() -> Result<Self, ConfigError> {
        super::loader::load_config()
    }

    /// Load configuration from a specific file (still subject to
    /// environment overrides).
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        super::loader::load_from_file(path)
    }

    /// Fail fast on values that would only break later at runtime.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.catalog.path.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "catalog.path".to_string(),
                value: String::new(),
                reason: "catalog path must not be empty".to_string(),
            });
        }
        if self.collection.interval.is_zero() {
            return Err(ConfigError::InvalidValue {
                key: "collection.interval".to_string(),
                value: "0".to_string(),
                reason: "collection interval must be greater than zero".to_string(),
            });
        }
        self.identity.lookup_fields()?;
        self.output.validate()?;
        Ok(())
    }
}

/// Identity catalog access configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Path to the SQLite catalog file. The catalog is externally owned
    /// and opened read-only.
    pub path: PathBuf,

    /// Maximum pooled connections
    pub max_connections: u32,

    /// Timeout for acquiring a connection
    pub connect_timeout: Duration,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("catalog.sqlite"),
            max_connections: 2,
            connect_timeout: Duration::from_secs(5),
        }
    }
}

/// Metric collection configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionConfig {
    pub enable_memory: bool,
    pub enable_cpu: bool,
    pub enable_disk: bool,
    pub enable_partition: bool,
    pub enable_network: bool,

    /// Interval between checkpoint passes
    pub interval: Duration,
}

impl Default for CollectionConfig {
    fn default() -> Self {
        Self {
            enable_memory: true,
            enable_cpu: true,
            enable_disk: true,
            enable_partition: true,
            enable_network: true,
            interval: Duration::from_secs(30),
        }
    }
}

/// Identity resolution configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IdentityConfig {
    /// Per-kind lookup column overrides. Unlisted kinds use the built-in
    /// defaults: memory = make, cpu = model, storage = serial_number,
    /// partition = serial_number, network_port = interface_name,
    /// device = model.
    pub lookup_fields: HashMap<EntityKind, String>,
}

impl IdentityConfig {
    pub fn lookup_fields(&self) -> Result<LookupFields, ConfigError> {
        LookupFields::new(self.lookup_fields.clone())
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (pretty, compact, json)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "compact".to_string(),
        }
    }
}

/// Where checkpoint and inventory payloads are written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub sink: SinkKind,

    /// Target file when `sink = "file"`; appended as JSON lines.
    pub path: Option<PathBuf>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            sink: SinkKind::Stdout,
            path: None,
        }
    }
}

impl OutputConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.sink == SinkKind::File && self.path.is_none() {
            return Err(ConfigError::InvalidValue {
                key: "output.path".to_string(),
                value: String::new(),
                reason: "file sink requires output.path".to_string(),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SinkKind {
    Stdout,
    File,
}
