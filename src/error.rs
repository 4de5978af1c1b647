//! Error types for hostscout
//!
//! Library-level faults are modeled with `thiserror`; the application layer
//! (`main.rs`, `AgentState`) wraps them in `anyhow` for propagation. Note
//! that the identity resolution path never returns these to its callers:
//! per the degradation policy, resolution failures collapse into the
//! `"unknown"` sentinel at their origin. The enums below can only surface
//! at construction and startup, where failing fast is the right call.

use std::path::PathBuf;
use thiserror::Error;

/// Faults raised while opening or validating the identity catalog.
///
/// These occur once, at startup. After a successful `validate_schema`,
/// runtime query failures are absorbed by the gateway and never become
/// `CatalogError`s.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Catalog database could not be opened
    #[error("failed to open catalog {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: sqlx::Error,
    },

    /// A table required by an entity kind does not exist
    #[error("catalog is missing table '{table}'")]
    MissingTable { table: &'static str },

    /// A table exists but lacks a column the configured mapping needs
    #[error("catalog table '{table}' is missing column '{column}'")]
    MissingColumn { table: &'static str, column: String },

    /// Schema inspection itself failed
    #[error("failed to inspect catalog table '{table}': {source}")]
    Inspection {
        table: &'static str,
        #[source]
        source: sqlx::Error,
    },
}

/// Configuration loading and validation faults.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("configuration file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Configuration could not be parsed
    #[error("failed to parse configuration: {details}")]
    Parse { details: String },

    /// A value failed validation
    #[error("invalid configuration value for {key}: {value} ({reason})")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },
}

/// Platform hardware enumeration faults.
///
/// Raised by `HardwareProbe` implementations when a whole class query
/// fails. Consumers treat these as degradations, never as fatal errors:
/// the snapshot keeps the slot's previous value and the inventory leaves
/// the section empty.
#[derive(Error, Debug)]
pub enum HardwareError {
    #[error("{class} enumeration failed: {details}")]
    Enumeration { class: String, details: String },
}

impl HardwareError {
    pub fn enumeration(class: impl Into<String>, details: impl Into<String>) -> Self {
        Self::Enumeration {
            class: class.into(),
            details: details.into(),
        }
    }
}
