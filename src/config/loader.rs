//! Figment-based configuration loading
//!
//! Layer priority, highest first:
//! 1. Environment variables (`HOSTSCOUT_*`, `__` for nesting)
//! 2. Configuration file (TOML)
//! 3. Compiled defaults

use crate::error::ConfigError;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const DEFAULT_CONFIG_FILE: &str = "hostscout.toml";
const ENV_PREFIX: &str = "HOSTSCOUT";

/// Load configuration from the default locations.
///
/// Looks for `hostscout.toml` in the working directory (or the path named
/// by `HOSTSCOUT_CONFIG_PATH`); a missing file is not an error, the
/// defaults and environment layers still apply.
pub fn load_config<T>() -> Result<T, ConfigError>
where
    T: Default + DeserializeOwned + serde::Serialize,
{
    extract(default_config_path(), false)
}

/// Load configuration from a specific file, which must exist.
pub fn load_from_file<T>(path: &Path) -> Result<T, ConfigError>
where
    T: Default + DeserializeOwned + serde::Serialize,
{
    extract(Some(path.to_path_buf()), true)
}

fn extract<T>(config_path: Option<PathBuf>, require_file: bool) -> Result<T, ConfigError>
where
    T: Default + DeserializeOwned + serde::Serialize,
{
    let mut figment = Figment::new().merge(Serialized::defaults(T::default()));

    if let Some(path) = &config_path {
        if path.exists() {
            debug!(path = %path.display(), "loading configuration file");
            figment = figment.merge(Toml::file(path));
        } else if require_file {
            return Err(ConfigError::FileNotFound { path: path.clone() });
        } else {
            warn!(path = %path.display(), "configuration file not found, using defaults");
        }
    }

    figment = figment.merge(Env::prefixed(&format!("{ENV_PREFIX}_")).split("__"));

    figment.extract().map_err(|err| ConfigError::Parse {
        details: err.to_string(),
    })
}

fn default_config_path() -> Option<PathBuf> {
    if let Ok(env_path) = std::env::var(format!("{ENV_PREFIX}_CONFIG_PATH")) {
        return Some(PathBuf::from(env_path));
    }
    Some(PathBuf::from(DEFAULT_CONFIG_FILE))
}
