// src/config/loader.rs

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{Result, SnowdaemonError};

/// Load a configuration file from a given path and return the raw
/// `RawConfigFile`.
///
/// This only performs YAML deserialization; it does **not** perform semantic
/// validation (required per-service keys, etc.). Use [`load_and_validate`]
/// for that.
///
/// A missing file maps to [`SnowdaemonError::ConfigMissing`], which `main`
/// turns into exit code 1.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawConfigFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|err| {
        if err.kind() == ErrorKind::NotFound {
            SnowdaemonError::ConfigMissing(path.to_path_buf())
        } else {
            SnowdaemonError::IoError(err)
        }
    })?;

    let config: RawConfigFile = serde_yaml::from_str(&contents)?;

    Ok(config)
}

/// Load a configuration file from path and run validation.
///
/// This is the recommended entry point for the rest of the application:
///
/// - Reads YAML.
/// - Applies defaults (handled by `serde` + `Default` impls).
/// - Checks that the keys required by the selected service are present.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let raw_config = load_from_path(&path)?;
    let config = ConfigFile::try_from(raw_config)?;
    Ok(config)
}
