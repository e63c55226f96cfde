// src/config/validate.rs

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{Result, SnowdaemonError};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = SnowdaemonError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.service, raw.aws, raw.logging))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    ensure_service_name(cfg)?;
    validate_service_keys(cfg)?;
    Ok(())
}

fn ensure_service_name(cfg: &RawConfigFile) -> Result<()> {
    if cfg.service.service_name.trim().is_empty() {
        return Err(SnowdaemonError::ConfigError(
            "service.service_name must not be empty".to_string(),
        ));
    }
    Ok(())
}

/// Each service shape needs a different subset of the optional keys; missing
/// ones are a configuration error, caught here before anything is fetched
/// or spawned.
fn validate_service_keys(cfg: &RawConfigFile) -> Result<()> {
    let service = &cfg.service;

    if service.is_batch() {
        if service.service_config_folder.is_none() {
            return Err(SnowdaemonError::ConfigError(
                "service.service_config_folder is required for the snowflake_loader service"
                    .to_string(),
            ));
        }
        return Ok(());
    }

    if service.jarfile.is_none() {
        return Err(SnowdaemonError::ConfigError(format!(
            "service.jarfile is required for streaming service '{}'",
            service.service_name
        )));
    }
    if service.service_config_file.is_none() {
        return Err(SnowdaemonError::ConfigError(format!(
            "service.service_config_file is required for streaming service '{}'",
            service.service_name
        )));
    }

    if service.service_name == "enrich" && cfg.aws.dynamodb_config_table.is_none() {
        return Err(SnowdaemonError::ConfigError(
            "aws.dynamodb_config_table is required for the enrich service".to_string(),
        ));
    }

    Ok(())
}
