// src/errors.rs

//! Crate-wide error type and result alias.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SnowdaemonError {
    #[error("Cannot find config file at {}", .0.display())]
    ConfigMissing(PathBuf),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("YAML parsing error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// The child executable could not be started at all. No process exists
    /// yet, so no notification is published for this case.
    #[error("failed to spawn process for service '{service}': {source}")]
    SpawnError {
        service: String,
        source: std::io::Error,
    },

    #[error("aws cli invocation failed: {0}")]
    AwsCliError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, SnowdaemonError>;
