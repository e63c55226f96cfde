// src/exec/command.rs

//! Command-line construction for the two service shapes.
//!
//! A [`CommandSpec`] is built once per invocation from validated
//! configuration and never mutated afterwards. Per-child environment and
//! working directory live on the command value instead of the daemon's own
//! process state, so nothing here touches `std::env::set_var` or
//! `set_current_dir`.

use std::fmt;
use std::path::PathBuf;

use crate::aws::credentials::SessionCredentials;
use crate::config::ConfigFile;
use crate::errors::{Result, SnowdaemonError};

/// An executable plus its arguments, optional per-child environment entries
/// and an optional working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    program: String,
    args: Vec<String>,
    env: Vec<(String, String)>,
    current_dir: Option<PathBuf>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            env: Vec::new(),
            current_dir: None,
        }
    }

    pub fn with_env(mut self, env: Vec<(String, String)>) -> Self {
        self.env = env;
        self
    }

    pub fn with_current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn env(&self) -> &[(String, String)] {
        &self.env
    }

    pub fn current_dir(&self) -> Option<&PathBuf> {
        self.current_dir.as_ref()
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

fn missing_key(key: &str) -> SnowdaemonError {
    SnowdaemonError::ConfigError(format!("missing required config key: {key}"))
}

/// Build the command line for a streaming (JVM) service:
///
/// `java -jar <service_directory>/<jarfile> --config <cwd>/<service_config_file>`
///
/// The `enrich` service additionally gets resolver and enrichment locators
/// pointing at the DynamoDB config table.
pub fn streaming_command(cfg: &ConfigFile) -> Result<CommandSpec> {
    let service = &cfg.service;
    let jarfile = service
        .jarfile
        .as_deref()
        .ok_or_else(|| missing_key("service.jarfile"))?;
    let config_file = service
        .service_config_file
        .as_deref()
        .ok_or_else(|| missing_key("service.service_config_file"))?;

    let config_path = std::env::current_dir()?.join(config_file);

    let mut args = vec![
        "-jar".to_string(),
        format!("{}/{}", service.service_directory, jarfile),
        "--config".to_string(),
        config_path.display().to_string(),
    ];

    if service.service_name == "enrich" {
        let table = cfg
            .aws
            .dynamodb_config_table
            .as_deref()
            .ok_or_else(|| missing_key("aws.dynamodb_config_table"))?;
        let region = &cfg.aws.aws_region;
        args.extend([
            "--resolver".to_string(),
            format!("dynamodb:{region}/{table}/resolver"),
            "--enrichments".to_string(),
            format!("dynamodb:{region}/{table}/enrichment"),
        ]);
    }

    Ok(CommandSpec::new("java", args))
}

/// Build the command line for the batch loader, driven through the dataflow
/// runner from inside the downloaded config folder:
///
/// `<service_directory>/dataflow-runner run-transient --emr-config ./cluster.json --emr-playbook ./playbook.json`
///
/// The temporary credentials (when provided) are placed on the child's
/// environment for the runner to pick up.
pub fn snowflake_loader_command(
    cfg: &ConfigFile,
    creds: Option<&SessionCredentials>,
) -> Result<CommandSpec> {
    let service = &cfg.service;
    let config_folder = service
        .service_config_folder
        .as_deref()
        .ok_or_else(|| missing_key("service.service_config_folder"))?;

    let args = vec![
        "run-transient".to_string(),
        "--emr-config".to_string(),
        "./cluster.json".to_string(),
        "--emr-playbook".to_string(),
        "./playbook.json".to_string(),
    ];

    let mut spec = CommandSpec::new(
        format!("{}/dataflow-runner", service.service_directory),
        args,
    )
    .with_current_dir(config_folder);

    if let Some(creds) = creds {
        spec = spec.with_env(creds.as_env());
    }

    Ok(spec)
}
