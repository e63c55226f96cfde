// src/aws/credentials.rs

//! Temporary credentials for the batch child process.
//!
//! The dataflow runner expects the three canonical credential variables on
//! its environment. They are resolved from the ambient caller identity via
//! `aws configure export-credentials` and placed on the child's
//! [`crate::exec::CommandSpec`] instead of the daemon's own environment.

use serde::Deserialize;

use crate::aws::run_aws;
use crate::errors::{Result, SnowdaemonError};

/// Parsed output of `aws configure export-credentials --format process`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SessionCredentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    /// Absent for long-term (non-session) credentials.
    #[serde(default)]
    pub session_token: Option<String>,
}

impl SessionCredentials {
    /// Environment entries for the child process.
    pub fn as_env(&self) -> Vec<(String, String)> {
        let mut env = vec![
            ("AWS_ACCESS_KEY_ID".to_string(), self.access_key_id.clone()),
            (
                "AWS_SECRET_ACCESS_KEY".to_string(),
                self.secret_access_key.clone(),
            ),
        ];
        if let Some(token) = &self.session_token {
            env.push(("AWS_SESSION_TOKEN".to_string(), token.clone()));
        }
        env
    }
}

/// Resolve the ambient identity's credentials.
pub fn export_credentials(region: &str) -> Result<SessionCredentials> {
    let stdout = run_aws(
        region,
        &[
            "configure".to_string(),
            "export-credentials".to_string(),
            "--format".to_string(),
            "process".to_string(),
        ],
    )?;

    let creds: SessionCredentials = serde_json::from_str(&stdout).map_err(|err| {
        SnowdaemonError::AwsCliError(format!("unparseable export-credentials output: {err}"))
    })?;

    Ok(creds)
}
