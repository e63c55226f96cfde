// src/aws/mod.rs

//! AWS collaborators: object-storage fetch, SNS notifications, temporary
//! credentials, instance identity and the CloudWatch log stream.
//!
//! There is no AWS SDK dependency; every call goes through the `aws` CLI as
//! a short-lived subprocess, which is the same ambient identity the
//! supervised services themselves use. The daemon-facing surfaces are
//! traits ([`s3::ConfigFetcher`], [`sns::Notifier`],
//! [`crate::relay::RemoteStream`]) so tests never touch the CLI.

pub mod cloudwatch;
pub mod credentials;
pub mod identity;
pub mod s3;
pub mod sns;

use std::process::Command;

use crate::errors::{Result, SnowdaemonError};

/// Run one `aws` CLI invocation to completion and return its stdout.
///
/// The region is passed via `AWS_DEFAULT_REGION` on the child environment
/// only; the daemon's own environment is never mutated.
pub(crate) fn run_aws(region: &str, args: &[String]) -> Result<String> {
    let output = Command::new("aws")
        .args(args)
        .env("AWS_DEFAULT_REGION", region)
        .output()
        .map_err(|err| SnowdaemonError::AwsCliError(format!("aws {}: {err}", args.join(" "))))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(SnowdaemonError::AwsCliError(format!(
            "aws {} exited with {}: {}",
            args.join(" "),
            output.status,
            stderr.trim()
        )));
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
