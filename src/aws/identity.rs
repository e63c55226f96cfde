// src/aws/identity.rs

//! Best-effort identity of the execution host, used as the per-run remote
//! log stream name.

use std::time::Duration;

use tracing::debug;

/// EC2 instance metadata endpoint for the instance id.
pub const METADATA_ENDPOINT: &str = "http://169.254.169.254/latest/meta-data/instance-id";

const METADATA_TIMEOUT: Duration = Duration::from_secs(2);

/// Query the metadata endpoint for the instance id, falling back to the
/// local hostname when the endpoint cannot be reached (not on EC2, or
/// metadata access disabled). Never fails.
pub async fn instance_id(endpoint: &str) -> String {
    match query_metadata(endpoint).await {
        Ok(id) => id,
        Err(err) => {
            debug!(error = %err, "instance metadata unavailable, using hostname");
            hostname()
        }
    }
}

async fn query_metadata(endpoint: &str) -> Result<String, reqwest::Error> {
    let client = reqwest::Client::builder()
        .timeout(METADATA_TIMEOUT)
        .build()?;
    let response = client.get(endpoint).send().await?.error_for_status()?;
    response.text().await
}

fn hostname() -> String {
    nix::unistd::gethostname()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|_| "unknown-host".to_string())
}
