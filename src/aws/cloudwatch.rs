// src/aws/cloudwatch.rs

//! CloudWatch-backed remote log stream.

use std::time::{SystemTime, UNIX_EPOCH};

use tracing::debug;

use crate::aws::run_aws;
use crate::errors::Result;
use crate::relay::classify::Level;
use crate::relay::sink::RemoteStream;

/// One log stream per run, named after the instance identity, in a log
/// group named after the service.
pub struct CloudWatchStream {
    region: String,
    log_group: String,
    stream_name: String,
}

impl CloudWatchStream {
    pub fn new(
        region: impl Into<String>,
        service_name: &str,
        stream_name: impl Into<String>,
    ) -> Self {
        Self {
            region: region.into(),
            log_group: format!("snowdaemon-{service_name}"),
            stream_name: stream_name.into(),
        }
    }

    /// Create the stream up front. Best-effort: the call fails when the
    /// stream already exists, which is fine.
    pub fn ensure(&self) {
        let args = vec![
            "logs".to_string(),
            "create-log-stream".to_string(),
            "--log-group-name".to_string(),
            self.log_group.clone(),
            "--log-stream-name".to_string(),
            self.stream_name.clone(),
        ];
        if let Err(err) = run_aws(&self.region, &args) {
            debug!(error = %err, "create-log-stream skipped");
        }
    }
}

impl RemoteStream for CloudWatchStream {
    fn put(&self, level: Level, message: &str) -> Result<()> {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);

        let events = serde_json::json!([{
            "timestamp": timestamp,
            "message": format!("{level} {message}"),
        }]);

        run_aws(
            &self.region,
            &put_events_args(&self.log_group, &self.stream_name, &events.to_string()),
        )?;
        Ok(())
    }
}

/// `aws logs put-log-events --log-group-name <group> --log-stream-name <stream> --log-events <json>`
pub fn put_events_args(group: &str, stream: &str, events_json: &str) -> Vec<String> {
    vec![
        "logs".to_string(),
        "put-log-events".to_string(),
        "--log-group-name".to_string(),
        group.to_string(),
        "--log-stream-name".to_string(),
        stream.to_string(),
        "--log-events".to_string(),
        events_json.to_string(),
    ]
}
