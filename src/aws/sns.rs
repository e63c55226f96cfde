// src/aws/sns.rs

//! Run-outcome notifications.

use std::fmt;

use crate::aws::run_aws;
use crate::config::ConfigFile;
use crate::errors::Result;

/// The two outcome channels. Selected by the supervisor from the child's
/// exit code; no other topics exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topic {
    Notification,
    Error,
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Topic::Notification => f.write_str("notification"),
            Topic::Error => f.write_str("error"),
        }
    }
}

/// Publishes one message per run outcome. Fire-and-forget: the supervisor
/// does not await delivery confirmation.
pub trait Notifier: Send + Sync {
    fn publish(&self, topic: Topic, message: &str) -> Result<()>;
}

/// Production notifier over `aws sns publish`.
pub struct SnsNotifier {
    region: String,
    service_name: String,
    notification_arn: String,
    error_arn: String,
}

impl SnsNotifier {
    pub fn from_config(cfg: &ConfigFile) -> Self {
        Self {
            region: cfg.aws.aws_region.clone(),
            service_name: cfg.service.service_name.clone(),
            notification_arn: cfg.aws.sns.notification_arn.clone(),
            error_arn: cfg.aws.sns.error_arn.clone(),
        }
    }

    fn arn_for(&self, topic: Topic) -> &str {
        match topic {
            Topic::Notification => &self.notification_arn,
            Topic::Error => &self.error_arn,
        }
    }
}

impl Notifier for SnsNotifier {
    fn publish(&self, topic: Topic, message: &str) -> Result<()> {
        let subject = format!("snowdaemon service {} {topic}", self.service_name);
        run_aws(
            &self.region,
            &publish_args(self.arn_for(topic), &subject, message),
        )?;
        Ok(())
    }
}

/// `aws sns publish --target-arn <arn> --subject <subject> --message <message>`
pub fn publish_args(arn: &str, subject: &str, message: &str) -> Vec<String> {
    vec![
        "sns".to_string(),
        "publish".to_string(),
        "--target-arn".to_string(),
        arn.to_string(),
        "--subject".to_string(),
        subject.to_string(),
        "--message".to_string(),
        message.to_string(),
    ]
}
