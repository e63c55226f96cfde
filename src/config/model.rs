// src/config/model.rs

use serde::Deserialize;

use crate::relay::Level;

/// Top-level configuration as read from the YAML file, before validation.
///
/// Maps a file like:
///
/// ```yaml
/// service:
///   service_name: enrich
///   service_directory: /opt/service
///   jarfile: enrich-1.2.3.jar
///   service_config_file: enrich.hocon
///
/// aws:
///   aws_region: eu-west-1
///   s3_config_bucket: my-config-bucket
///   dynamodb_config_table: service-config
///   sns:
///     notification_arn: arn:aws:sns:eu-west-1:123456789012:notification
///     error_arn: arn:aws:sns:eu-west-1:123456789012:error
///
/// logging:
///   sinks: [stderr, localfile]
///   min_level: INFO
/// ```
///
/// The `logging` section is optional; the default is stderr at WARN.
#[derive(Debug, Clone, Deserialize)]
pub struct RawConfigFile {
    pub service: ServiceSection,
    pub aws: AwsSection,
    #[serde(default)]
    pub logging: LoggingSection,
}

/// Validated configuration. Constructed once at startup and passed by
/// reference into every component that needs it; never mutated afterwards.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub service: ServiceSection,
    pub aws: AwsSection,
    pub logging: LoggingSection,
}

impl ConfigFile {
    /// Used by `TryFrom<RawConfigFile>` after validation has passed.
    pub fn new_unchecked(
        service: ServiceSection,
        aws: AwsSection,
        logging: LoggingSection,
    ) -> Self {
        Self {
            service,
            aws,
            logging,
        }
    }
}

/// `service:` section — which service to run and where its pieces live.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceSection {
    /// Human-readable service name, also used as the S3 key prefix and in
    /// notification subjects. The name `snowflake_loader` selects the batch
    /// path; the name `enrich` adds resolver/enrichment locators to the
    /// command line.
    pub service_name: String,

    /// Directory holding the service jar (streaming) or the dataflow-runner
    /// binary (batch).
    pub service_directory: String,

    /// Jar filename for streaming services.
    #[serde(default)]
    pub jarfile: Option<String>,

    /// Config filename downloaded for streaming services.
    #[serde(default)]
    pub service_config_file: Option<String>,

    /// Config folder downloaded (recursively) for the batch loader; also the
    /// child's working directory.
    #[serde(default)]
    pub service_config_folder: Option<String>,
}

impl ServiceSection {
    /// The batch loader is the one service driven through the dataflow
    /// runner instead of `java -jar`.
    pub fn is_batch(&self) -> bool {
        self.service_name == "snowflake_loader"
    }
}

/// `aws:` section.
#[derive(Debug, Clone, Deserialize)]
pub struct AwsSection {
    pub aws_region: String,
    pub s3_config_bucket: String,

    /// DynamoDB table holding resolver/enrichment config; required only for
    /// the `enrich` service.
    #[serde(default)]
    pub dynamodb_config_table: Option<String>,

    pub sns: SnsSection,
}

/// `aws.sns:` — topic ARNs for run-outcome notifications.
#[derive(Debug, Clone, Deserialize)]
pub struct SnsSection {
    pub notification_arn: String,
    pub error_arn: String,
}

/// `logging:` section — which sinks are active and the minimum severity.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSection {
    #[serde(default = "default_sinks")]
    pub sinks: Vec<SinkKind>,

    #[serde(default = "default_min_level")]
    pub min_level: Level,
}

fn default_sinks() -> Vec<SinkKind> {
    vec![SinkKind::Stderr]
}

fn default_min_level() -> Level {
    Level::Warn
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            sinks: default_sinks(),
            min_level: default_min_level(),
        }
    }
}

/// One entry in `logging.sinks`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SinkKind {
    Stderr,
    Localfile,
    Cloudwatch,
}
