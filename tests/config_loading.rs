// tests/config_loading.rs

use std::error::Error;
use std::io::Write;
use std::path::PathBuf;

use snowdaemon::config::{load_and_validate, SinkKind};
use snowdaemon::errors::SnowdaemonError;
use snowdaemon::relay::Level;
use snowdaemon_test_utils::init_tracing;

type TestResult = Result<(), Box<dyn Error>>;

fn testdata(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("testdata")
        .join(name)
}

#[test]
fn streaming_config_is_parsed_correctly() -> TestResult {
    init_tracing();

    let cfg = load_and_validate(testdata("streaming.yaml"))?;

    assert_eq!(cfg.service.service_name, "collector");
    assert_eq!(cfg.service.service_directory, "/opt/service");
    assert_eq!(cfg.service.jarfile.as_deref(), Some("collector-2.4.5.jar"));
    assert_eq!(
        cfg.service.service_config_file.as_deref(),
        Some("collector.hocon")
    );
    assert!(!cfg.service.is_batch());

    assert_eq!(cfg.aws.aws_region, "eu-west-1");
    assert_eq!(cfg.aws.s3_config_bucket, "acme-service-config");
    assert!(cfg.aws.dynamodb_config_table.is_none());

    assert_eq!(cfg.logging.sinks, vec![SinkKind::Stderr, SinkKind::Localfile]);
    assert_eq!(cfg.logging.min_level, Level::Info);

    Ok(())
}

#[test]
fn missing_logging_section_defaults_to_stderr_at_warn() -> TestResult {
    init_tracing();

    let cfg = load_and_validate(testdata("snowflake-loader.yaml"))?;

    assert!(cfg.service.is_batch());
    assert_eq!(
        cfg.service.service_config_folder.as_deref(),
        Some("snowflake-config")
    );
    assert_eq!(cfg.logging.sinks, vec![SinkKind::Stderr]);
    assert_eq!(cfg.logging.min_level, Level::Warn);

    Ok(())
}

#[test]
fn enrich_config_requires_and_carries_dynamodb_table() -> TestResult {
    init_tracing();

    let cfg = load_and_validate(testdata("enrich.yaml"))?;

    assert_eq!(cfg.service.service_name, "enrich");
    assert_eq!(cfg.aws.dynamodb_config_table.as_deref(), Some("service-config"));
    assert_eq!(cfg.logging.sinks, vec![SinkKind::Stderr, SinkKind::Cloudwatch]);

    Ok(())
}

#[test]
fn missing_required_key_is_a_config_error() {
    init_tracing();

    let err = load_and_validate(testdata("missing-jarfile.yaml")).unwrap_err();
    match err {
        SnowdaemonError::ConfigError(msg) => assert!(msg.contains("jarfile"), "got: {msg}"),
        other => panic!("expected ConfigError, got {other:?}"),
    }
}

#[test]
fn missing_config_file_maps_to_config_missing() {
    init_tracing();

    let err = load_and_validate(testdata("no-such-config.yaml")).unwrap_err();
    assert!(matches!(err, SnowdaemonError::ConfigMissing(_)));
    assert!(err.to_string().starts_with("Cannot find config file at "));
}

#[test]
fn malformed_yaml_is_a_yaml_error() -> TestResult {
    init_tracing();

    let mut file = tempfile::NamedTempFile::new()?;
    writeln!(file, "service: [unclosed")?;

    let err = load_and_validate(file.path()).unwrap_err();
    assert!(matches!(err, SnowdaemonError::YamlError(_)));

    Ok(())
}
