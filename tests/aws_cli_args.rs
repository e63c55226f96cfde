// tests/aws_cli_args.rs
//
// The AWS collaborators are thin shells over the `aws` CLI; the argument
// builders are the part worth pinning down.

use std::path::Path;

use snowdaemon::aws::cloudwatch::put_events_args;
use snowdaemon::aws::s3::{copy_file_args, copy_folder_args};
use snowdaemon::aws::sns::publish_args;

#[test]
fn s3_file_copy_addresses_bucket_and_key() {
    let args = copy_file_args(
        "acme-service-config",
        "collector/collector.hocon",
        Path::new("/work/collector.hocon"),
    );
    assert_eq!(
        args,
        [
            "s3",
            "cp",
            "s3://acme-service-config/collector/collector.hocon",
            "/work/collector.hocon"
        ]
    );
}

#[test]
fn s3_folder_copy_is_recursive_and_preserves_prefix() {
    let args = copy_folder_args("acme-service-config", "snowflake-config");
    assert_eq!(
        args,
        [
            "s3",
            "cp",
            "--recursive",
            "s3://acme-service-config/snowflake-config",
            "snowflake-config"
        ]
    );
}

#[test]
fn sns_publish_carries_arn_subject_and_message() {
    let args = publish_args(
        "arn:aws:sns:eu-west-1:123456789012:service-error",
        "snowdaemon service collector error",
        "collector service has stopped with a non-zero return code: 137",
    );
    assert_eq!(args[0], "sns");
    assert_eq!(args[1], "publish");
    assert_eq!(args[2], "--target-arn");
    assert_eq!(args[3], "arn:aws:sns:eu-west-1:123456789012:service-error");
    assert_eq!(args[5], "snowdaemon service collector error");
    assert!(args[7].contains("137"));
}

#[test]
fn log_events_are_addressed_to_group_and_stream() {
    let args = put_events_args(
        "snowdaemon-collector",
        "i-1234567890abcdef0",
        r#"[{"timestamp":1,"message":"WARN boom"}]"#,
    );
    assert_eq!(args[0], "logs");
    assert_eq!(args[1], "put-log-events");
    assert_eq!(args[3], "snowdaemon-collector");
    assert_eq!(args[5], "i-1234567890abcdef0");
    assert!(args[7].contains("WARN boom"));
}
