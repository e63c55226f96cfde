// tests/supervisor_lifecycle.rs
//
// End-to-end supervision tests against real child processes (`sh`), with
// recording fakes standing in for the SNS notifier and the log sinks.

use snowdaemon::aws::sns::Topic;
use snowdaemon::errors::SnowdaemonError;
use snowdaemon::exec::{supervise, CommandSpec};
use snowdaemon::relay::Level;
use snowdaemon_test_utils::{
    init_tracing, with_timeout, FailingNotifier, RecordingNotifier, RecordingSink,
};

fn shell(script: &str) -> CommandSpec {
    CommandSpec::new("sh", vec!["-c".to_string(), script.to_string()])
}

#[tokio::test]
async fn clean_exit_relays_every_line_and_notifies_once() {
    init_tracing();
    let sink = RecordingSink::new();
    let notifier = RecordingNotifier::new();

    let spec = shell(
        "printf '[main] INFO starting up\\n'; \
         printf 'Error: transient glitch\\n'; \
         printf 'plain output\\n'",
    );

    let code = with_timeout(supervise(&spec, "collector", &sink, &notifier))
        .await
        .expect("supervise should succeed");
    assert_eq!(code, 0);

    let records = sink.records();
    // Three child lines plus the completion message.
    assert_eq!(records.len(), 4);
    assert_eq!(records[0].level, Level::Info);
    assert_eq!(records[0].message, "starting up");
    assert_eq!(records[1].level, Level::Error);
    assert_eq!(records[1].message, "transient glitch");
    assert_eq!(records[2].level, Level::Warn);
    assert_eq!(records[2].message, "plain output");

    let completion = &records[3];
    assert_eq!(completion.level, Level::Info);
    assert_eq!(
        completion.message,
        "collector service has finished command with return code 0"
    );

    let published = notifier.published();
    assert_eq!(published.len(), 1);
    assert_eq!(published[0].0, Topic::Notification);
    assert_eq!(published[0].1, completion.message);
}

#[tokio::test]
async fn nonzero_exit_logs_critical_and_notifies_error_topic() {
    init_tracing();
    let sink = RecordingSink::new();
    let notifier = RecordingNotifier::new();

    let spec = shell("printf 'going down\\n'; exit 42");

    let code = with_timeout(supervise(&spec, "collector", &sink, &notifier))
        .await
        .expect("supervise should succeed even when the child fails");
    assert_eq!(code, 42);

    let records = sink.records();
    let failure = records.last().expect("failure record");
    assert_eq!(failure.level, Level::Critical);
    assert!(failure.message.contains("42"), "got: {}", failure.message);
    assert!(failure.message.contains("non-zero return code"));

    let published = notifier.published();
    assert_eq!(published.len(), 1);
    assert_eq!(published[0].0, Topic::Error);
}

#[tokio::test]
async fn sigkilled_child_reports_137() {
    init_tracing();
    let sink = RecordingSink::new();
    let notifier = RecordingNotifier::new();

    let spec = shell("kill -9 $$");

    let code = with_timeout(supervise(&spec, "collector", &sink, &notifier))
        .await
        .expect("supervise should succeed");
    assert_eq!(code, 137);

    let failure = sink.records().last().cloned().expect("failure record");
    assert_eq!(failure.level, Level::Critical);
    assert!(failure.message.contains("137"));

    assert_eq!(notifier.published()[0].0, Topic::Error);
}

#[tokio::test]
async fn final_line_before_exit_is_never_dropped() {
    init_tracing();
    let sink = RecordingSink::new();
    let notifier = RecordingNotifier::new();

    // No trailing newline, immediately followed by a failing exit.
    let spec = shell("printf 'last words'; exit 5");

    let code = with_timeout(supervise(&spec, "collector", &sink, &notifier))
        .await
        .expect("supervise should succeed");
    assert_eq!(code, 5);

    let records = sink.records();
    assert!(
        records
            .iter()
            .any(|r| r.level == Level::Warn && r.message == "last words"),
        "final line must be relayed before the outcome is reported, got {records:?}"
    );
}

#[tokio::test]
async fn stderr_lines_are_relayed_through_the_same_classifier() {
    init_tracing();
    let sink = RecordingSink::new();
    let notifier = RecordingNotifier::new();

    let spec = shell("echo 'stdout line'; echo 'Error: broken pipe' 1>&2");

    let code = with_timeout(supervise(&spec, "collector", &sink, &notifier))
        .await
        .expect("supervise should succeed");
    assert_eq!(code, 0);

    let records = sink.records();
    assert!(records
        .iter()
        .any(|r| r.level == Level::Warn && r.message == "stdout line"));
    assert!(records
        .iter()
        .any(|r| r.level == Level::Error && r.message == "broken pipe"));
}

#[tokio::test]
async fn non_utf8_output_does_not_abort_the_relay() {
    init_tracing();
    let sink = RecordingSink::new();
    let notifier = RecordingNotifier::new();

    // One binary-garbage line, a pause long enough for the bad line to be
    // consumed, then a valid line. The child must survive its later write
    // and the run must still be reported as clean.
    let spec = shell("printf '\\377\\376 garbage\\n'; sleep 0.2; printf 'after the noise\\n'");

    let code = with_timeout(supervise(&spec, "collector", &sink, &notifier))
        .await
        .expect("supervise should succeed");
    assert_eq!(code, 0);

    let records = sink.records();
    // Garbage line (forwarded lossily), valid line, completion message.
    assert_eq!(records.len(), 3);
    assert!(
        records[0].message.ends_with("garbage"),
        "bad line must be relayed lossily, got {:?}",
        records[0].message
    );
    assert!(records
        .iter()
        .any(|r| r.level == Level::Warn && r.message == "after the noise"));

    assert_eq!(notifier.published()[0].0, Topic::Notification);
}

#[tokio::test]
async fn empty_lines_are_not_classified() {
    init_tracing();
    let sink = RecordingSink::new();
    let notifier = RecordingNotifier::new();

    let spec = shell("printf '\\n\\n[main] INFO hello\\n\\n'");

    with_timeout(supervise(&spec, "collector", &sink, &notifier))
        .await
        .expect("supervise should succeed");

    let records = sink.records();
    // One classified child line plus the completion message.
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].message, "hello");
}

#[tokio::test]
async fn unspawnable_command_is_fatal_and_publishes_nothing() {
    init_tracing();
    let sink = RecordingSink::new();
    let notifier = RecordingNotifier::new();

    let spec = CommandSpec::new("/no/such/binary-anywhere", vec![]);

    let err = with_timeout(supervise(&spec, "collector", &sink, &notifier))
        .await
        .expect_err("spawn must fail");
    assert!(matches!(err, SnowdaemonError::SpawnError { .. }));

    assert!(sink.records().is_empty());
    assert!(notifier.published().is_empty());
}

#[tokio::test]
async fn notifier_failure_does_not_change_the_exit_code() {
    init_tracing();
    let sink = RecordingSink::new();

    let spec = shell("exit 7");

    let code = with_timeout(supervise(&spec, "collector", &sink, &FailingNotifier))
        .await
        .expect("notifier failure must not become a supervisor error");
    assert_eq!(code, 7);

    // The critical failure record still reached the sink.
    assert_eq!(sink.records().last().map(|r| r.level), Some(Level::Critical));
}
