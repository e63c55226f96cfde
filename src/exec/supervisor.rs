// src/exec/supervisor.rs

//! Supervised run of exactly one child process.
//!
//! Lifecycle: NotStarted → Running → Exited(code). No retries, no timeout,
//! no cancellation. A hung child hangs the supervisor for as long as the
//! child lives; the surrounding daemon runs one job per invocation and
//! exits, so that is the intended behaviour.

use std::process::{ExitStatus, Stdio};

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::aws::sns::{Notifier, Topic};
use crate::errors::{Result, SnowdaemonError};
use crate::exec::command::CommandSpec;
use crate::relay::classify::{classify, Level, LogRecord};
use crate::relay::sink::LogSink;

/// Run the child described by `spec` to completion, relaying every line of
/// its output (stdout and stderr) through the classifier to `sink`, then
/// report the outcome through `notifier`.
///
/// Returns the child's exit code unchanged. On Unix a child killed by
/// signal N reports `128 + N` (so a SIGKILLed child reports 137).
///
/// Lines are drained until **both** pipes reach end of file, which happens
/// only once the child can produce no further output; the exit status is
/// consulted after that, so a line buffered just before exit is never
/// dropped.
///
/// If the child cannot be spawned at all this returns
/// [`SnowdaemonError::SpawnError`] and publishes nothing: there is no
/// running job to report on.
pub async fn supervise(
    spec: &CommandSpec,
    service_name: &str,
    sink: &dyn LogSink,
    notifier: &dyn Notifier,
) -> Result<i32> {
    info!(
        service = service_name,
        "launching service with command line: {spec}"
    );

    let mut cmd = Command::new(spec.program());
    cmd.args(spec.args())
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    for (key, value) in spec.env() {
        cmd.env(key, value);
    }
    if let Some(dir) = spec.current_dir() {
        cmd.current_dir(dir);
    }

    let mut child = cmd.spawn().map_err(|source| SnowdaemonError::SpawnError {
        service: service_name.to_string(),
        source,
    })?;

    // Both pipes feed one channel; the channel closes when both readers hit
    // EOF, so every buffered line is relayed before we look at the status.
    let (tx, mut rx) = mpsc::channel::<String>(64);
    if let Some(stdout) = child.stdout.take() {
        relay_lines(stdout, tx.clone());
    }
    if let Some(stderr) = child.stderr.take() {
        relay_lines(stderr, tx.clone());
    }
    drop(tx);

    while let Some(line) = rx.recv().await {
        if line.is_empty() {
            continue;
        }
        sink.log(&classify(&line));
    }

    let status = child.wait().await?;
    let code = exit_code(&status);

    if code == 0 {
        let msg = format!("{service_name} service has finished command with return code 0");
        sink.log(&LogRecord::new(Level::Info, msg.clone()));
        publish(notifier, Topic::Notification, &msg);
    } else {
        let msg =
            format!("{service_name} service has stopped with a non-zero return code: {code}");
        sink.log(&LogRecord::new(Level::Critical, msg.clone()));
        publish(notifier, Topic::Error, &msg);
    }

    Ok(code)
}

/// Read lines from one pipe and forward them to the relay channel until EOF.
///
/// Reads raw bytes rather than UTF-8 lines: services occasionally emit
/// binary garbage, and a single bad line must not close the read end of the
/// pipe (which would SIGPIPE an otherwise-healthy child) or stop the drain.
/// Invalid sequences are forwarded lossily instead.
fn relay_lines<R>(stream: R, tx: mpsc::Sender<String>)
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut reader = BufReader::new(stream);
        let mut buf = Vec::new();
        loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf).await {
                // EOF, or a real transport error: the pipe is done either way.
                Ok(0) | Err(_) => break,
                Ok(_) => {
                    while matches!(buf.last(), Some(b'\n' | b'\r')) {
                        buf.pop();
                    }
                    let line = String::from_utf8_lossy(&buf).into_owned();
                    if tx.send(line).await.is_err() {
                        break;
                    }
                }
            }
        }
    });
}

/// A notification failure degrades observability, not correctness: log it
/// and carry on so the exit code still propagates.
fn publish(notifier: &dyn Notifier, topic: Topic, message: &str) {
    if let Err(err) = notifier.publish(topic, message) {
        warn!(%topic, error = %err, "failed to publish run-outcome notification");
    }
}

fn exit_code(status: &ExitStatus) -> i32 {
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        status
            .code()
            .or_else(|| status.signal().map(|sig| 128 + sig))
            .unwrap_or(-1)
    }
    #[cfg(not(unix))]
    {
        status.code().unwrap_or(-1)
    }
}
