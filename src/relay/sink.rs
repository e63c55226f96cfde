// src/relay/sink.rs

//! Log sinks the supervisor forwards classified records to.
//!
//! The supervisor talks to a [`LogSink`] instead of a concrete logger. This
//! makes it easy to swap in a recording sink in tests while keeping the
//! production wiring (tracing subscriber + optional remote stream) here.
//!
//! Sink failures are best-effort by design: a sink that cannot deliver a
//! record logs the problem and drops it. A broken sink degrades
//! observability but must never change the supervisor's exit code.

use tracing::{debug, error, info, warn};

use crate::errors::Result;
use crate::relay::classify::{Level, LogRecord};

/// Destination for classified child-output records.
pub trait LogSink: Send + Sync {
    /// Forward one record. Implementations swallow their own delivery
    /// failures.
    fn log(&self, record: &LogRecord);
}

/// Production sink: forwards records into the `tracing` subscriber, which
/// fans out to stderr and/or the rotating local file depending on how
/// [`crate::logging::init_logging`] was configured.
pub struct TracingSink;

impl LogSink for TracingSink {
    fn log(&self, record: &LogRecord) {
        let message = record.message.as_str();
        match record.level {
            Level::Debug => debug!(target: "service", "{message}"),
            Level::Info => info!(target: "service", "{message}"),
            Level::Warn => warn!(target: "service", "{message}"),
            Level::Error => error!(target: "service", "{message}"),
            // tracing has no CRITICAL; keep the token visible in the event.
            Level::Critical => error!(target: "service", severity = "CRITICAL", "{message}"),
        }
    }
}

/// A remote log-aggregation stream, keyed by a per-run stream identifier
/// chosen at construction time. Implemented over the `aws logs` CLI in
/// production ([`crate::aws::cloudwatch::CloudWatchStream`]).
pub trait RemoteStream: Send + Sync {
    fn put(&self, level: Level, message: &str) -> Result<()>;
}

/// Adapter turning any [`RemoteStream`] into a [`LogSink`], with a minimum
/// severity gate. Delivery failures are logged locally and dropped.
pub struct RemoteSink<S> {
    stream: S,
    min_level: Level,
}

impl<S: RemoteStream> RemoteSink<S> {
    pub fn new(stream: S, min_level: Level) -> Self {
        Self { stream, min_level }
    }
}

impl<S: RemoteStream> LogSink for RemoteSink<S> {
    fn log(&self, record: &LogRecord) {
        if record.level < self.min_level {
            return;
        }
        if let Err(err) = self.stream.put(record.level, &record.message) {
            warn!(error = %err, "failed to forward record to remote log stream");
        }
    }
}

/// Forwards every record to each member sink, in order.
pub struct FanOutSink {
    sinks: Vec<Box<dyn LogSink>>,
}

impl FanOutSink {
    pub fn new(sinks: Vec<Box<dyn LogSink>>) -> Self {
        Self { sinks }
    }
}

impl LogSink for FanOutSink {
    fn log(&self, record: &LogRecord) {
        for sink in &self.sinks {
            sink.log(record);
        }
    }
}
