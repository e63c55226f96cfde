use std::sync::{Arc, Mutex};

use snowdaemon::aws::sns::{Notifier, Topic};
use snowdaemon::errors::Result;
use snowdaemon::relay::{LogRecord, LogSink};

/// A sink that records every forwarded record, for asserting on relayed
/// child output in tests.
#[derive(Default, Clone)]
pub struct RecordingSink {
    records: Arc<Mutex<Vec<LogRecord>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<LogRecord> {
        self.records.lock().unwrap().clone()
    }
}

impl LogSink for RecordingSink {
    fn log(&self, record: &LogRecord) {
        self.records.lock().unwrap().push(record.clone());
    }
}

/// A notifier that records every published (topic, message) pair instead of
/// touching SNS.
#[derive(Default, Clone)]
pub struct RecordingNotifier {
    published: Arc<Mutex<Vec<(Topic, String)>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn published(&self) -> Vec<(Topic, String)> {
        self.published.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn publish(&self, topic: Topic, message: &str) -> Result<()> {
        self.published
            .lock()
            .unwrap()
            .push((topic, message.to_string()));
        Ok(())
    }
}

/// A notifier whose publishes always fail, for checking that notification
/// failures never suppress exit-code propagation.
pub struct FailingNotifier;

impl Notifier for FailingNotifier {
    fn publish(&self, _topic: Topic, _message: &str) -> Result<()> {
        Err(anyhow::anyhow!("notifier unavailable").into())
    }
}
