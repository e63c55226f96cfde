// src/logging.rs

//! Logging setup for `snowdaemon` using `tracing` + `tracing-subscriber`.
//!
//! Priority for determining the log level:
//! 1. `--log-level` CLI flag (if provided)
//! 2. `SNOWDAEMON_LOG` environment variable (e.g. "info", "debug")
//! 3. `logging.min_level` from the config file (default WARN)
//!
//! The `logging.sinks` list selects the outputs: `stderr`, `localfile`
//! (size-rotated, so the daemon never fills the disk on a long-running
//! service), or both. The `cloudwatch` sink is wired separately as a
//! [`crate::relay::RemoteSink`] because it carries per-record severity
//! rather than formatted subscriber output.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::Result;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::cli::LogLevel;
use crate::config::{LoggingSection, SinkKind};
use crate::relay::Level;

/// Local log file name, rotated in place.
pub const LOG_FILE: &str = "snowdaemon.log";
/// Rotation threshold.
pub const MAX_LOG_BYTES: u64 = 500_000;
/// Number of rotated backups kept (`snowdaemon.log.1` .. `.3`).
pub const LOG_BACKUPS: usize = 3;

/// Initialise the global logging subscriber.
///
/// Safe to call once at startup.
pub fn init_logging(cfg: &LoggingSection, cli_level: Option<LogLevel>) -> Result<()> {
    let directive = match cli_level {
        Some(lvl) => directive_from_cli(lvl).to_string(),
        None => std::env::var("SNOWDAEMON_LOG")
            .ok()
            .unwrap_or_else(|| directive_from_min_level(cfg.min_level).to_string()),
    };
    let filter = EnvFilter::new(directive);

    let stderr_layer = cfg
        .sinks
        .contains(&SinkKind::Stderr)
        .then(|| fmt::layer().with_writer(io::stderr).with_target(true));

    let file_layer = if cfg.sinks.contains(&SinkKind::Localfile) {
        let writer = RotatingFileWriter::create(PathBuf::from(LOG_FILE), MAX_LOG_BYTES, LOG_BACKUPS)?;
        Some(
            fmt::layer()
                .with_ansi(false)
                .with_target(true)
                .with_writer(Mutex::new(writer)),
        )
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()?;

    Ok(())
}

fn directive_from_cli(lvl: LogLevel) -> &'static str {
    match lvl {
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
        LogLevel::Trace => "trace",
    }
}

fn directive_from_min_level(level: Level) -> &'static str {
    match level {
        Level::Debug => "debug",
        Level::Info => "info",
        Level::Warn => "warn",
        // tracing has no CRITICAL level.
        Level::Error | Level::Critical => "error",
    }
}

/// Size-rotated log file writer: once the live file would exceed
/// `max_bytes`, backups shift up (`.1` → `.2` → ...) and the live file is
/// reopened empty.
pub struct RotatingFileWriter {
    path: PathBuf,
    max_bytes: u64,
    backups: usize,
    file: File,
    written: u64,
}

impl RotatingFileWriter {
    pub fn create(path: PathBuf, max_bytes: u64, backups: usize) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let written = file.metadata()?.len();
        Ok(Self {
            path,
            max_bytes,
            backups,
            file,
            written,
        })
    }

    fn rotate(&mut self) -> io::Result<()> {
        self.file.flush()?;

        if self.backups > 0 {
            for i in (1..self.backups).rev() {
                let from = backup_path(&self.path, i);
                if from.exists() {
                    fs::rename(&from, backup_path(&self.path, i + 1))?;
                }
            }
            fs::rename(&self.path, backup_path(&self.path, 1))?;
        } else {
            fs::remove_file(&self.path)?;
        }

        self.file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        self.written = 0;
        Ok(())
    }
}

impl Write for RotatingFileWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.written > 0 && self.written + buf.len() as u64 > self.max_bytes {
            self.rotate()?;
        }
        let n = self.file.write(buf)?;
        self.written += n as u64;
        // A single record larger than the threshold goes through whole, but
        // rotates immediately so the live file is capped again afterwards.
        if self.written > self.max_bytes {
            self.rotate()?;
        }
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

fn backup_path(path: &Path, index: usize) -> PathBuf {
    PathBuf::from(format!("{}.{index}", path.display()))
}
