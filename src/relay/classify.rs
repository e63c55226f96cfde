// src/relay/classify.rs

//! Classification of raw child-process output lines.
//!
//! The supervised services emit three irregular log formats:
//!
//! - `[main] INFO some message` — JVM main-thread lines.
//! - `Error: something broke` — bare error lines.
//! - `time=... level=... msg="..."` — structured key=value lines from the
//!   dataflow runner.
//!
//! Anything else is forwarded at WARN so unexpected output is never hidden.
//!
//! The classifier is an ordered table of (predicate, extractor) rules
//! evaluated in fixed priority order; the first matching rule wins. It is a
//! pure function: same line in, same record out, no side effects.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

/// Closed severity set shared by the classifier, the sinks, and the
/// `min_level` configuration key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Level {
    Debug,
    Info,
    Warn,
    Error,
    Critical,
}

impl Level {
    /// Canonical token, as it appears in service output and config files.
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
            Level::Critical => "CRITICAL",
        }
    }

    /// Case-sensitive lookup against the canonical tokens.
    ///
    /// Used for the `[main]` form, where the services emit upper-case tokens
    /// and anything else is treated as unrecognized.
    pub fn from_token(token: &str) -> Option<Level> {
        match token {
            "DEBUG" => Some(Level::Debug),
            "INFO" => Some(Level::Info),
            "WARN" => Some(Level::Warn),
            "ERROR" => Some(Level::Error),
            "CRITICAL" => Some(Level::Critical),
            _ => None,
        }
    }

    /// Case-insensitive lookup, used for the structured `level=` form where
    /// the runner emits lower-case tokens.
    pub fn from_token_ci(token: &str) -> Option<Level> {
        Level::from_token(token.to_uppercase().as_str())
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One classified line of child output: a severity and a message.
///
/// Ephemeral; produced per line and consumed immediately by a sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub level: Level,
    pub message: String,
}

impl LogRecord {
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }
}

/// One classification rule: a cheap prefix predicate and the extractor that
/// runs when the predicate matches.
struct Rule {
    applies: fn(&str) -> bool,
    extract: fn(&str) -> LogRecord,
}

/// Rules in priority order. The fallback (WARN, whole line) is the last
/// entry, so the table is total.
const RULES: &[Rule] = &[
    Rule {
        applies: is_main_thread_line,
        extract: extract_main_thread,
    },
    Rule {
        applies: is_error_line,
        extract: extract_error,
    },
    Rule {
        applies: is_structured_line,
        extract: extract_structured,
    },
    Rule {
        applies: |_| true,
        extract: extract_fallback,
    },
];

/// Classify one raw line of child output (no trailing newline).
///
/// Callers treat empty lines as "no output" and do not pass them here, but
/// the function is total regardless.
pub fn classify(line: &str) -> LogRecord {
    let rule = RULES
        .iter()
        .find(|rule| (rule.applies)(line))
        .unwrap_or(&RULES[RULES.len() - 1]);
    (rule.extract)(line)
}

fn is_main_thread_line(line: &str) -> bool {
    line.starts_with("[main]")
}

fn is_error_line(line: &str) -> bool {
    line.starts_with("Error")
}

fn is_structured_line(line: &str) -> bool {
    line.starts_with("time=")
}

/// `[main] WARN some message` → split into at most three space-separated
/// fields: marker, severity token (case-sensitive, default INFO), remainder.
fn extract_main_thread(line: &str) -> LogRecord {
    let mut parts = line.splitn(3, ' ');
    let _marker = parts.next();
    let level = parts
        .next()
        .and_then(Level::from_token)
        .unwrap_or(Level::Info);
    let message = parts.next().unwrap_or("");
    LogRecord::new(level, message)
}

/// `Error: something broke` → ERROR, with the first 7 characters of the line
/// stripped off the message.
fn extract_error(line: &str) -> LogRecord {
    let message: String = line.chars().skip(7).collect();
    LogRecord::new(Level::Error, message)
}

static LEVEL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"level=([^ ]+)").expect("static regex"));
static MSG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"msg="([^"]+)"#).expect("static regex"));

/// `time=... level=error msg="disk full"` → severity from the `level=`
/// fragment (case-insensitive, default INFO), message from the `msg="`
/// fragment (default: the whole raw line).
fn extract_structured(line: &str) -> LogRecord {
    let level = LEVEL_RE
        .captures(line)
        .and_then(|caps| caps.get(1))
        .and_then(|token| Level::from_token_ci(token.as_str()))
        .unwrap_or(Level::Info);

    let message = MSG_RE
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .unwrap_or(line);

    LogRecord::new(level, message)
}

/// Unrecognized output is forwarded verbatim at WARN.
fn extract_fallback(line: &str) -> LogRecord {
    LogRecord::new(Level::Warn, line)
}
