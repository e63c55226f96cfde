// src/relay/mod.rs

//! Log relay layer: classification of child output and the sinks it is
//! forwarded to.
//!
//! - [`classify`] maps one raw line of child output to a [`LogRecord`].
//! - [`sink`] defines the [`LogSink`] seam the supervisor writes to, plus
//!   the concrete sinks wired up in production.

pub mod classify;
pub mod sink;

pub use classify::{classify, Level, LogRecord};
pub use sink::{FanOutSink, LogSink, RemoteSink, RemoteStream, TracingSink};
