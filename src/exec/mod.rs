// src/exec/mod.rs

//! Process execution layer.
//!
//! - [`command`] builds the immutable [`CommandSpec`] for each service shape
//!   from validated configuration.
//! - [`supervisor`] runs exactly one child process to completion, relaying
//!   its output through the classifier to a sink and reporting the outcome
//!   through a notifier.

pub mod command;
pub mod supervisor;

pub use command::{snowflake_loader_command, streaming_command, CommandSpec};
pub use supervisor::supervise;
