// src/config/mod.rs

//! Daemon configuration: YAML model, loading, validation.

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_and_validate, load_from_path};
pub use model::{
    AwsSection, ConfigFile, LoggingSection, RawConfigFile, ServiceSection, SinkKind, SnsSection,
};
