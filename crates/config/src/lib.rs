//! Configuration management for the call assistant
//!
//! Supports loading configuration from:
//! - YAML/TOML files under `config/`
//! - Environment variables (CALL_AGENT_ prefix, `__` separator)
//!
//! Also hosts the boundary parsing for operator-edited call context
//! (`ContextUpdate`), which turns newline-delimited form text into the
//! trimmed line lists the engine expects.

pub mod context_update;
pub mod settings;

pub use context_update::{split_lines, ContextForm, ContextUpdate};
pub use settings::{
    load_settings, load_settings_from, CallDefaults, ObservabilityConfig, RuntimeEnvironment,
    ServerConfig, Settings,
};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        match err {
            config::ConfigError::NotFound(path) => ConfigError::FileNotFound(path),
            other => ConfigError::ParseError(other.to_string()),
        }
    }
}

impl From<call_agent_core::Error> for ConfigError {
    fn from(err: call_agent_core::Error) -> Self {
        match err {
            call_agent_core::Error::InvalidContext { field, message } => {
                ConfigError::InvalidValue { field, message }
            },
        }
    }
}
