//! Error types for configuration loading and lookup

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Everything that can go wrong while resolving configuration.
///
/// Loading is expected to fail fast and loudly at startup; none of these are
/// recovered internally.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid value for parameter '{parameter}': {reason}")]
    Value { parameter: String, reason: String },

    #[error("parameter '{0}' not found and no default was given")]
    NotFound(String),
}

impl ConfigError {
    pub(crate) fn value(parameter: impl Into<String>, reason: impl Into<String>) -> Self {
        ConfigError::Value {
            parameter: parameter.into(),
            reason: reason.into(),
        }
    }
}
