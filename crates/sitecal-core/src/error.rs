//! Core error types for sitecal-core.
//!
//! Conflict detection itself never fails; malformed events are excluded
//! rather than reported. [`CoreError`] covers loading event files,
//! [`ConfigError`] the configuration file, and [`ValidationError`]
//! user-supplied values.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for sitecal-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Key does not exist in the configuration tree
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// A date argument could not be parsed
    #[error("Invalid date '{input}': expected YYYY-MM-DD")]
    InvalidDate { input: String },

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::ParseFailed(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_error_converts_into_core_error() {
        let err: CoreError = serde_json::from_str::<Vec<u32>>("{").unwrap_err().into();
        assert!(err.to_string().starts_with("JSON error:"));
    }

    #[test]
    fn invalid_date_message_names_input() {
        let err = ValidationError::InvalidDate {
            input: "03/01/2024".into(),
        };
        assert!(err.to_string().contains("03/01/2024"));
    }
}
