//! Error types for qc-core

use thiserror::Error;

/// Core error type for emrqc
#[derive(Error, Debug)]
pub enum CoreError {
    /// E001: Configuration file not found
    #[error("[E001] Config file not found: {path}")]
    ConfigNotFound { path: String },

    /// E002: Failed to parse configuration file
    #[error("[E002] Failed to parse config: {message}")]
    ConfigParseError { message: String },

    /// E003: Invalid configuration value
    #[error("[E003] Invalid config: {message}")]
    ConfigInvalid { message: String },

    /// E004: Record family definition is invalid
    #[error("[E004] Invalid record family '{name}': {reason}")]
    InvalidFamily { name: String, reason: String },

    /// E005: Duplicate record family name
    #[error("[E005] Duplicate record family name: {name}")]
    DuplicateFamily { name: String },

    /// E006: I/O error with file path context
    #[error("[E006] I/O error on {path}: {source}")]
    IoWithPath {
        path: String,
        source: std::io::Error,
    },
}

impl From<serde_yaml::Error> for CoreError {
    fn from(err: serde_yaml::Error) -> Self {
        CoreError::ConfigParseError {
            message: err.to_string(),
        }
    }
}

/// Result type alias for [`CoreError`]
pub type CoreResult<T> = Result<T, CoreError>;
