//! Error types for Sitewise operations.
//!
//! This module defines [`SitewiseError`], the error type used by the
//! configuration and CLI layers, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Detection and path resolution never fail; missing data degrades to defaults
//! - Use `SitewiseError` for config loading problems the caller must act on
//! - Use `anyhow::Error` (via `SitewiseError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for Sitewise operations.
#[derive(Debug, Error)]
pub enum SitewiseError {
    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid configuration structure or values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// An explicitly requested environment is not declared in the config.
    #[error("Unknown environment: {name}")]
    UnknownEnvironment { name: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for Sitewise operations.
pub type Result<T> = std::result::Result<T, SitewiseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_not_found_displays_path() {
        let err = SitewiseError::ConfigNotFound {
            path: PathBuf::from("/site/.sitewise/config.yml"),
        };
        assert!(err.to_string().contains("/site/.sitewise/config.yml"));
    }

    #[test]
    fn config_parse_error_displays_path_and_message() {
        let err = SitewiseError::ConfigParseError {
            path: PathBuf::from("/config.yml"),
            message: "invalid syntax".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("/config.yml"));
        assert!(msg.contains("invalid syntax"));
    }

    #[test]
    fn config_validation_error_displays_message() {
        let err = SitewiseError::ConfigValidationError {
            message: "protocol must be http or https".into(),
        };
        assert!(err.to_string().contains("protocol must be http or https"));
    }

    #[test]
    fn unknown_environment_displays_name() {
        let err = SitewiseError::UnknownEnvironment {
            name: "qa".into(),
        };
        assert_eq!(err.to_string(), "Unknown environment: qa");
    }

    #[test]
    fn io_error_converts_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: SitewiseError = io_err.into();
        assert!(matches!(err, SitewiseError::Io(_)));
    }

    #[test]
    fn anyhow_error_converts() {
        let err: SitewiseError = anyhow::anyhow!("boom").into();
        assert!(matches!(err, SitewiseError::Other(_)));
        assert_eq!(err.to_string(), "boom");
    }
}
