//! Error types for srs-mgmt
//!
//! Uses `thiserror` for ergonomic error definitions with automatic `Display` and `Error` impls.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for srs-mgmt
#[derive(Error, Debug)]
pub enum Error {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised by the dotenv-style configuration store
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid key '{key}': {reason}")]
    InvalidKey { key: String, reason: String },

    #[error("Invalid value for '{key}': {reason}")]
    InvalidValue { key: String, reason: String },
}

/// Errors raised while loading or saving the tool's own settings
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("Failed to save configuration: {0}")]
    SaveFailed(String),

    #[error("Failed to create config directory: {0}")]
    DirectoryCreationFailed(PathBuf),
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StoreError::InvalidKey {
            key: "A=B".to_string(),
            reason: "contains '='".to_string(),
        };
        assert!(err.to_string().contains("A=B"));

        let err = StoreError::Write {
            path: PathBuf::from("/tmp/foo/.env"),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        };
        assert!(err.to_string().contains("/tmp/foo/.env"));

        let err = ConfigError::DirectoryCreationFailed(PathBuf::from("/tmp/bar"));
        assert!(err.to_string().contains("/tmp/bar"));
    }

    #[test]
    fn test_error_conversion() {
        let store_err = StoreError::InvalidKey {
            key: String::new(),
            reason: "empty".to_string(),
        };
        let top: Error = store_err.into();
        assert!(matches!(top, Error::Store(_)));

        let config_err = ConfigError::LoadFailed("boom".to_string());
        let top: Error = config_err.into();
        assert!(top.to_string().contains("boom"));
    }
}
