//! Error types for simforge-core

use thiserror::Error;

/// Result type alias using simforge-core's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for simforge
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: String },

    /// Invalid configuration format
    #[error("Invalid configuration format: {message}")]
    InvalidConfig { message: String },

    /// Manifest file missing from a project directory
    #[error("There is no '{file}' in {dir}")]
    ManifestNotFound { file: String, dir: String },

    /// Manifest is not valid JSON
    #[error("'{file}' is not a valid JSON file: {message}")]
    ManifestParse { file: String, message: String },

    /// Manifest parsed but holds nothing
    #[error("'{file}' is empty")]
    ManifestEmpty { file: String },

    /// Manifest has the wrong shape
    #[error("'{file}' is invalid: {message}")]
    InvalidManifest { file: String, message: String },

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a config not found error
    pub fn config_not_found(path: impl Into<String>) -> Self {
        Self::ConfigNotFound { path: path.into() }
    }

    /// Create an invalid config error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create a manifest not found error
    pub fn manifest_not_found(file: impl Into<String>, dir: impl Into<String>) -> Self {
        Self::ManifestNotFound {
            file: file.into(),
            dir: dir.into(),
        }
    }

    /// Create a manifest parse error
    pub fn manifest_parse(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ManifestParse {
            file: file.into(),
            message: message.into(),
        }
    }

    /// Create a manifest empty error
    pub fn manifest_empty(file: impl Into<String>) -> Self {
        Self::ManifestEmpty { file: file.into() }
    }

    /// Create an invalid manifest error
    pub fn invalid_manifest(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidManifest {
            file: file.into(),
            message: message.into(),
        }
    }
}
