//! Error types for AssetMax

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for AssetMax operations
#[derive(Debug, Error)]
pub enum AssetMaxError {
    #[error("Manifest not found: {0}")]
    ManifestNotFound(String),

    #[error("Malformed manifest {path}: {message}")]
    MalformedManifest { path: String, message: String },

    #[error("Missing required field: {0}")]
    MissingRequiredField(String),

    #[error("Failed to write {}: {source}", .path.display())]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),

    #[error("TOML serialization error: {0}")]
    TomlSerError(String),

    #[error("Scan error: {0}")]
    ScanError(String),

    #[error("Config error: {0}")]
    ConfigError(String),
}

/// Result type alias for AssetMax operations
pub type Result<T> = std::result::Result<T, AssetMaxError>;

impl From<toml::de::Error> for AssetMaxError {
    fn from(err: toml::de::Error) -> Self {
        AssetMaxError::TomlParseError(err.to_string())
    }
}

impl From<toml::ser::Error> for AssetMaxError {
    fn from(err: toml::ser::Error) -> Self {
        AssetMaxError::TomlSerError(err.to_string())
    }
}
