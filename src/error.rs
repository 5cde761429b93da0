use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Core library errors
#[derive(Error, Debug)]
pub enum ArborError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error at path '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl ArborError {
    /// Classify an I/O failure on `path` into the matching error variant.
    pub fn from_io(path: &Path, source: io::Error) -> Self {
        match source.kind() {
            io::ErrorKind::NotFound => ArborError::PathNotFound(path.to_path_buf()),
            io::ErrorKind::PermissionDenied => ArborError::PermissionDenied(path.to_path_buf()),
            _ => ArborError::Io {
                path: path.to_path_buf(),
                source,
            },
        }
    }
}

/// Configuration-specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, ArborError>;
