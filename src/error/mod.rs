//! Error handling module for SplitKit

use thiserror::Error;

use crate::domain::errors::DomainError;

/// Main error type for SplitKit operations
#[derive(Error, Debug)]
pub enum SplitKitError {
    /// Naming, planning or argument failure from the domain layer
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Input path cannot be used
    #[error("Invalid input '{path}': {message}")]
    InvalidInput { path: String, message: String },

    /// Settings file could not be parsed
    #[error("Failed to parse settings file {path}: {source}")]
    ConfigParse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    /// Settings could not be serialized
    #[error("Failed to serialize settings: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    /// Logging subscriber could not be installed
    #[error("Failed to initialize logging: {message}")]
    LoggingInit { message: String },

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type alias for SplitKit operations
pub type SplitKitResult<T> = std::result::Result<T, SplitKitError>;
