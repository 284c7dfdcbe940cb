//! Error types for the application layer

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TuneSwipeError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Profile error: {0}")]
    ProfileError(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Export error: {0}")]
    ExportError(String),
}

pub type Result<T> = std::result::Result<T, TuneSwipeError>;
