use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Custom error type for buildsweep
#[derive(Error, Debug)]
pub enum SweepError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Pattern error: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Trash error for {}: {message}", path.display())]
    Trash { path: PathBuf, message: String },
}

/// Result type alias for buildsweep
pub type Result<T> = std::result::Result<T, SweepError>;

impl SweepError {
    /// Create a config error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        SweepError::Config(msg.into())
    }

    /// Create an invalid path error
    pub fn invalid_path<S: Into<String>>(msg: S) -> Self {
        SweepError::InvalidPath(msg.into())
    }

    /// Create a trash error for a specific path
    pub fn trash<P: Into<PathBuf>, S: Into<String>>(path: P, msg: S) -> Self {
        SweepError::Trash {
            path: path.into(),
            message: msg.into(),
        }
    }
}
