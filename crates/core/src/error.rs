//! Error types for the core library

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// The backing file exists but its content could not be decoded.
    #[error("Task file {} is corrupt: {reason}", path.display())]
    CorruptStore { path: PathBuf, reason: String },

    /// Writing the backing file failed. In-memory tasks are kept.
    #[error("Failed to save tasks to {}: {source}", path.display())]
    PersistFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Task not found: ID {0}")]
    NotFound(u64),

    #[error("Invalid priority: {0:?}")]
    InvalidPriority(String),

    #[error("Invalid status: {0:?}")]
    InvalidStatus(String),

    #[error("Task title cannot be empty")]
    InvalidTitle,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a PersistFailure error
    pub fn persist_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::PersistFailure {
            path: path.into(),
            source,
        }
    }

    /// Create a CorruptStore error
    pub fn corrupt(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::CorruptStore {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}
