//! Core error types for flowlist-core.
//!
//! Persistence failures are normally caught and logged at the call site
//! rather than propagated; the variants here cover the paths that do reach
//! callers (opening storage, validation, notification dispatch).

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for flowlist-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Notification dispatch errors
    #[error("Notification error: {0}")]
    Notify(#[from] NotifyError),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Storage-specific errors.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to open the backing database
    #[error("Failed to open database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Data directory could not be created or resolved
    #[error("Data directory unavailable: {0}")]
    DataDir(String),
}

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        StorageError::QueryFailed(err.to_string())
    }
}

/// Validation errors, rejected before any state mutation.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Task title was empty or whitespace
    #[error("Task title must not be empty")]
    EmptyTitle,

    /// No task with the given id
    #[error("Task not found: {0}")]
    TaskNotFound(String),

    /// Mood tag not in the vocabulary
    #[error("Unknown mood tag: {0}")]
    UnknownMood(String),
}

/// Notification dispatch errors.
#[derive(Error, Debug)]
pub enum NotifyError {
    /// The platform notification service rejected the request
    #[error("Notification dispatch failed: {0}")]
    Dispatch(String),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
