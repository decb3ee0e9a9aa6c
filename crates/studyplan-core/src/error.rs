//! Core error types for studyplan-core.
//!
//! This module defines the error hierarchy using thiserror. Every error is
//! a deterministic function of the input: the engine does no I/O, so there
//! is nothing to retry and every failure is reproducible by a test case.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for studyplan-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Database-related errors
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Database-specific errors.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Failed to open database connection
    #[error("Failed to open database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Row lookup by id found nothing
    #[error("Subject not found: {0}")]
    SubjectNotFound(String),

    /// Database is locked
    #[error("Database is locked")]
    Locked,
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),
}

/// Validation errors raised at the data-model and preference boundaries.
///
/// An empty subject list is deliberately NOT represented here: the engine
/// returns an empty slot sequence for it, and the presentation layer owns
/// the empty-state message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Preference value outside its sane range
    #[error("Invalid value for '{field}': {message}")]
    InvalidPreference { field: &'static str, message: String },

    /// Priority string is not one of low, medium, high
    #[error("Unrecognized priority '{0}' (expected low, medium or high)")]
    UnrecognizedPriority(String),

    /// Progress percentage above 100
    #[error("Progress {0} out of range (expected 0-100)")]
    ProgressOutOfRange(u8),

    /// Subject display label is empty
    #[error("Subject name must not be empty")]
    EmptyName,

    /// The plan would run past 24:00; rejected rather than wrapped
    #[error("Schedule would cross midnight by {overshoot_min} minutes")]
    CrossesMidnight { overshoot_min: u32 },
}

// Helper implementation matching the rusqlite failure modes we care about.

impl From<rusqlite::Error> for DatabaseError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(err, _msg) => {
                if err.code == rusqlite::ErrorCode::DatabaseLocked {
                    DatabaseError::Locked
                } else {
                    DatabaseError::QueryFailed(err.to_string())
                }
            }
            _ => DatabaseError::QueryFailed(err.to_string()),
        }
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
