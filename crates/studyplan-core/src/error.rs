//! Core error types for studyplan-core.
//!
//! This module defines the error hierarchy using thiserror. Every failure
//! surfaced by the engine maps onto one taxonomy label via [`CoreError::code`]:
//! malformed input is `VALIDATION`, record store failures are
//! `STORE_UNAVAILABLE` and configuration failures are `CONFIG`. Partially
//! placed tasks are not errors at all; see [`crate::scheduler::PartialSchedule`].

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for studyplan-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Malformed input rejected before scheduling begins
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Record store read/write failures
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl CoreError {
    /// Taxonomy label for this error.
    pub fn code(&self) -> &'static str {
        match self {
            CoreError::Validation(_) => "VALIDATION",
            CoreError::Store(_) => "STORE_UNAVAILABLE",
            CoreError::Config(_) => "CONFIG",
        }
    }
}

/// Record store errors.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The backing database failed
    #[error("Record store unavailable: {0}")]
    Unavailable(String),

    /// Failed to open the backing database
    #[error("Failed to open record store at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// A stored record could not be decoded
    #[error("Corrupt {kind} record '{id}': {message}")]
    Corrupt {
        kind: &'static str,
        id: String,
        message: String,
    },

    /// Update/remove addressed a record that does not exist
    #[error("No {kind} record with id '{id}'")]
    NotFound { kind: &'static str, id: String },

    /// Database is locked
    #[error("Record store is locked")]
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

    /// Unknown dot-path key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Availability window whose end does not follow its start
    #[error("Invalid availability window '{id}': end ({end}) must be after start ({start})")]
    InvalidWindow {
        id: String,
        start: chrono::NaiveTime,
        end: chrono::NaiveTime,
    },

    /// Day of week outside 0..=6
    #[error("Invalid day of week {day} for availability window '{id}' (expected 0-6)")]
    InvalidWeekday { id: String, day: u8 },

    /// Task that cannot be scheduled at all
    #[error("Task '{id}' has a non-positive estimate")]
    NonPositiveEstimate { id: String },

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(e, _msg) if e.code == rusqlite::ErrorCode::DatabaseLocked => {
                StoreError::Locked
            }
            _ => StoreError::Unavailable(err.to_string()),
        }
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
