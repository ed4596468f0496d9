//! Error types for the training plan library.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for all plan operations.
#[derive(Error, Debug)]
pub enum PlanError {
    /// Persistence failures. The in-flight operation is always abandoned.
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// Plan not found for the given ID
    #[error("Plan with ID {id} not found")]
    PlanNotFound { id: u64 },
    /// Day not found for the given ID
    #[error("Day with ID {id} not found")]
    DayNotFound { id: u64 },
    /// Session not found for the given ID
    #[error("Session with ID {id} not found")]
    SessionNotFound { id: u64 },
    /// Loaded or imported rows do not form a valid plan tree
    #[error("Invalid plan hierarchy: {0}")]
    InvalidHierarchy(String),
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Builder for creating database errors with optional context.
pub struct DatabaseErrorBuilder {
    message: String,
}

impl DatabaseErrorBuilder {
    /// Create a new database error builder with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build the error with the given source.
    pub fn with_source(self, source: rusqlite::Error) -> PlanError {
        PlanError::Database {
            message: self.message,
            source,
        }
    }
}

impl PlanError {
    /// Creates a builder for database errors.
    pub fn database(message: impl Into<String>) -> DatabaseErrorBuilder {
        DatabaseErrorBuilder::new(message)
    }

    /// Shorthand for [`PlanError::InvalidInput`].
    pub fn invalid_input(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Whether this error came from the storage layer.
    pub fn is_storage_failure(&self) -> bool {
        matches!(self, Self::Database { .. })
    }
}

/// Specialized extension trait for database-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| PlanError::database(message).with_source(e))
    }
}

/// Maps a `spawn_blocking` join failure into a configuration error.
pub(crate) fn join_error(e: tokio::task::JoinError) -> PlanError {
    PlanError::Configuration {
        message: format!("Task join error: {e}"),
    }
}

/// Result type alias for plan operations
pub type Result<T> = std::result::Result<T, PlanError>;
