//! Error types for portfolio.
//!
//! This module defines all error types used throughout the portfolio crate.
//! Most of them never reach the user directly: the viewer and admin surfaces
//! turn them into short status messages.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for portfolio operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Storage Errors ===
    /// Failed to open or create the slot database.
    #[error("failed to open slot database at {path}: {source}")]
    SlotOpen {
        /// Path to the database file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: rusqlite::Error,
    },

    /// A slot query failed.
    #[error("slot query failed: {0}")]
    SlotQuery(#[from] rusqlite::Error),

    /// Failed to bring the slot table layout up to date.
    #[error("slot table migration failed: {message}")]
    SlotMigration {
        /// Description of what went wrong.
        message: String,
    },

    /// A slot refused a write (read-only or full).
    #[error("failed to write slot '{key}': {message}")]
    SlotWrite {
        /// The slot key.
        key: String,
        /// Description of what went wrong.
        message: String,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Record Errors ===
    /// A submission carried an empty project id.
    #[error("project id is required to {action}")]
    MissingId {
        /// The rejected action (`save`, `edit`, `delete`).
        action: &'static str,
    },

    /// No project with the given id exists.
    #[error("no project found with id '{id}'")]
    NotFound {
        /// The id that was looked up.
        id: String,
    },

    // === Remote Errors ===
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("remote request failed: {0}")]
    RemoteRequest(#[from] reqwest::Error),

    /// The remote endpoint answered with a non-2xx status.
    #[error("remote endpoint {url} returned HTTP {status}")]
    RemoteStatus {
        /// HTTP status code.
        status: u16,
        /// The requested URL.
        url: String,
    },

    /// No remote endpoint is configured.
    #[error("no remote endpoint configured")]
    RemoteNotConfigured,

    // === I/O Errors ===
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // === Generic Errors ===
    /// An internal error occurred (bug).
    #[error("internal error: {0}")]
    Internal(String),
}

/// A specialized Result type for portfolio operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a new internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Create a not-found error for the given id.
    #[must_use]
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    /// Create a slot write error.
    #[must_use]
    pub fn slot_write(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SlotWrite {
            key: key.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_id_display() {
        let err = Error::MissingId { action: "delete" };
        assert_eq!(err.to_string(), "project id is required to delete");
    }

    #[test]
    fn test_not_found() {
        let err = Error::not_found("alpha");
        assert!(matches!(&err, Error::NotFound { id } if id == "alpha"));
        assert_eq!(err.to_string(), "no project found with id 'alpha'");
    }

    #[test]
    fn test_internal_error() {
        let err = Error::internal("something went wrong");
        assert_eq!(err.to_string(), "internal error: something went wrong");
    }

    #[test]
    fn test_slot_write_error() {
        let err = Error::slot_write("portfolio-projects-local-v1", "quota exceeded");
        let msg = err.to_string();
        assert!(msg.contains("portfolio-projects-local-v1"));
        assert!(msg.contains("quota exceeded"));
    }

    #[test]
    fn test_remote_status_display() {
        let err = Error::RemoteStatus {
            status: 503,
            url: "http://localhost/projects.json".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("503"));
        assert!(msg.contains("projects.json"));
    }

    #[test]
    fn test_remote_not_configured_display() {
        assert_eq!(
            Error::RemoteNotConfigured.to_string(),
            "no remote endpoint configured"
        );
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_from_json_error() {
        let json_result: std::result::Result<i32, serde_json::Error> =
            serde_json::from_str("not valid json");
        if let Err(json_err) = json_result {
            let err: Error = json_err.into();
            assert!(matches!(err, Error::Json(_)));
        }
    }

    #[test]
    fn test_from_rusqlite_error() {
        let result = rusqlite::Connection::open_with_flags(
            "/nonexistent/path/slots.db",
            rusqlite::OpenFlags::SQLITE_OPEN_READ_ONLY,
        );
        if let Err(sqlite_err) = result {
            let err: Error = sqlite_err.into();
            assert!(matches!(err, Error::SlotQuery(_)));
        }
    }

    #[test]
    fn test_slot_migration_error_display() {
        let err = Error::SlotMigration {
            message: "version mismatch".to_string(),
        };
        assert!(err.to_string().contains("version mismatch"));
    }

    #[test]
    fn test_config_validation_error_display() {
        let err = Error::ConfigValidation {
            message: "slot_key must not be empty".to_string(),
        };
        assert!(err.to_string().contains("slot_key"));
    }

    #[test]
    fn test_directory_create_error_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = Error::DirectoryCreate {
            path: PathBuf::from("/root/forbidden"),
            source: io_err,
        };
        assert!(err.to_string().contains("/root/forbidden"));
    }
}
