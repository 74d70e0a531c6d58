//! Error types for hrnet.
//!
//! This module defines the environment-level errors used throughout the crate.
//! Form validation problems are not errors in this sense: they are returned as
//! data by [`crate::form::validate`] so they can be shown next to each field.

use std::path::PathBuf;

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for hrnet operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Storage Errors ===
    /// Failed to open or create the database.
    #[error("failed to open database at {path}: {source}")]
    DatabaseOpen {
        /// Path to the database file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: rusqlite::Error,
    },

    /// A database query failed.
    #[error("database query failed: {0}")]
    DatabaseQuery(#[from] rusqlite::Error),

    /// Failed to run database migrations.
    #[error("database migration failed: {message}")]
    DatabaseMigration {
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

    // === Input Errors ===
    /// A date could not be parsed in the expected format.
    #[error("invalid date '{input}': expected {expected}")]
    DateFormat {
        /// The text that failed to parse.
        input: String,
        /// Human readable description of the accepted format.
        expected: &'static str,
    },

    /// A date falls outside the selectable range of a date input.
    #[error("date {date} is outside the selectable range ({bound})")]
    DateOutOfRange {
        /// The rejected date.
        date: NaiveDate,
        /// Description of the violated bound.
        bound: String,
    },

    /// A table column key does not exist.
    #[error("unknown column: {0}")]
    UnknownColumn(String),

    /// A route path does not match any page.
    #[error("unknown route: {0}")]
    UnknownRoute(String),

    /// A page size outside the supported set was requested.
    #[error("unsupported page size {0} (expected one of 10, 25, 50, 100)")]
    PageSize(usize),

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
}

/// A specialized Result type for hrnet operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a configuration validation error.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::UnknownRoute("/payroll".to_string());
        assert_eq!(err.to_string(), "unknown route: /payroll");

        let err = Error::UnknownColumn("salary".to_string());
        assert_eq!(err.to_string(), "unknown column: salary");
    }

    #[test]
    fn test_date_out_of_range_display() {
        let err = Error::DateOutOfRange {
            date: NaiveDate::from_ymd_opt(2030, 1, 1).unwrap(),
            bound: "latest 01/01/2025".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("2030-01-01"));
        assert!(msg.contains("latest 01/01/2025"));
    }

    #[test]
    fn test_date_format_display() {
        let err = Error::DateFormat {
            input: "17/03/2024".to_string(),
            expected: "MM/DD/YYYY",
        };
        let msg = err.to_string();
        assert!(msg.contains("17/03/2024"));
        assert!(msg.contains("MM/DD/YYYY"));
    }

    #[test]
    fn test_page_size_display() {
        let err = Error::PageSize(30);
        assert!(err.to_string().contains("30"));
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_from_rusqlite_error() {
        let result = rusqlite::Connection::open_with_flags(
            "/nonexistent/path/db.sqlite",
            rusqlite::OpenFlags::SQLITE_OPEN_READ_ONLY,
        );
        if let Err(sqlite_err) = result {
            let err: Error = sqlite_err.into();
            assert!(matches!(err, Error::DatabaseQuery(_)));
        }
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
    fn test_config_validation_error_display() {
        let err = Error::config("page_size must be one of 10, 25, 50, 100");
        assert!(err.to_string().contains("page_size"));
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
