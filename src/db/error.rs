//! Database error types.
//!
//! This module provides abstracted error types for database operations.
//! It uses miette for diagnostic output and thiserror for derive macros.
//! Driver errors are classified once, in `From<sqlx::Error>`, so callers can
//! decide between retrying, reporting, and treating a miss as a normal result.

use miette::Diagnostic;
use sqlx::error::ErrorKind;
use thiserror::Error;

/// Database operation errors.
#[derive(Error, Diagnostic, Debug)]
pub enum DbError {
    #[error("Entity not found: {entity_type} with id '{id}'")]
    #[diagnostic(code(sql_tour::db::not_found))]
    NotFound { entity_type: String, id: String },

    #[error("Validation error: {message}")]
    #[diagnostic(code(sql_tour::db::validation_error))]
    Validation { message: String },

    #[error("Constraint violation: {message}")]
    #[diagnostic(
        code(sql_tour::db::constraint),
        help("The statement was rejected by the schema; retrying it unchanged will fail again.")
    )]
    Constraint { message: String },

    #[error("Connection error: {message}")]
    #[diagnostic(
        code(sql_tour::db::connection_error),
        help("Check that the database path exists and is readable, or set SQLT_DB.")
    )]
    Connection { message: String },

    #[error("Decode error: {message}")]
    #[diagnostic(code(sql_tour::db::decode_error))]
    Decode { message: String },

    #[error("Migration error: {message}")]
    #[diagnostic(code(sql_tour::db::migration_error))]
    Migration { message: String },

    #[error("Database error: {message}")]
    #[diagnostic(code(sql_tour::db::database_error))]
    Database { message: String },
}

impl DbError {
    pub(crate) fn not_found(entity_type: &str, id: impl ToString) -> Self {
        DbError::NotFound {
            entity_type: entity_type.to_string(),
            id: id.to_string(),
        }
    }

    /// Connectivity failures may succeed on a later attempt.
    pub fn is_retryable(&self) -> bool {
        matches!(self, DbError::Connection { .. })
    }

    /// Errors that indicate a programming or schema mistake rather than bad input.
    pub fn is_fatal(&self) -> bool {
        matches!(self, DbError::Decode { .. } | DbError::Migration { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, DbError::NotFound { .. })
    }
}

impl From<sqlx::Error> for DbError {
    fn from(e: sqlx::Error) -> Self {
        match &e {
            sqlx::Error::Database(db_err) => match db_err.kind() {
                ErrorKind::UniqueViolation
                | ErrorKind::ForeignKeyViolation
                | ErrorKind::NotNullViolation
                | ErrorKind::CheckViolation => DbError::Constraint {
                    message: db_err.message().to_string(),
                },
                _ if db_err.code().is_some_and(|c| is_lock_contention(&c)) => {
                    DbError::Connection {
                        message: e.to_string(),
                    }
                }
                _ => DbError::Database {
                    message: e.to_string(),
                },
            },
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed => DbError::Connection {
                message: e.to_string(),
            },
            sqlx::Error::ColumnDecode { .. }
            | sqlx::Error::ColumnNotFound(_)
            | sqlx::Error::ColumnIndexOutOfBounds { .. }
            | sqlx::Error::TypeNotFound { .. }
            | sqlx::Error::Decode(_) => DbError::Decode {
                message: e.to_string(),
            },
            sqlx::Error::Migrate(_) => DbError::Migration {
                message: e.to_string(),
            },
            _ => DbError::Database {
                message: e.to_string(),
            },
        }
    }
}

/// SQLITE_BUSY (5) and SQLITE_LOCKED (6), including their extended codes.
/// Another connection holds the lock; the same statement can succeed later.
pub(crate) fn is_lock_contention(code: &str) -> bool {
    code.parse::<i32>()
        .is_ok_and(|c| matches!(c & 0xff, 5 | 6))
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;
