//! Core error types for the finance tracker.
//!
//! This module defines database-agnostic error types. Storage-specific errors
//! (from Diesel, SQLite, etc.) are converted to these types by the storage
//! layer.

use serde::Serialize;
use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the application.
///
/// Database-specific errors are wrapped in string form to keep this type
/// database-agnostic.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Database operation failed: {0}")]
    Database(#[from] DatabaseError),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Domain invariant violated at write time that shape validation cannot
    /// catch (duplicate email, duplicate active budget for a category).
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl Error {
    /// Convenience constructor for the common not-found case.
    ///
    /// Ownership mismatches use this too, so a foreign-owned record is
    /// indistinguishable from an absent one.
    pub fn not_found(entity: &str) -> Self {
        Error::Database(DatabaseError::NotFound(format!("{} not found", entity)))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Database(DatabaseError::NotFound(_)))
    }
}

/// Database-agnostic error type for storage operations.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Failed to establish a database connection.
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    /// Failed to create or configure the connection pool.
    #[error("Failed to create database pool: {0}")]
    PoolCreationFailed(String),

    /// A database query failed to execute.
    #[error("Database query failed: {0}")]
    QueryFailed(String),

    /// The requested record was not found.
    #[error("Record not found: {0}")]
    NotFound(String),

    /// A unique constraint was violated (e.g., duplicate key).
    #[error("Unique constraint violation: {0}")]
    UniqueViolation(String),

    /// A foreign key constraint was violated.
    #[error("Foreign key violation: {0}")]
    ForeignKeyViolation(String),

    /// A database transaction failed.
    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    /// Database migration failed.
    #[error("Database migration failed: {0}")]
    MigrationFailed(String),

    /// Internal/unexpected database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

/// A single field-level validation failure, surfaced to API callers as
/// `{field, message, value}`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldError {
    pub field: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<serde_json::Value>,
}

impl FieldError {
    pub fn new(field: &str, message: &str) -> Self {
        FieldError {
            field: field.to_string(),
            message: message.to_string(),
            value: None,
        }
    }

    pub fn with_value(field: &str, message: &str, value: serde_json::Value) -> Self {
        FieldError {
            field: field.to_string(),
            message: message.to_string(),
            value: Some(value),
        }
    }
}

/// Validation errors for user input.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// One or more fields failed shape/range/enum checks.
    #[error("Validation failed")]
    Fields(Vec<FieldError>),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Required field '{0}' is missing")]
    MissingField(String),

    #[error("Failed to parse date/time: {0}")]
    DateTimeParse(#[from] chrono::ParseError),
}

impl ValidationError {
    /// The per-field details, if any. Used by the API layer to build the
    /// `errors` array of the failure envelope.
    pub fn field_errors(&self) -> Option<&[FieldError]> {
        match self {
            ValidationError::Fields(errors) => Some(errors),
            _ => None,
        }
    }
}

/// Accumulates field errors across a payload's checks, producing a single
/// `ValidationError::Fields` so callers see every problem at once.
#[derive(Debug, Default)]
pub struct FieldErrors {
    errors: Vec<FieldError>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &str, message: &str) {
        self.errors.push(FieldError::new(field, message));
    }

    pub fn push_with_value(&mut self, field: &str, message: &str, value: serde_json::Value) {
        self.errors.push(FieldError::with_value(field, message, value));
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns `Ok(())` when no errors were collected.
    pub fn into_result(self) -> Result<()> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(Error::Validation(ValidationError::Fields(self.errors)))
        }
    }
}

impl From<chrono::ParseError> for Error {
    fn from(err: chrono::ParseError) -> Self {
        Error::Validation(ValidationError::DateTimeParse(err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Validation(ValidationError::InvalidInput(err.to_string()))
    }
}

impl From<Error> for String {
    fn from(err: Error) -> Self {
        err.to_string()
    }
}
