//! Storage-specific error types for SQLite operations.
//!
//! Wraps Diesel and r2d2 errors and converts them to the database-agnostic
//! error types defined in `pocketledger-core`. The orphan rule prevents a
//! direct `From<diesel::result::Error> for core::Error`, so conversions go
//! through [`StorageError`].

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use thiserror::Error;

use pocketledger_core::errors::{DatabaseError, Error};

/// Storage-layer errors, converted to `pocketledger_core::Error` before
/// being returned to callers.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database connection failed: {0}")]
    ConnectionFailed(#[from] diesel::ConnectionError),

    #[error("Connection pool error: {0}")]
    PoolError(#[from] r2d2::Error),

    #[error("Query execution failed: {0}")]
    QueryFailed(#[from] DieselError),

    /// A core error raised inside a storage transaction. Kept intact so
    /// NotFound and validation failures survive the round trip through the
    /// writer actor.
    #[error(transparent)]
    Core(Error),
}

impl From<Error> for StorageError {
    fn from(err: Error) -> Self {
        StorageError::Core(err)
    }
}

impl StorageError {
    pub fn into_core(self) -> Error {
        match self {
            StorageError::ConnectionFailed(e) => {
                Error::Database(DatabaseError::ConnectionFailed(e.to_string()))
            }
            StorageError::PoolError(e) => {
                Error::Database(DatabaseError::PoolCreationFailed(e.to_string()))
            }
            StorageError::QueryFailed(DieselError::NotFound) => {
                Error::Database(DatabaseError::NotFound("Record not found".to_string()))
            }
            StorageError::QueryFailed(DieselError::DatabaseError(
                DatabaseErrorKind::UniqueViolation,
                info,
            )) => Error::ConstraintViolation(info.message().to_string()),
            StorageError::QueryFailed(DieselError::DatabaseError(
                DatabaseErrorKind::ForeignKeyViolation,
                info,
            )) => Error::Database(DatabaseError::ForeignKeyViolation(
                info.message().to_string(),
            )),
            StorageError::QueryFailed(e) => {
                Error::Database(DatabaseError::QueryFailed(e.to_string()))
            }
            StorageError::Core(e) => e,
        }
    }
}

impl From<StorageError> for Error {
    fn from(err: StorageError) -> Self {
        err.into_core()
    }
}

/// Extension trait for converting Diesel Results to core Results.
pub trait IntoCore<T> {
    fn into_core(self) -> pocketledger_core::Result<T>;
}

impl<T> IntoCore<T> for std::result::Result<T, DieselError> {
    fn into_core(self) -> pocketledger_core::Result<T> {
        self.map_err(|e| StorageError::from(e).into_core())
    }
}

impl<T> IntoCore<T> for std::result::Result<T, r2d2::Error> {
    fn into_core(self) -> pocketledger_core::Result<T> {
        self.map_err(|e| StorageError::from(e).into_core())
    }
}
