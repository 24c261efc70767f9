//! Storage error types for orders-storage.
//!
//! [`StorageError`] covers every way a store call can fail: SQLite errors,
//! migration failures, pool admission timeouts and closures, and failures of
//! the blocking task a statement runs on.

use std::time::Duration;

use thiserror::Error;

/// Errors produced by storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// SQLite reported an error (connection, statement, or constraint).
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Applying schema migrations failed.
    #[error("migration error: {0}")]
    Migration(String),

    /// The statement did not complete within the configured bound.
    #[error("store call timed out after {0:?}")]
    Timeout(Duration),

    /// The pool was closed while a caller waited for a connection.
    #[error("connection pool closed")]
    PoolClosed,

    /// Building the pool or checking a connection out of it failed.
    #[error("connection pool error: {0}")]
    Pool(String),

    /// The blocking task running the statement panicked or was aborted.
    #[error("store task failed: {0}")]
    Interact(String),

    /// Creating the on-disk location for a temporary database failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl StorageError {
    /// Returns true when SQLite rejected the write on a constraint
    /// (unique key, not-null, check).
    pub fn is_constraint_violation(&self) -> bool {
        matches!(
            self,
            StorageError::Sqlite(rusqlite::Error::SqliteFailure(err, _))
                if err.code == rusqlite::ErrorCode::ConstraintViolation
        )
    }
}
