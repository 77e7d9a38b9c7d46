//! Error types for the store module.

use notekeep_core::UserId;
use thiserror::Error;

/// Errors that can occur during store operations.
///
/// A username collision is not an error here; it is reported through
/// [`InsertResult::UsernameTaken`](crate::InsertResult::UsernameTaken).
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database error from SQLite.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A note referenced an author that does not exist.
    #[error("unknown author: {0}")]
    UnknownAuthor(UserId),

    /// Invalid data in storage.
    #[error("invalid data: {0}")]
    InvalidData(String),

    /// Migration error.
    #[error("migration error: {0}")]
    Migration(String),

    /// The connection lock was poisoned by a panicking holder.
    #[error("store lock poisoned: {0}")]
    Lock(String),

    /// A blocking task failed to complete.
    #[error("blocking task failed: {0}")]
    Task(String),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
