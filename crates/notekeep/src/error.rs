//! Error types for Notekeep.

use notekeep_core::CoreError;
use notekeep_store::StoreError;
use thiserror::Error;

/// Errors that can occur during Notekeep operations.
///
/// The first three variants are outcomes the caller is expected to handle
/// (they map to user-facing responses). The rest are faults.
#[derive(Debug, Error)]
pub enum NotekeepError {
    /// Registration hit an existing username.
    #[error("user already exists: {0}")]
    DuplicateUser(String),

    /// Bad username/password, or an absent, malformed or forged token.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The note does not exist, or the caller may not see it.
    #[error("note not found")]
    NotFoundOrForbidden,

    /// Configuration rejected by validation.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Storage error.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    /// Core error.
    #[error("core error: {0}")]
    Core(#[from] CoreError),

    /// A blocking task failed to complete.
    #[error("blocking task failed: {0}")]
    Task(String),
}

impl NotekeepError {
    /// Whether this is a caller-facing outcome rather than a fault.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::DuplicateUser(_) | Self::InvalidCredentials | Self::NotFoundOrForbidden
        )
    }
}

/// Result type for Notekeep operations.
pub type Result<T> = std::result::Result<T, NotekeepError>;

/// Turns an absent lookup into [`NotekeepError::NotFoundOrForbidden`].
pub trait OptionExt<T> {
    /// `Some(v)` → `Ok(v)`, `None` → `Err(NotFoundOrForbidden)`.
    fn or_hidden(self) -> Result<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn or_hidden(self) -> Result<T> {
        self.ok_or(NotekeepError::NotFoundOrForbidden)
    }
}
