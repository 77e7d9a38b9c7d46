//! Store trait: the abstract interface for user and note persistence.
//!
//! This trait keeps the access core storage-agnostic. Implementations
//! include SQLite (primary) and in-memory (for tests).

use async_trait::async_trait;
use notekeep_core::{Note, NoteDraft, NoteId, User, UserId};

use crate::error::Result;

/// Result of inserting a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertResult {
    /// User was inserted.
    Inserted(User),
    /// The username is already registered. Nothing was written.
    UsernameTaken,
}

/// A user row together with its encoded credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialRecord {
    pub user: User,
    /// Encoded credential, see `notekeep_core::Credential::encode`.
    pub credential: String,
}

/// The Store trait: async interface for user and note persistence.
///
/// Every method is one unit of work: it runs inside its own transaction and
/// either commits fully or leaves no trace.
///
/// # Design Notes
///
/// - **Uniqueness**: username collisions are detected by the insert itself,
///   never by a separate lookup, so concurrent registrations cannot both win.
/// - **Scoped mutations**: [`update_note`](Store::update_note) and
///   [`delete_note`](Store::delete_note) match on note id and author id in a
///   single conditional statement.
/// - **Ordering**: listings are ordered by note id ascending.
/// - **Cascade**: deleting a user deletes every note they authored.
#[async_trait]
pub trait Store: Send + Sync {
    // ─────────────────────────────────────────────────────────────────────────
    // User Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Insert a new user with an encoded credential.
    ///
    /// # Returns
    /// - `Inserted` with the new user record.
    /// - `UsernameTaken` if the username already exists.
    async fn insert_user(&self, username: &str, credential: &str, now: i64)
        -> Result<InsertResult>;

    /// Look up a user and their credential by username.
    async fn get_credential(&self, username: &str) -> Result<Option<CredentialRecord>>;

    /// Get a user by id.
    async fn get_user(&self, id: UserId) -> Result<Option<User>>;

    /// Delete a user and, by cascade, their notes. Returns whether a row was removed.
    async fn delete_user(&self, id: UserId) -> Result<bool>;

    // ─────────────────────────────────────────────────────────────────────────
    // Note Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Insert a note and return it joined with its author's username.
    ///
    /// Fails with `UnknownAuthor` if `author` does not exist.
    async fn insert_note(&self, author: UserId, draft: &NoteDraft, now: i64) -> Result<Note>;

    /// Get a note by id, regardless of visibility.
    async fn get_note(&self, id: NoteId) -> Result<Option<Note>>;

    /// Notes that are public or authored by `viewer`, ordered by id.
    async fn list_visible_notes(&self, viewer: UserId, limit: u32, offset: u64)
        -> Result<Vec<Note>>;

    /// Count the notes `viewer` can see.
    async fn count_visible_notes(&self, viewer: UserId) -> Result<u64>;

    /// Overwrite a note's mutable fields if it exists and belongs to `author`.
    ///
    /// Returns the updated note, or `None` when nothing matched.
    async fn update_note(
        &self,
        id: NoteId,
        author: UserId,
        draft: &NoteDraft,
        now: i64,
    ) -> Result<Option<Note>>;

    /// Delete a note if it exists and belongs to `author`.
    ///
    /// Returns whether exactly one row was removed.
    async fn delete_note(&self, id: NoteId, author: UserId) -> Result<bool>;
}
