//! The NoteAccessGuard: visibility and ownership policy over the note store.
//!
//! The caller id passed to every method must come from a verified token
//! (`Authenticator::resolve_identity`), never from request parameters.

use std::sync::Arc;

use notekeep_core::{now_millis, Note, NoteDraft, NoteId, Page, UserId};
use notekeep_store::{Store, StoreError};
use tracing::{debug, info, warn};

use crate::error::{NotekeepError, Result};

/// Applies visibility and ownership rules to note access.
///
/// A private note owned by someone else is reported exactly like a missing
/// note. Mutations are scoped by note id and author id in one store call.
pub struct NoteAccessGuard<S: Store> {
    store: Arc<S>,
}

impl<S: Store> NoteAccessGuard<S> {
    /// Create a guard over a shared store.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Notes the caller may read, ordered by note id ascending.
    pub async fn list_visible(&self, caller: UserId, page: Page) -> Result<Vec<Note>> {
        let notes = self
            .store
            .list_visible_notes(caller, page.size(), page.offset())
            .await?;
        debug!(
            user_id = %caller,
            page = page.number(),
            page_size = page.size(),
            returned = notes.len(),
            "listed visible notes"
        );
        Ok(notes)
    }

    /// How many notes the caller may read.
    pub async fn count_visible(&self, caller: UserId) -> Result<u64> {
        Ok(self.store.count_visible_notes(caller).await?)
    }

    /// Fetch a note if the caller may read it.
    pub async fn get_visible(&self, caller: UserId, note_id: NoteId) -> Result<Option<Note>> {
        let note = self
            .store
            .get_note(note_id)
            .await?
            .filter(|note| note.is_visible_to(caller));
        debug!(user_id = %caller, note_id = %note_id, found = note.is_some(), "fetched note");
        Ok(note)
    }

    /// Create a note owned by the caller.
    pub async fn create(&self, caller: UserId, draft: NoteDraft) -> Result<Note> {
        match self.store.insert_note(caller, &draft, now_millis()).await {
            Ok(note) => {
                info!(user_id = %caller, note_id = %note.id, public = note.is_public, "created note");
                Ok(note)
            }
            // The token outlived its account.
            Err(StoreError::UnknownAuthor(author)) => {
                warn!(user_id = %author, "note creation for deleted user");
                Err(NotekeepError::InvalidCredentials)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Replace the caller's note. `None` if it is missing or not theirs.
    pub async fn update(
        &self,
        caller: UserId,
        note_id: NoteId,
        draft: NoteDraft,
    ) -> Result<Option<Note>> {
        let note = self
            .store
            .update_note(note_id, caller, &draft, now_millis())
            .await?;
        debug!(user_id = %caller, note_id = %note_id, matched = note.is_some(), "update note");
        Ok(note)
    }

    /// Delete the caller's note. True iff a row was removed.
    pub async fn delete(&self, caller: UserId, note_id: NoteId) -> Result<bool> {
        let removed = self.store.delete_note(note_id, caller).await?;
        debug!(user_id = %caller, note_id = %note_id, removed, "delete note");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notekeep_core::credential::HASH_LEN;
    use notekeep_store::{InsertResult, MemoryStore};

    async fn setup() -> (NoteAccessGuard<MemoryStore>, UserId, UserId) {
        let store = Arc::new(MemoryStore::new());
        let placeholder = "A".repeat(HASH_LEN * 2);
        let mut ids = Vec::new();
        for name in ["alice", "bob"] {
            match store.insert_user(name, &placeholder, 0).await.unwrap() {
                InsertResult::Inserted(user) => ids.push(user.id),
                InsertResult::UsernameTaken => unreachable!(),
            }
        }
        (NoteAccessGuard::new(store), ids[0], ids[1])
    }

    #[tokio::test]
    async fn test_private_note_hidden_from_others() {
        let (guard, alice, bob) = setup().await;
        let note = guard.create(alice, NoteDraft::new("T1", "B1")).await.unwrap();

        assert_eq!(guard.get_visible(bob, note.id).await.unwrap(), None);
        let own = guard.get_visible(alice, note.id).await.unwrap().unwrap();
        assert_eq!(own.title, "T1");
        assert_eq!(own.author_username, "alice");
    }

    #[tokio::test]
    async fn test_hidden_and_missing_are_identical() {
        let (guard, alice, bob) = setup().await;
        let note = guard.create(alice, NoteDraft::new("T1", "B1")).await.unwrap();

        let hidden = guard.get_visible(bob, note.id).await.unwrap();
        let missing = guard.get_visible(bob, NoteId(9_999)).await.unwrap();
        assert_eq!(hidden, missing);

        let hidden = guard.update(bob, note.id, NoteDraft::new("x", "y")).await.unwrap();
        let missing = guard.update(bob, NoteId(9_999), NoteDraft::new("x", "y")).await.unwrap();
        assert_eq!(hidden, missing);
    }

    #[tokio::test]
    async fn test_create_for_deleted_user_is_invalid_credentials() {
        let (guard, alice, _) = setup().await;
        guard.store.delete_user(alice).await.unwrap();
        assert!(matches!(
            guard.create(alice, NoteDraft::new("T1", "B1")).await,
            Err(NotekeepError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_update_is_full_replace() {
        let (guard, alice, bob) = setup().await;
        let note = guard
            .create(alice, NoteDraft::new("T1", "B1").public(true))
            .await
            .unwrap();

        let updated = guard
            .update(alice, note.id, NoteDraft::new("T2", "B2"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.title, "T2");
        assert_eq!(updated.body, "B2");
        assert!(!updated.is_public);
        assert!(updated.updated_at >= note.updated_at);
        assert_eq!(updated.created_at, note.created_at);

        // No longer public, so bob loses sight of it.
        assert_eq!(guard.get_visible(bob, note.id).await.unwrap(), None);
    }
}
