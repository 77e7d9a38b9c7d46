//! In-memory implementation of the Store trait.
//!
//! This is primarily for testing. It has the same semantics as SQLite
//! (uniqueness, foreign keys, cascade, id ordering) but keeps everything in
//! memory with no persistence.

use std::collections::{BTreeMap, HashMap};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use notekeep_core::{Note, NoteDraft, NoteId, User, UserId};

use crate::error::{Result, StoreError};
use crate::traits::{CredentialRecord, InsertResult, Store};

/// In-memory store implementation.
///
/// All data is lost when the store is dropped. Thread-safe via RwLock; each
/// operation holds the lock for its whole duration, which gives it the same
/// all-or-nothing behavior as a transaction.
pub struct MemoryStore {
    inner: RwLock<MemoryStoreInner>,
}

struct MemoryStoreInner {
    /// Users indexed by ID.
    users: BTreeMap<UserId, StoredUser>,

    /// Username index: username -> user_id.
    usernames: HashMap<String, UserId>,

    /// Notes indexed by ID; BTreeMap iteration gives id order.
    notes: BTreeMap<NoteId, StoredNote>,

    next_user_id: i64,
    next_note_id: i64,
}

struct StoredUser {
    user: User,
    credential: String,
}

struct StoredNote {
    title: String,
    body: String,
    is_public: bool,
    author_id: UserId,
    created_at: i64,
    updated_at: i64,
}

impl MemoryStoreInner {
    /// Join a stored note with its author.
    fn note(&self, id: NoteId, stored: &StoredNote) -> Result<Note> {
        let author = self.users.get(&stored.author_id).ok_or_else(|| {
            StoreError::InvalidData(format!("note {} has no author {}", id, stored.author_id))
        })?;

        Ok(Note {
            id,
            title: stored.title.clone(),
            body: stored.body.clone(),
            is_public: stored.is_public,
            author_id: stored.author_id,
            author_username: author.user.username.clone(),
            created_at: stored.created_at,
            updated_at: stored.updated_at,
        })
    }

    fn visible(&self, viewer: UserId) -> impl Iterator<Item = (&NoteId, &StoredNote)> {
        self.notes
            .iter()
            .filter(move |(_, n)| n.is_public || n.author_id == viewer)
    }
}

impl MemoryStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(MemoryStoreInner {
                users: BTreeMap::new(),
                usernames: HashMap::new(),
                notes: BTreeMap::new(),
                next_user_id: 1,
                next_note_id: 1,
            }),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, MemoryStoreInner>> {
        self.inner
            .read()
            .map_err(|e| StoreError::Lock(e.to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, MemoryStoreInner>> {
        self.inner
            .write()
            .map_err(|e| StoreError::Lock(e.to_string()))
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn insert_user(
        &self,
        username: &str,
        credential: &str,
        now: i64,
    ) -> Result<InsertResult> {
        let mut inner = self.write()?;

        if inner.usernames.contains_key(username) {
            return Ok(InsertResult::UsernameTaken);
        }

        let id = UserId(inner.next_user_id);
        inner.next_user_id += 1;

        let user = User {
            id,
            username: username.to_string(),
            created_at: now,
        };
        inner.usernames.insert(username.to_string(), id);
        inner.users.insert(
            id,
            StoredUser {
                user: user.clone(),
                credential: credential.to_string(),
            },
        );

        Ok(InsertResult::Inserted(user))
    }

    async fn get_credential(&self, username: &str) -> Result<Option<CredentialRecord>> {
        let inner = self.read()?;
        Ok(inner
            .usernames
            .get(username)
            .and_then(|id| inner.users.get(id))
            .map(|stored| CredentialRecord {
                user: stored.user.clone(),
                credential: stored.credential.clone(),
            }))
    }

    async fn get_user(&self, id: UserId) -> Result<Option<User>> {
        let inner = self.read()?;
        Ok(inner.users.get(&id).map(|stored| stored.user.clone()))
    }

    async fn delete_user(&self, id: UserId) -> Result<bool> {
        let mut inner = self.write()?;

        let Some(stored) = inner.users.remove(&id) else {
            return Ok(false);
        };
        inner.usernames.remove(&stored.user.username);
        inner.notes.retain(|_, note| note.author_id != id);

        Ok(true)
    }

    async fn insert_note(&self, author: UserId, draft: &NoteDraft, now: i64) -> Result<Note> {
        let mut inner = self.write()?;

        if !inner.users.contains_key(&author) {
            return Err(StoreError::UnknownAuthor(author));
        }

        let id = NoteId(inner.next_note_id);
        inner.next_note_id += 1;

        let stored = StoredNote {
            title: draft.title.clone(),
            body: draft.body.clone(),
            is_public: draft.is_public,
            author_id: author,
            created_at: now,
            updated_at: now,
        };
        let note = inner.note(id, &stored)?;
        inner.notes.insert(id, stored);

        Ok(note)
    }

    async fn get_note(&self, id: NoteId) -> Result<Option<Note>> {
        let inner = self.read()?;
        inner
            .notes
            .get(&id)
            .map(|stored| inner.note(id, stored))
            .transpose()
    }

    async fn list_visible_notes(
        &self,
        viewer: UserId,
        limit: u32,
        offset: u64,
    ) -> Result<Vec<Note>> {
        let inner = self.read()?;
        let skip = usize::try_from(offset).unwrap_or(usize::MAX);

        inner
            .visible(viewer)
            .skip(skip)
            .take(limit as usize)
            .map(|(id, stored)| inner.note(*id, stored))
            .collect()
    }

    async fn count_visible_notes(&self, viewer: UserId) -> Result<u64> {
        let inner = self.read()?;
        Ok(inner.visible(viewer).count() as u64)
    }

    async fn update_note(
        &self,
        id: NoteId,
        author: UserId,
        draft: &NoteDraft,
        now: i64,
    ) -> Result<Option<Note>> {
        let mut inner = self.write()?;

        match inner.notes.get_mut(&id) {
            Some(stored) if stored.author_id == author => {
                stored.title = draft.title.clone();
                stored.body = draft.body.clone();
                stored.is_public = draft.is_public;
                stored.updated_at = now;
            }
            _ => return Ok(None),
        }

        inner
            .notes
            .get(&id)
            .map(|stored| inner.note(id, stored))
            .transpose()
    }

    async fn delete_note(&self, id: NoteId, author: UserId) -> Result<bool> {
        let mut inner = self.write()?;

        let owned = inner
            .notes
            .get(&id)
            .is_some_and(|stored| stored.author_id == author);
        if owned {
            inner.notes.remove(&id);
        }
        Ok(owned)
    }
}
