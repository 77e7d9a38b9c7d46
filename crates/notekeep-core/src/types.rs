//! Strong type definitions for Notekeep.
//!
//! Identifiers are newtypes so a user id can never be passed where a note id
//! is expected. Records are plain data; they know nothing about storage.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Numeric identifier of a registered user.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub i64);

impl UserId {
    /// Wrap a raw row id.
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the raw row id.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Debug for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UserId({})", self.0)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for UserId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// Numeric identifier of a note.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(pub i64);

impl NoteId {
    /// Wrap a raw row id.
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the raw row id.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Debug for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NoteId({})", self.0)
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for NoteId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// A registered user. The credential is deliberately not part of this record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub username: String,
    /// Unix ms.
    pub created_at: i64,
}

/// A stored note, joined with its author's username.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    pub body: String,
    pub is_public: bool,
    pub author_id: UserId,
    /// Display name of the author, resolved at read time.
    pub author_username: String,
    /// Unix ms.
    pub created_at: i64,
    /// Unix ms. Equal to `created_at` until the first update.
    pub updated_at: i64,
}

impl Note {
    /// Whether `viewer` may read this note.
    pub fn is_visible_to(&self, viewer: UserId) -> bool {
        self.is_public || self.author_id == viewer
    }
}

/// The caller-supplied fields of a note.
///
/// Used for both creation and full-replace updates: every field is always
/// written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteDraft {
    pub title: String,
    pub body: String,
    pub is_public: bool,
}

impl NoteDraft {
    /// A private draft.
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            is_public: false,
        }
    }

    /// Set the visibility flag.
    pub fn public(mut self, is_public: bool) -> Self {
        self.is_public = is_public;
        self
    }
}

/// Current time in Unix milliseconds.
pub fn now_millis() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time went backwards")
        .as_millis() as i64
}
