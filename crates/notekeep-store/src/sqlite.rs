//! SQLite implementation of the Store trait.
//!
//! This is the primary storage backend. It uses rusqlite with bundled SQLite,
//! wrapped in async via tokio::spawn_blocking.

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension, Transaction};

use notekeep_core::{Note, NoteDraft, NoteId, User, UserId};

use crate::error::{Result, StoreError};
use crate::migration;
use crate::traits::{CredentialRecord, InsertResult, Store};

/// Columns of a note joined with its author, in `row_to_note` order.
const NOTE_SELECT: &str = "SELECT n.note_id, n.note_title, n.note_text, n.is_public,
        n.author_id, u.username, n.created_at, n.updated_at
     FROM notes n JOIN users u ON u.user_id = n.author_id";

/// SQLite-based store implementation.
///
/// One connection behind a mutex. Each operation is a session: it takes the
/// lock on the blocking pool, opens a transaction, and commits on success.
/// On any error the transaction rolls back when dropped, and the lock guard
/// is released with it.
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Open a SQLite database at the given path.
    ///
    /// Creates the file and runs migrations if it doesn't exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path)?;
        Self::init(conn)
    }

    /// Open an in-memory SQLite database.
    ///
    /// Useful for testing.
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init(conn)
    }

    fn init(mut conn: Connection) -> Result<Self> {
        // Cascading deletes depend on this; SQLite leaves it off by default.
        conn.pragma_update(None, "foreign_keys", true)?;
        migration::migrate(&mut conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Run `f` inside a committed transaction on the blocking pool.
    async fn transact<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Transaction<'_>) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);

        tokio::task::spawn_blocking(move || {
            let mut conn = lock(&conn)?;
            let tx = conn.transaction()?;
            let out = f(&tx)?;
            tx.commit()?;
            Ok(out)
        })
        .await
        .map_err(|e| StoreError::Task(e.to_string()))?
    }
}

fn lock(conn: &Mutex<Connection>) -> Result<MutexGuard<'_, Connection>> {
    conn.lock().map_err(|e| StoreError::Lock(e.to_string()))
}

fn constraint_code(e: &rusqlite::Error) -> Option<std::os::raw::c_int> {
    match e {
        rusqlite::Error::SqliteFailure(err, _)
            if err.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            Some(err.extended_code)
        }
        _ => None,
    }
}

fn is_unique_violation(e: &rusqlite::Error) -> bool {
    matches!(
        constraint_code(e),
        Some(rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE)
            | Some(rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY)
    )
}

fn is_foreign_key_violation(e: &rusqlite::Error) -> bool {
    constraint_code(e) == Some(rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY)
}

fn row_to_note(row: &rusqlite::Row<'_>) -> rusqlite::Result<Note> {
    Ok(Note {
        id: NoteId(row.get(0)?),
        title: row.get(1)?,
        body: row.get(2)?,
        is_public: row.get(3)?,
        author_id: UserId(row.get(4)?),
        author_username: row.get(5)?,
        created_at: row.get(6)?,
        updated_at: row.get(7)?,
    })
}

fn select_note(tx: &Transaction<'_>, id: NoteId) -> Result<Option<Note>> {
    tx.query_row(
        &format!("{NOTE_SELECT} WHERE n.note_id = ?1"),
        params![id.get()],
        row_to_note,
    )
    .optional()
    .map_err(StoreError::from)
}

/// SQLite takes signed 64-bit offsets.
fn sql_offset(offset: u64) -> i64 {
    i64::try_from(offset).unwrap_or(i64::MAX)
}

#[async_trait]
impl Store for SqliteStore {
    async fn insert_user(
        &self,
        username: &str,
        credential: &str,
        now: i64,
    ) -> Result<InsertResult> {
        let username = username.to_string();
        let credential = credential.to_string();

        self.transact(move |tx| {
            let inserted = tx.execute(
                "INSERT INTO users (username, password, created_at) VALUES (?1, ?2, ?3)",
                params![username, credential, now],
            );

            match inserted {
                Ok(_) => Ok(InsertResult::Inserted(User {
                    id: UserId(tx.last_insert_rowid()),
                    username,
                    created_at: now,
                })),
                Err(e) if is_unique_violation(&e) => Ok(InsertResult::UsernameTaken),
                Err(e) => Err(e.into()),
            }
        })
        .await
    }

    async fn get_credential(&self, username: &str) -> Result<Option<CredentialRecord>> {
        let username = username.to_string();

        self.transact(move |tx| {
            tx.query_row(
                "SELECT user_id, username, created_at, password FROM users WHERE username = ?1",
                params![username],
                |row| {
                    Ok(CredentialRecord {
                        user: User {
                            id: UserId(row.get(0)?),
                            username: row.get(1)?,
                            created_at: row.get(2)?,
                        },
                        credential: row.get(3)?,
                    })
                },
            )
            .optional()
            .map_err(StoreError::from)
        })
        .await
    }

    async fn get_user(&self, id: UserId) -> Result<Option<User>> {
        self.transact(move |tx| {
            tx.query_row(
                "SELECT user_id, username, created_at FROM users WHERE user_id = ?1",
                params![id.get()],
                |row| {
                    Ok(User {
                        id: UserId(row.get(0)?),
                        username: row.get(1)?,
                        created_at: row.get(2)?,
                    })
                },
            )
            .optional()
            .map_err(StoreError::from)
        })
        .await
    }

    async fn delete_user(&self, id: UserId) -> Result<bool> {
        self.transact(move |tx| {
            let removed = tx.execute("DELETE FROM users WHERE user_id = ?1", params![id.get()])?;
            Ok(removed == 1)
        })
        .await
    }

    async fn insert_note(&self, author: UserId, draft: &NoteDraft, now: i64) -> Result<Note> {
        let draft = draft.clone();

        self.transact(move |tx| {
            let inserted = tx.execute(
                "INSERT INTO notes (note_title, note_text, is_public, author_id, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?5)",
                params![draft.title, draft.body, draft.is_public, author.get(), now],
            );

            match inserted {
                Ok(_) => {}
                Err(e) if is_foreign_key_violation(&e) => {
                    return Err(StoreError::UnknownAuthor(author))
                }
                Err(e) => return Err(e.into()),
            }

            let id = NoteId(tx.last_insert_rowid());
            select_note(tx, id)?.ok_or_else(|| {
                StoreError::InvalidData(format!("note {} vanished after insert", id))
            })
        })
        .await
    }

    async fn get_note(&self, id: NoteId) -> Result<Option<Note>> {
        self.transact(move |tx| select_note(tx, id)).await
    }

    async fn list_visible_notes(
        &self,
        viewer: UserId,
        limit: u32,
        offset: u64,
    ) -> Result<Vec<Note>> {
        self.transact(move |tx| {
            let mut stmt = tx.prepare(&format!(
                "{NOTE_SELECT}
                 WHERE n.is_public = 1 OR n.author_id = ?1
                 ORDER BY n.note_id ASC
                 LIMIT ?2 OFFSET ?3"
            ))?;

            let notes = stmt
                .query_map(
                    params![viewer.get(), i64::from(limit), sql_offset(offset)],
                    row_to_note,
                )?
                .collect::<rusqlite::Result<Vec<_>>>()?;

            Ok(notes)
        })
        .await
    }

    async fn count_visible_notes(&self, viewer: UserId) -> Result<u64> {
        self.transact(move |tx| {
            let count: i64 = tx.query_row(
                "SELECT COUNT(*) FROM notes WHERE is_public = 1 OR author_id = ?1",
                params![viewer.get()],
                |row| row.get(0),
            )?;
            u64::try_from(count)
                .map_err(|_| StoreError::InvalidData(format!("negative count {}", count)))
        })
        .await
    }

    async fn update_note(
        &self,
        id: NoteId,
        author: UserId,
        draft: &NoteDraft,
        now: i64,
    ) -> Result<Option<Note>> {
        let draft = draft.clone();

        self.transact(move |tx| {
            let changed = tx.execute(
                "UPDATE notes
                 SET note_title = ?1, note_text = ?2, is_public = ?3, updated_at = ?4
                 WHERE note_id = ?5 AND author_id = ?6",
                params![
                    draft.title,
                    draft.body,
                    draft.is_public,
                    now,
                    id.get(),
                    author.get()
                ],
            )?;

            if changed == 0 {
                return Ok(None);
            }
            select_note(tx, id)
        })
        .await
    }

    async fn delete_note(&self, id: NoteId, author: UserId) -> Result<bool> {
        self.transact(move |tx| {
            let removed = tx.execute(
                "DELETE FROM notes WHERE note_id = ?1 AND author_id = ?2",
                params![id.get(), author.get()],
            )?;
            Ok(removed == 1)
        })
        .await
    }
}
