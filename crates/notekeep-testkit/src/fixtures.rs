//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use std::path::Path;

use notekeep::{
    HmacTokenCodec, Note, NoteDraft, Notekeep, NotekeepConfig, NotekeepError, Result, UserId,
};
use notekeep_store::{MemoryStore, SqliteStore, Store};

/// Signing secret shared by every fixture.
pub const TEST_SECRET: &[u8] = b"notekeep-test-secret";

/// A registered user together with a token that resolves to them.
#[derive(Debug, Clone)]
pub struct TestUser {
    pub id: UserId,
    pub username: String,
    pub password: String,
    pub token: String,
}

/// A service instance over a fresh store.
pub struct TestFixture<S: Store> {
    pub app: Notekeep<S, HmacTokenCodec>,
}

impl TestFixture<MemoryStore> {
    /// Fixture over an in-memory map store.
    pub fn memory() -> Self {
        Self::with_store(MemoryStore::new())
    }
}

impl TestFixture<SqliteStore> {
    /// Fixture over an in-memory SQLite database.
    pub fn sqlite_memory() -> Result<Self> {
        Ok(Self::with_store(SqliteStore::open_memory()?))
    }

    /// Fixture over a SQLite database file.
    pub fn sqlite(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::with_store(SqliteStore::open(path)?))
    }
}

impl<S: Store> TestFixture<S> {
    /// Wrap a store with the default configuration and [`TEST_SECRET`].
    pub fn with_store(store: S) -> Self {
        let app = HmacTokenCodec::new(TEST_SECRET.to_vec())
            .map_err(|e| NotekeepError::Core(e.into()))
            .and_then(|codec| Notekeep::new(store, codec, NotekeepConfig::default()));
        match app {
            Ok(app) => Self { app },
            // A non-empty secret and the default configuration always validate.
            Err(e) => unreachable!("fixture setup rejected: {e}"),
        }
    }

    /// Register `username` with a password derived from the name.
    pub async fn user(&self, username: &str) -> Result<TestUser> {
        let password = format!("{username}-pw");
        let token = self.app.auth().register(username, &password).await?;
        let id = self.app.auth().resolve_identity(Some(&token))?;
        Ok(TestUser {
            id,
            username: username.to_string(),
            password,
            token,
        })
    }

    /// Create `count` notes titled `"{username} #{i}"` for `owner`.
    pub async fn seed_notes(&self, owner: &TestUser, count: usize, public: bool) -> Result<Vec<Note>> {
        let mut notes = Vec::with_capacity(count);
        for i in 0..count {
            let draft = NoteDraft::new(
                format!("{} #{i}", owner.username),
                format!("body {i}"),
            )
            .public(public);
            notes.push(self.app.notes().create(owner.id, draft).await?);
        }
        Ok(notes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fixture_user_token_resolves() {
        let fixture = TestFixture::memory();
        let alice = fixture.user("alice").await.unwrap();

        assert_eq!(
            fixture.app.auth().resolve_identity(Some(&alice.token)).unwrap(),
            alice.id
        );
        fixture.app.auth().login("alice", &alice.password).await.unwrap();
    }

    #[tokio::test]
    async fn test_seed_notes() {
        let fixture = TestFixture::sqlite_memory().unwrap();
        let alice = fixture.user("alice").await.unwrap();

        let notes = fixture.seed_notes(&alice, 3, true).await.unwrap();
        assert_eq!(notes.len(), 3);
        assert!(notes.iter().all(|n| n.is_public && n.author_id == alice.id));
        assert!(notes.windows(2).all(|w| w[0].id < w[1].id));
    }

    #[tokio::test]
    async fn test_distinct_users() {
        let fixture = TestFixture::memory();
        let a = fixture.user("a").await.unwrap();
        let b = fixture.user("b").await.unwrap();
        assert_ne!(a.id, b.id);
        assert_ne!(a.token, b.token);
    }
}
