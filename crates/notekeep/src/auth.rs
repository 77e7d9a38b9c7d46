//! The Authenticator: registration, login, and token resolution.
//!
//! Passwords are stretched on tokio's blocking pool, the same way the SQLite
//! store runs its queries, so a login never stalls the async runtime.

use std::sync::Arc;

use notekeep_core::{now_millis, Claims, Credential, PasswordHasher, TokenCodec, User, UserId};
use notekeep_store::{InsertResult, Store};
use tracing::{debug, info, warn};

use crate::config::NotekeepConfig;
use crate::error::{NotekeepError, Result};

/// Issues and checks identity tokens against the credential store.
pub struct Authenticator<S: Store, C: TokenCodec> {
    store: Arc<S>,
    codec: Arc<C>,
    hasher: PasswordHasher,
}

impl<S: Store, C: TokenCodec> Authenticator<S, C> {
    /// Create an authenticator over a shared store and codec.
    pub fn new(store: Arc<S>, codec: Arc<C>, config: &NotekeepConfig) -> Self {
        Self {
            store,
            codec,
            hasher: config.password.hasher(),
        }
    }

    /// Register a new user and return their token.
    ///
    /// Non-emptiness of `username` and `password` is the caller's concern.
    /// A taken username is detected by the store's insert, never by a prior
    /// lookup, so two concurrent registrations cannot both succeed.
    pub async fn register(&self, username: &str, password: &str) -> Result<String> {
        let hasher = self.hasher;
        let password = password.to_owned();
        let credential = blocking(move || hasher.hash(&password)).await?;

        match self
            .store
            .insert_user(username, &credential.encode(), now_millis())
            .await?
        {
            InsertResult::Inserted(user) => {
                info!(user_id = %user.id, username = %user.username, "registered user");
                self.mint(&user)
            }
            InsertResult::UsernameTaken => {
                debug!(username, "registration rejected: username taken");
                Err(NotekeepError::DuplicateUser(username.to_string()))
            }
        }
    }

    /// Check a username/password pair and return a token.
    ///
    /// Unknown users and wrong passwords both fail with
    /// [`NotekeepError::InvalidCredentials`], and both cost one full
    /// derivation.
    pub async fn login(&self, username: &str, password: &str) -> Result<String> {
        let hasher = self.hasher;
        let password = password.to_owned();

        let Some(record) = self.store.get_credential(username).await? else {
            blocking(move || hasher.decoy(&password)).await?;
            warn!(username, "login failed");
            return Err(NotekeepError::InvalidCredentials);
        };

        let credential = Credential::decode(&record.credential)?;
        let matches = blocking(move || hasher.verify(&password, &credential)).await?;
        if !matches {
            warn!(username, "login failed");
            return Err(NotekeepError::InvalidCredentials);
        }

        debug!(user_id = %record.user.id, "login succeeded");
        self.mint(&record.user)
    }

    /// Resolve a bearer token to the user id it was issued for.
    pub fn resolve_identity(&self, token: Option<&str>) -> Result<UserId> {
        self.resolve_claims(token).map(|claims| claims.user_id)
    }

    /// Resolve a bearer token to its full claims.
    ///
    /// Absent, malformed, forged, or incomplete tokens all fail with
    /// [`NotekeepError::InvalidCredentials`].
    pub fn resolve_claims(&self, token: Option<&str>) -> Result<Claims> {
        let token = token.ok_or(NotekeepError::InvalidCredentials)?;
        self.codec.parse(token).map_err(|e| {
            warn!(error = %e, "rejected identity token");
            NotekeepError::InvalidCredentials
        })
    }

    fn mint(&self, user: &User) -> Result<String> {
        let claims = Claims::new(user.id, user.username.clone());
        self.codec
            .mint(&claims)
            .map_err(|e| NotekeepError::Core(e.into()))
    }
}

/// Run CPU-bound work off the async runtime.
async fn blocking<F, T>(f: F) -> Result<T>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| NotekeepError::Task(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use notekeep_core::HmacTokenCodec;
    use notekeep_store::MemoryStore;

    fn authenticator() -> Authenticator<MemoryStore, HmacTokenCodec> {
        Authenticator::new(
            Arc::new(MemoryStore::new()),
            Arc::new(HmacTokenCodec::new(b"unit-secret".to_vec()).unwrap()),
            &NotekeepConfig::default(),
        )
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let auth = authenticator();
        let token = auth.register("alice", "pw1").await.unwrap();
        let claims = auth.resolve_claims(Some(&token)).unwrap();
        assert_eq!(claims.username, "alice");

        let login = auth.login("alice", "pw1").await.unwrap();
        assert_eq!(auth.resolve_identity(Some(&login)).unwrap(), claims.user_id);
    }

    #[tokio::test]
    async fn test_duplicate_registration() {
        let auth = authenticator();
        auth.register("alice", "pw1").await.unwrap();
        let err = auth.register("alice", "pw2").await.unwrap_err();
        assert!(matches!(err, NotekeepError::DuplicateUser(ref name) if name == "alice"));

        // The first password still works; the second never took effect.
        auth.login("alice", "pw1").await.unwrap();
        assert!(matches!(
            auth.login("alice", "pw2").await,
            Err(NotekeepError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_unknown_user_and_wrong_password_look_alike() {
        let auth = authenticator();
        auth.register("alice", "pw1").await.unwrap();

        let unknown = auth.login("mallory", "pw1").await.unwrap_err();
        let wrong = auth.login("alice", "wrong").await.unwrap_err();
        assert_eq!(unknown.to_string(), wrong.to_string());
        assert!(matches!(unknown, NotekeepError::InvalidCredentials));
        assert!(matches!(wrong, NotekeepError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_corrupt_stored_credential_is_a_fault() {
        let store = Arc::new(MemoryStore::new());
        store.insert_user("alice", "%%%", 0).await.unwrap();
        let auth = Authenticator::new(
            store,
            Arc::new(HmacTokenCodec::new(b"unit-secret".to_vec()).unwrap()),
            &NotekeepConfig::default(),
        );

        let err = auth.login("alice", "pw1").await.unwrap_err();
        assert!(matches!(err, NotekeepError::Core(_)));
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_absent_or_garbage_token() {
        let auth = authenticator();
        assert!(matches!(
            auth.resolve_identity(None),
            Err(NotekeepError::InvalidCredentials)
        ));
        assert!(matches!(
            auth.resolve_identity(Some("not-a-token")),
            Err(NotekeepError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_token_from_other_secret_rejected() {
        let auth = authenticator();
        let foreign = HmacTokenCodec::new(b"someone-else".to_vec())
            .unwrap()
            .mint(&Claims::new(UserId(1), "alice"))
            .unwrap();
        assert!(matches!(
            auth.resolve_identity(Some(&foreign)),
            Err(NotekeepError::InvalidCredentials)
        ));
    }
}
