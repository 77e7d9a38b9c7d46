//! The Notekeep service: one store, one codec, both access cores.

use std::sync::Arc;

use notekeep_core::TokenCodec;
use notekeep_store::Store;

use crate::auth::Authenticator;
use crate::config::NotekeepConfig;
use crate::error::Result;
use crate::guard::NoteAccessGuard;

/// Wires an [`Authenticator`] and a [`NoteAccessGuard`] to a shared store.
///
/// Handlers hold one of these and route each request to `auth()` or
/// `notes()`.
pub struct Notekeep<S: Store, C: TokenCodec> {
    store: Arc<S>,
    auth: Authenticator<S, C>,
    notes: NoteAccessGuard<S>,
    config: NotekeepConfig,
}

impl<S: Store, C: TokenCodec> Notekeep<S, C> {
    /// Create a service instance. Fails if the configuration is invalid.
    pub fn new(store: S, codec: C, config: NotekeepConfig) -> Result<Self> {
        config.validate()?;

        let store = Arc::new(store);
        let codec = Arc::new(codec);
        Ok(Self {
            auth: Authenticator::new(Arc::clone(&store), codec, &config),
            notes: NoteAccessGuard::new(Arc::clone(&store)),
            store,
            config,
        })
    }

    /// Registration, login and token resolution.
    pub fn auth(&self) -> &Authenticator<S, C> {
        &self.auth
    }

    /// Visibility-scoped note access.
    pub fn notes(&self) -> &NoteAccessGuard<S> {
        &self.notes
    }

    /// The validated configuration.
    pub fn config(&self) -> &NotekeepConfig {
        &self.config
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }
}
