//! # Notekeep
//!
//! The access core of a multi-user note service: credential verification,
//! identity tokens, and visibility-scoped note access over a relational
//! store.
//!
//! ## Overview
//!
//! - **Authenticator**: register and log in users, issue identity tokens,
//!   resolve tokens back to user ids
//! - **NoteAccessGuard**: list, read, create, update and delete notes under
//!   the visibility rules
//!
//! ## Key Concepts
//!
//! - **Visibility**: public notes are readable by anyone; private notes only
//!   by their author.
//! - **Existence leak**: a private note owned by someone else looks exactly
//!   like a missing one.
//! - **Scoped mutation**: updates and deletes match note id and author id in
//!   one atomic store operation.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use notekeep::{Notekeep, NotekeepConfig};
//! use notekeep::core::{HmacTokenCodec, NoteDraft};
//! use notekeep::store::SqliteStore;
//!
//! async fn example() {
//!     let store = SqliteStore::open("notekeep.db").unwrap();
//!     let codec = HmacTokenCodec::new(b"server secret".to_vec()).unwrap();
//!     let app = Notekeep::new(store, codec, NotekeepConfig::default()).unwrap();
//!
//!     let token = app.auth().register("alice", "pw1").await.unwrap();
//!     let alice = app.auth().resolve_identity(Some(&token)).unwrap();
//!
//!     let note = app
//!         .notes()
//!         .create(alice, NoteDraft::new("T1", "B1"))
//!         .await
//!         .unwrap();
//!
//!     let page = app.config().page(Some(1), Some(10)).unwrap();
//!     let visible = app.notes().list_visible(alice, page).await.unwrap();
//!     assert_eq!(visible[0].id, note.id);
//! }
//! ```
//!
//! ## Re-exports
//!
//! - `notekeep::core` - Records, credentials, tokens, pagination
//! - `notekeep::store` - Storage abstraction and SQLite

pub mod auth;
pub mod config;
pub mod error;
pub mod guard;
pub mod service;

// Re-export component crates
pub use notekeep_core as core;
pub use notekeep_store as store;

// Re-export main types for convenience
pub use auth::Authenticator;
pub use config::{NotekeepConfig, PasswordConfig};
pub use error::{NotekeepError, OptionExt, Result};
pub use guard::NoteAccessGuard;
pub use service::Notekeep;

// Re-export commonly used core types
pub use notekeep_core::{
    note_to_json, Claims, HmacTokenCodec, Note, NoteDraft, NoteId, Page, TokenCodec, User, UserId,
};
