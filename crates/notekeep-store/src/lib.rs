//! # Notekeep Store
//!
//! Storage abstraction for Notekeep. Provides a trait-based interface for
//! user and note persistence with SQLite and in-memory implementations.
//!
//! ## Key Types
//!
//! - [`Store`] - The async trait for all storage operations
//! - [`SqliteStore`] - SQLite-based persistent storage
//! - [`MemoryStore`] - In-memory storage for tests
//! - [`InsertResult`] - Result of registering a username
//!
//! ## Usage
//!
//! ```rust,no_run
//! use notekeep_store::{InsertResult, SqliteStore, Store};
//! use notekeep_core::{now_millis, NoteDraft};
//!
//! async fn example() {
//!     let store = SqliteStore::open("notekeep.db").unwrap();
//!
//!     if let InsertResult::Inserted(user) =
//!         store.insert_user("alice", "<encoded credential>", now_millis()).await.unwrap()
//!     {
//!         let note = store
//!             .insert_note(user.id, &NoteDraft::new("title", "body"), now_millis())
//!             .await
//!             .unwrap();
//!         assert_eq!(note.author_username, "alice");
//!     }
//! }
//! ```
//!
//! ## Design Notes
//!
//! - **Uniqueness by constraint**: a taken username surfaces as `UsernameTaken`
//!   from the insert itself
//! - **One transaction per call**: every method commits or leaves no trace
//! - **Scoped mutations**: note update/delete match id and author together
//! - **Cascade**: notes never outlive their author

pub mod error;
pub mod memory;
pub mod migration;
pub mod sqlite;
pub mod traits;

pub use error::{Result, StoreError};
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
pub use traits::{CredentialRecord, InsertResult, Store};
