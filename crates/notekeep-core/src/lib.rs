//! # Notekeep Core
//!
//! Pure primitives for Notekeep: identifiers, records, password credentials
//! and identity tokens.
//!
//! This crate contains no I/O, no storage, no networking.
//!
//! ## Key Types
//!
//! - [`User`], [`Note`], [`NoteDraft`] - Plain data records
//! - [`PasswordHasher`], [`Credential`] - PBKDF2-HMAC-SHA256 credentials
//! - [`TokenCodec`], [`HmacTokenCodec`], [`Claims`] - Identity tokens
//! - [`Page`] - Validated pagination bounds

pub mod credential;
pub mod error;
pub mod page;
pub mod token;
pub mod types;
pub mod view;

pub use credential::{Credential, PasswordHasher, HASH_LEN};
pub use error::{CoreError, PageError, TokenError};
pub use page::{Page, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
pub use token::{Claims, HmacTokenCodec, TokenCodec};
pub use types::{now_millis, Note, NoteDraft, NoteId, User, UserId};
pub use view::note_to_json;
