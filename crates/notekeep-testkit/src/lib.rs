//! # Notekeep Testkit
//!
//! Testing utilities for Notekeep.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Fixtures**: a ready-wired service with helpers for registering users
//!   and seeding notes
//! - **Generators**: Proptest strategies for usernames, passwords and drafts
//!
//! ## Test Fixtures
//!
//! ```rust,no_run
//! use notekeep_testkit::fixtures::TestFixture;
//!
//! async fn example() {
//!     let fixture = TestFixture::memory();
//!     let alice = fixture.user("alice").await.unwrap();
//!     fixture.seed_notes(&alice, 3, false).await.unwrap();
//! }
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use notekeep_testkit::generators::{note_draft, username};
//!
//! proptest! {
//!     #[test]
//!     fn drafts_have_titles(draft in note_draft()) {
//!         prop_assert!(!draft.title.is_empty());
//!     }
//! }
//! ```

pub mod fixtures;
pub mod generators;

pub use fixtures::{TestFixture, TestUser, TEST_SECRET};
pub use generators::{note_draft, password, username, NoteShape};
