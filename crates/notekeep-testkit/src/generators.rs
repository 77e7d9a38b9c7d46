//! Proptest generators for property-based testing.

use proptest::prelude::*;

use notekeep_core::NoteDraft;

/// Generate a username.
pub fn username() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,15}".prop_map(String::from)
}

/// Generate a password. Any non-empty printable string.
pub fn password() -> impl Strategy<Value = String> {
    "[ -~]{1,32}".prop_map(String::from)
}

/// Generate a note title.
pub fn title() -> impl Strategy<Value = String> {
    "[A-Za-z0-9 ]{1,40}".prop_map(String::from)
}

/// Generate a note body.
pub fn body() -> impl Strategy<Value = String> {
    "[ -~\n]{1,200}".prop_map(String::from)
}

/// Generate a note draft with either visibility.
pub fn note_draft() -> impl Strategy<Value = NoteDraft> {
    (title(), body(), any::<bool>())
        .prop_map(|(title, body, public)| NoteDraft::new(title, body).public(public))
}

/// One note in a generated population: which user owns it, and whether it
/// is public.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoteShape {
    pub owner: usize,
    pub is_public: bool,
}

impl Arbitrary for NoteShape {
    type Parameters = usize;
    type Strategy = BoxedStrategy<Self>;

    /// `users` is the number of owners to pick from; 0 means 3.
    fn arbitrary_with(users: Self::Parameters) -> Self::Strategy {
        let users = if users == 0 { 3 } else { users };
        (0..users, any::<bool>())
            .prop_map(|(owner, is_public)| NoteShape { owner, is_public })
            .boxed()
    }
}

/// Generate a population of up to `max` notes among `users` owners.
pub fn note_population(users: usize, max: usize) -> impl Strategy<Value = Vec<NoteShape>> {
    prop::collection::vec(any_with::<NoteShape>(users), 0..=max)
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #[test]
        fn test_usernames_nonempty(name in username()) {
            prop_assert!(!name.is_empty());
            prop_assert!(name.len() <= 16);
        }

        #[test]
        fn test_passwords_printable(pw in password()) {
            prop_assert!(!pw.is_empty());
            prop_assert!(pw.chars().all(|c| (' '..='~').contains(&c)));
        }

        #[test]
        fn test_drafts_have_title_and_body(draft in note_draft()) {
            prop_assert!(!draft.title.is_empty());
            prop_assert!(!draft.body.is_empty());
        }

        #[test]
        fn test_population_owners_in_range(shapes in note_population(4, 20)) {
            prop_assert!(shapes.len() <= 20);
            prop_assert!(shapes.iter().all(|s| s.owner < 4));
        }
    }
}
