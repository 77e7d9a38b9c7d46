//! Record-to-JSON mapping for the handler layer.

use serde_json::{json, Value};

use crate::types::Note;

/// Render a note the way clients see it.
pub fn note_to_json(note: &Note) -> Value {
    json!({
        "note_id": note.id,
        "title": note.title,
        "text": note.body,
        "public": note.is_public,
        "author": note.author_username,
        "created_at": note.created_at,
        "updated_at": note.updated_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{NoteId, UserId};

    #[test]
    fn test_note_to_json() {
        let note = Note {
            id: NoteId(3),
            title: "T1".into(),
            body: "B1".into(),
            is_public: false,
            author_id: UserId(1),
            author_username: "alice".into(),
            created_at: 1_000,
            updated_at: 2_000,
        };
        let value = note_to_json(&note);
        assert_eq!(value["note_id"], 3);
        assert_eq!(value["title"], "T1");
        assert_eq!(value["text"], "B1");
        assert_eq!(value["public"], false);
        assert_eq!(value["author"], "alice");
        assert_eq!(value["updated_at"], 2_000);
        assert!(value.get("author_id").is_none());
    }
}
