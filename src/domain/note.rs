// src/domain/note.rs
use serde::{Deserialize, Serialize};

/// A note as owned and identified by the remote service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: String,
    pub title: String,
    pub body: String,
}

/// Creation payload; the service assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoteDraft {
    pub title: String,
    pub body: String,
}

impl NoteDraft {
    /// Build a draft from raw input, trimming both fields
    pub fn from_input(title: &str, body: &str) -> Self {
        Self {
            title: title.trim().to_string(),
            body: body.trim().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_padded_input_when_building_draft_then_trims_both_fields() {
        let draft = NoteDraft::from_input("  Groceries \n", "\tmilk, eggs  ");

        assert_eq!(draft.title, "Groceries");
        assert_eq!(draft.body, "milk, eggs");
    }

    #[test]
    fn given_service_payload_with_extra_fields_when_deserializing_then_ignores_them() {
        let json = r#"{
            "id": "notes-jT-jjsyz61J8XKiI",
            "title": "Welcome",
            "body": "First note",
            "createdAt": "2022-07-28T10:03:12.594Z",
            "archived": false
        }"#;

        let note: Note = serde_json::from_str(json).expect("Note should deserialize");

        assert_eq!(note.id, "notes-jT-jjsyz61J8XKiI");
        assert_eq!(note.title, "Welcome");
        assert_eq!(note.body, "First note");
    }
}
