use serde::{Deserialize, Serialize};

/// Category a note is filed under.
///
/// Categories are created server-side; the client only reads them.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct NoteCategory {
    pub id: i64,
    pub name: String,
    /// Hex color, e.g. `#EF9C66`.
    pub color: String,

    // Present on some backend versions; never required.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_default: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<i64>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct NoteItem {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub created_at: String,
    /// Only ever taken from a server response.
    pub edited_at: String,
    pub category: NoteCategory,
    pub user_id: i64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct CreateNotePayload {
    pub title: String,
    pub content: String,
    pub category_id: i64,
}

impl CreateNotePayload {
    /// Blank note filed under `category_id` (dashboard "New Note").
    pub fn blank(category_id: i64) -> Self {
        Self {
            title: String::new(),
            content: String::new(),
            category_id,
        }
    }

    /// Form fields in the order the backend documents them.
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("title", self.title.clone()),
            ("content", self.content.clone()),
            ("category_id", self.category_id.to_string()),
        ]
    }
}

/// Partial update body for `PATCH /api/notes/{id}/`.
///
/// Absent fields are omitted from the JSON so the server leaves them alone.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct UpdateNotePayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_payload_omits_absent_fields() {
        let payload = UpdateNotePayload {
            title: Some("T".to_string()),
            ..Default::default()
        };
        let v = serde_json::to_value(payload).expect("should serialize");
        assert_eq!(v, serde_json::json!({ "title": "T" }));
    }

    #[test]
    fn test_create_payload_form_fields_stringify_category() {
        let fields = CreateNotePayload::blank(7).form_fields();
        assert_eq!(
            fields,
            vec![
                ("title", String::new()),
                ("content", String::new()),
                ("category_id", "7".to_string()),
            ]
        );
    }

    #[test]
    fn test_category_tolerates_optional_backend_fields() {
        let json = r##"{"id": 1, "name": "School", "color": "#FCDC94", "is_default": true, "owner_id": null}"##;
        let parsed: NoteCategory = serde_json::from_str(json).expect("category should parse");
        assert_eq!(parsed.id, 1);
        assert_eq!(parsed.is_default, Some(true));
        assert!(parsed.owner_id.is_none());
    }
}
