use crate::models::{NoteItem, UpdateNotePayload};

/// Editable fields of a loaded note, kept in memory until a save succeeds.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct NoteDraft {
    pub title: String,
    pub content: String,
    pub category_id: i64,
}

/// One user edit to a draft.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum DraftEdit {
    Title(String),
    Content(String),
    Category(i64),
}

impl NoteDraft {
    pub fn from_note(note: &NoteItem) -> Self {
        Self {
            title: note.title.clone(),
            content: note.content.clone(),
            category_id: note.category.id,
        }
    }

    /// Returns whether the edit changed anything.
    pub fn apply(&mut self, edit: DraftEdit) -> bool {
        match edit {
            DraftEdit::Title(v) if v != self.title => self.title = v,
            DraftEdit::Content(v) if v != self.content => self.content = v,
            DraftEdit::Category(id) if id != self.category_id => self.category_id = id,
            _ => return false,
        }
        true
    }

    /// Autosave sends every editable field.
    pub fn to_update_payload(&self) -> UpdateNotePayload {
        UpdateNotePayload {
            title: Some(self.title.clone()),
            content: Some(self.content.clone()),
            category_id: Some(self.category_id),
        }
    }
}
