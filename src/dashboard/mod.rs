//! Logic behind the home dashboard: counting, filtering and creating a note
//! in the default category.

use crate::api::{ApiClient, Transport};
use crate::models::{CreateNotePayload, NoteCategory, NoteItem};

pub(crate) const DEFAULT_CATEGORY_NAME: &str = "Random Thoughts";
pub(crate) const EMPTY_CATEGORIES: &str = "Could not create note: category list is empty.";
pub(crate) const CREATE_NOTE_FAILED: &str = "Could not create note.";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) enum CategoryFilter {
    #[default]
    All,
    Category(i64),
}

impl CategoryFilter {
    pub fn matches(&self, note: &NoteItem) -> bool {
        match self {
            Self::All => true,
            Self::Category(id) => note.category.id == *id,
        }
    }

    pub fn selects(&self, category_id: i64) -> bool {
        *self == Self::Category(category_id)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct CategoryCount {
    pub category: NoteCategory,
    pub count: usize,
}

/// One entry per category, in category order, zero counts included.
pub(crate) fn category_counts(categories: &[NoteCategory], notes: &[NoteItem]) -> Vec<CategoryCount> {
    categories
        .iter()
        .map(|category| CategoryCount {
            category: category.clone(),
            count: notes.iter().filter(|n| n.category.id == category.id).count(),
        })
        .collect()
}

pub(crate) fn filter_notes(notes: &[NoteItem], filter: CategoryFilter) -> Vec<NoteItem> {
    notes.iter().filter(|n| filter.matches(n)).cloned().collect()
}

/// Category a freshly created note lands in.
pub(crate) fn resolve_default_category(categories: &[NoteCategory]) -> Result<&NoteCategory, &'static str> {
    categories
        .iter()
        .find(|c| c.name == DEFAULT_CATEGORY_NAME)
        .or_else(|| categories.first())
        .ok_or(EMPTY_CATEGORIES)
}

/// "New Note": an empty note in the default category.
///
/// Errors come back as the status text to show. With no categories nothing
/// is sent.
pub(crate) async fn create_in_default_category<T: Transport>(
    client: &ApiClient<T>,
    categories: &[NoteCategory],
) -> Result<NoteItem, String> {
    let category = resolve_default_category(categories).map_err(str::to_string)?;
    client
        .create_note(&CreateNotePayload::blank(category.id))
        .await
        .map_err(|e| e.status_or(CREATE_NOTE_FAILED))
}
