//! Shape checks for untrusted response bodies.
//!
//! Nothing decoded from the network reaches application state without going
//! through one of these.

use crate::api::error::{ApiError, ApiResult};
use crate::models::{NoteCategory, NoteItem};
use serde_json::Value;

/// Outcome of checking a decoded value against an expected shape.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Validation<T> {
    Valid(T),
    Invalid,
}

impl<T> Validation<T> {
    #[cfg(test)]
    pub fn is_valid(&self) -> bool {
        matches!(self, Validation::Valid(_))
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Validation::Valid(v) => Some(v),
            Validation::Invalid => None,
        }
    }
}

impl<T> From<Option<T>> for Validation<T> {
    fn from(v: Option<T>) -> Self {
        v.map_or(Validation::Invalid, Validation::Valid)
    }
}

fn get_i64(item: &Value, key: &str) -> Option<i64> {
    item.get(key).and_then(Value::as_i64)
}

fn get_string(item: &Value, key: &str) -> Option<String> {
    item.get(key).and_then(Value::as_str).map(str::to_string)
}

pub(crate) fn validate_category(value: &Value) -> Validation<NoteCategory> {
    let build = || -> Option<NoteCategory> {
        let item = value.is_object().then_some(value)?;
        Some(NoteCategory {
            id: get_i64(item, "id")?,
            name: get_string(item, "name")?,
            color: get_string(item, "color")?,
            is_default: item.get("is_default").and_then(Value::as_bool),
            owner_id: get_i64(item, "owner_id"),
        })
    };
    build().into()
}

pub(crate) fn validate_note(value: &Value) -> Validation<NoteItem> {
    let build = || -> Option<NoteItem> {
        let item = value.is_object().then_some(value)?;
        let category = validate_category(item.get("category")?).into_option()?;
        Some(NoteItem {
            id: get_i64(item, "id")?,
            title: get_string(item, "title")?,
            content: get_string(item, "content")?,
            created_at: get_string(item, "created_at")?,
            edited_at: get_string(item, "edited_at")?,
            category,
            user_id: get_i64(item, "user_id")?,
        })
    };
    build().into()
}

#[cfg(test)]
pub(crate) fn is_note_category(value: &Value) -> bool {
    validate_category(value).is_valid()
}

#[cfg(test)]
pub(crate) fn is_note_item(value: &Value) -> bool {
    validate_note(value).is_valid()
}

/// Valid elements of the array stored under `field`, in order.
///
/// A missing or non-array field yields an empty list instead of an error.
pub(crate) fn collect_valid<T>(
    data: &Value,
    field: &str,
    validate: impl Fn(&Value) -> Validation<T>,
) -> Vec<T> {
    let Some(list) = data.get(field).and_then(Value::as_array) else {
        return vec![];
    };

    list.iter()
        .filter_map(|item| validate(item).into_option())
        .collect()
}

pub(crate) fn parse_note_or_err(data: &Value) -> ApiResult<NoteItem> {
    validate_note(data)
        .into_option()
        .ok_or(ApiError::UnexpectedPayload)
}
