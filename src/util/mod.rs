pub(crate) mod timer;

use chrono::{DateTime, Local, NaiveDate, TimeZone};

fn parse_timestamp(value: &str) -> Option<DateTime<Local>> {
    DateTime::parse_from_rfc3339(value.trim())
        .ok()
        .map(|dt| dt.with_timezone(&Local))
}

/// "January 1, 2026 at 3:05pm" in `dt`'s own timezone.
pub(crate) fn format_last_edited_at<Tz: TimeZone>(dt: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    dt.format("%B %-d, %Y at %-I:%M%P").to_string()
}

/// Last-edited label in the browser's local time; empty if unparseable.
pub(crate) fn format_last_edited(value: &str) -> String {
    parse_timestamp(value)
        .map(|dt| format_last_edited_at(&dt))
        .unwrap_or_default()
}

/// Day label for a note card relative to `today`.
pub(crate) fn note_day_label_on(date: NaiveDate, today: NaiveDate) -> String {
    if date == today {
        return "Today".to_string();
    }
    if today.pred_opt() == Some(date) {
        return "Yesterday".to_string();
    }
    date.format("%B %-d").to_string()
}

pub(crate) fn note_day_label(value: &str) -> String {
    parse_timestamp(value)
        .map(|dt| note_day_label_on(dt.date_naive(), Local::now().date_naive()))
        .unwrap_or_default()
}

/// Editor border color when the note's category is unknown.
pub(crate) const FALLBACK_NOTE_COLOR: &str = "#ef9c66";

/// Inline style tinting a surface with a category color.
///
/// `alpha` is a two-digit hex suffix appended to `#rrggbb` colors; any other
/// color syntax is used as-is for the background.
pub(crate) fn tint_style(color: &str, alpha: &str) -> String {
    let color = match color.trim() {
        "" => FALLBACK_NOTE_COLOR,
        c => c,
    };
    let background = if color.len() == 7 && color.starts_with('#') {
        format!("{color}{alpha}")
    } else {
        color.to_string()
    };
    format!("border-color: {color}; background-color: {background};")
}

/// Parse a route segment as a note id.
pub(crate) fn parse_note_id(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok()
}
