//! Plain-text export document for the journal.

use chrono::{DateTime, TimeZone};

/// First line of every exported document.
pub const EXPORT_HEADER: &str = "THOUGHT JOURNAL";

/// A rendered export, ready to be written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalExport {
    /// Suggested file name, `thought_<unix millis>.txt`.
    pub file_name: String,
    pub content: String,
}

/// Character count as shown to the user, in UTF-16 code units.
///
/// Characters outside the Basic Multilingual Plane (most emoji) count as two.
pub fn char_count(text: &str) -> usize {
    text.encode_utf16().count()
}

/// Render the export document for `text` at time `now`.
///
/// ```text
/// THOUGHT JOURNAL
///
/// Date: <timestamp>
/// Characters: <N>
///
/// <text>
/// ```
pub fn render<Tz>(text: &str, now: &DateTime<Tz>) -> JournalExport
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let date = now.format("%-m/%-d/%Y, %-I:%M:%S %p");
    let content = format!(
        "{EXPORT_HEADER}\n\nDate: {date}\nCharacters: {}\n\n{text}",
        char_count(text)
    );

    JournalExport {
        file_name: format!("thought_{}.txt", now.timestamp_millis()),
        content,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_render_layout() {
        let now = Utc.with_ymd_and_hms(2026, 3, 7, 21, 5, 9).unwrap();
        let export = render("abc", &now);

        assert_eq!(
            export.content,
            "THOUGHT JOURNAL\n\nDate: 3/7/2026, 9:05:09 PM\nCharacters: 3\n\nabc"
        );
        assert_eq!(export.file_name, format!("thought_{}.txt", now.timestamp_millis()));
    }

    #[test]
    fn test_char_count_uses_utf16_units() {
        assert_eq!(char_count("héllo"), 5);
        assert_eq!(char_count("héllo 💭"), 8);
    }

    #[test]
    fn test_render_counts_emoji_as_two() {
        let now = Utc.with_ymd_and_hms(2026, 3, 7, 21, 5, 9).unwrap();
        let export = render("tired 💭", &now);
        assert!(export.content.contains("\nCharacters: 8\n"));
        assert!(export.content.ends_with("tired 💭"));
    }
}
