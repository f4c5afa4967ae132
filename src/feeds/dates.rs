//! Feed date normalization to the newsletter's `YYYY.MM.DD` display form.

use crate::error::DateParseError;
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};

/// Display format for every news date.
pub const DISPLAY_FORMAT: &str = "%Y.%m.%d";

/// Parse a feed date into a calendar date in the feed's own offset.
///
/// Accepts RFC-2822 (`pubDate`), RFC-3339 / ISO-8601 with offset or `Z`,
/// and offset-less ISO forms (`2023-12-19T14:30:00`, `2023-12-19`).
pub fn parse_feed_date(raw: &str) -> Result<NaiveDate, DateParseError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(DateParseError::Empty);
    }

    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Ok(dt.date_naive());
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.date_naive());
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(dt.date());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date);
    }

    Err(DateParseError::Unrecognized(raw.to_string()))
}

/// Normalize a feed date to `YYYY.MM.DD`, using today's local date when the
/// string is empty or unparsable.
pub fn normalize_date(raw: &str) -> String {
    parse_feed_date(raw)
        .unwrap_or_else(|e| {
            tracing::debug!(raw, error = %e, "Falling back to today's date");
            today()
        })
        .format(DISPLAY_FORMAT)
        .to_string()
}

/// Parse a display date produced by [`normalize_date`].
pub fn parse_display_date(date: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date, DISPLAY_FORMAT).ok()
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today_display() -> String {
        today().format(DISPLAY_FORMAT).to_string()
    }

    #[test]
    fn test_rfc2822() {
        assert_eq!(normalize_date("Tue, 19 Dec 2023 14:30:00 GMT"), "2023.12.19");
        assert_eq!(normalize_date("Wed, 03 Jan 2024 09:05:00 +0900"), "2024.01.03");
    }

    #[test]
    fn test_rfc2822_keeps_feed_offset_date() {
        // 23:30 at +09:00 is still the 19th in the feed's own zone
        assert_eq!(normalize_date("Tue, 19 Dec 2023 23:30:00 +0900"), "2023.12.19");
    }

    #[test]
    fn test_iso8601_with_z_suffix() {
        assert_eq!(normalize_date("2023-12-19T14:30:00Z"), "2023.12.19");
        assert_eq!(normalize_date("2023-12-19T14:30:00+09:00"), "2023.12.19");
    }

    #[test]
    fn test_iso8601_without_offset() {
        assert_eq!(normalize_date("2023-12-19T14:30:00"), "2023.12.19");
        assert_eq!(normalize_date("2023-12-19"), "2023.12.19");
    }

    #[test]
    fn test_unparsable_falls_back_to_today() {
        assert_eq!(normalize_date("sometime last week"), today_display());
        assert_eq!(normalize_date(""), today_display());
        assert_eq!(normalize_date("   "), today_display());
    }

    #[test]
    fn test_parse_feed_date_errors() {
        assert_eq!(parse_feed_date(""), Err(DateParseError::Empty));
        assert_eq!(
            parse_feed_date("nope"),
            Err(DateParseError::Unrecognized("nope".to_string()))
        );
    }

    #[test]
    fn test_parse_display_date() {
        assert_eq!(
            parse_display_date("2023.12.19"),
            NaiveDate::from_ymd_opt(2023, 12, 19)
        );
        assert_eq!(parse_display_date("2023-12-19"), None);
    }
}
