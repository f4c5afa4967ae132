//! Data models for collected news items.
//!
//! - [`NewsItem`]: one cleaned, normalized headline with its article link
//! - [`NewsSource`]: which dialect produced the item (or `Fallback`)
//!
//! Items are built fresh on every fetch and are not mutated afterwards,
//! apart from the importance score the collector attaches once.

use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// Minimum number of characters a cleaned title must have.
pub const MIN_TITLE_CHARS: usize = 5;

/// Where a news item came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NewsSource {
    Naver,
    Daum,
    Google,
    Fallback,
}

impl fmt::Display for NewsSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NewsSource::Naver => "Naver",
            NewsSource::Daum => "Daum",
            NewsSource::Google => "Google",
            NewsSource::Fallback => "Fallback",
        };
        f.write_str(name)
    }
}

/// A single news headline ready for the newsletter.
///
/// The `date` is a display date in `YYYY.MM.DD` form; `raw_date` keeps the
/// `pubDate` exactly as the feed published it, for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    /// Cleaned headline.
    pub title: String,
    /// Absolute article URL, with any Google News redirect unwrapped.
    pub url: String,
    /// Display date, `YYYY.MM.DD`.
    pub date: String,
    /// Feed date string as published, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_date: Option<String>,
    pub source: NewsSource,
    /// Keyword-weighted score in `0..=5`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub importance: Option<u8>,
}

impl NewsItem {
    /// Key used for case-insensitive title deduplication.
    pub fn title_key(&self) -> String {
        self.title.to_lowercase()
    }

    /// Whether the item meets the title length and absolute-URL floor.
    ///
    /// The URL must literally start with `http://` or `https://` and parse
    /// with an `http(s)` scheme and a host. `http:example.com` parses fine
    /// but is not accepted.
    pub fn meets_quality_floor(&self) -> bool {
        self.title.chars().count() >= MIN_TITLE_CHARS && is_web_url(&self.url)
    }
}

fn is_web_url(url: &str) -> bool {
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return false;
    }
    Url::parse(url).is_ok_and(|u| matches!(u.scheme(), "http" | "https") && u.has_host())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(title: &str, url: &str) -> NewsItem {
        NewsItem {
            title: title.to_string(),
            url: url.to_string(),
            date: "2024.01.02".to_string(),
            raw_date: None,
            source: NewsSource::Naver,
            importance: None,
        }
    }

    #[test]
    fn test_title_key_is_lowercase() {
        assert_eq!(item("Court Rules Today", "https://a.kr").title_key(), "court rules today");
    }

    #[test]
    fn test_quality_floor_counts_characters_not_bytes() {
        // four Hangul syllables are 12 bytes but only 4 characters
        assert!(!item("법원판결", "https://a.kr/1").meets_quality_floor());
        assert!(item("법원 판결", "https://a.kr/1").meets_quality_floor());
    }

    #[test]
    fn test_quality_floor_rejects_relative_urls() {
        assert!(!item("A long enough title", "/news/1").meets_quality_floor());
        assert!(!item("A long enough title", "ftp://a.kr/1").meets_quality_floor());
        assert!(!item("A long enough title", "httpish-text").meets_quality_floor());
        assert!(!item("A long enough title", "httpx://evil.example.com/a").meets_quality_floor());
        assert!(!item("A long enough title", "http:example.com/a").meets_quality_floor());
        assert!(item("A long enough title", "http://example.com/a").meets_quality_floor());
    }

    #[test]
    fn test_news_item_serialization_skips_empty_options() {
        let json = serde_json::to_string(&item("Some headline", "https://a.kr")).unwrap();
        assert!(json.contains("\"source\":\"Naver\""));
        assert!(!json.contains("raw_date"));
        assert!(!json.contains("importance"));
    }

    #[test]
    fn test_news_item_deserialization() {
        let json = r#"{
            "title": "개인정보보호법 개정안 국회 통과",
            "url": "https://news.example.com/law1",
            "date": "2024.05.06",
            "source": "Fallback",
            "importance": 3
        }"#;
        let parsed: NewsItem = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.source, NewsSource::Fallback);
        assert_eq!(parsed.importance, Some(3));
        assert_eq!(parsed.raw_date, None);
    }

    #[test]
    fn test_source_display() {
        assert_eq!(NewsSource::Google.to_string(), "Google");
        assert_eq!(NewsSource::Fallback.to_string(), "Fallback");
    }
}
