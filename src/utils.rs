//! Text cleaning helpers for feed titles, plus small logging and file system utilities.
//!
//! Feed titles arrive with HTML markup, bracketed desk prefixes such as
//! `[속보]`, non-breaking or zero-width characters and ragged whitespace.
//! [`clean_title`] runs the full chain; the individual steps are exposed for
//! the collector and for tests.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::Html;
use std::collections::HashSet;
use std::error::Error;
use std::fs as stdfs;
use tokio::fs;
use tracing::{info, instrument};

static BRACKETED: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[.*?\]").unwrap());
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Remove HTML tags and decode entities, keeping only the text content.
///
/// Naver and Daum titles sometimes carry `<b>` highlighting, and some feeds
/// double-escape markup so it only shows up after XML unescaping.
pub fn strip_tags(s: &str) -> String {
    if !s.contains('<') && !s.contains('&') {
        return s.to_string();
    }
    let fragment = Html::parse_fragment(s);
    fragment.root_element().text().collect::<String>()
}

/// Remove every `[...]` segment (desk tags like `[단독]`, `[속보]`).
pub fn strip_brackets(s: &str) -> String {
    BRACKETED.replace_all(s, "").into_owned()
}

/// Replace non-breaking and typographic spaces with a plain space and drop
/// zero-width characters.
pub fn normalize_spaces(s: &str) -> String {
    s.chars()
        .filter_map(|c| match c {
            '\u{00a0}' | '\u{2000}'..='\u{200a}' | '\u{3000}' => Some(' '),
            '\u{200b}' | '\u{200c}' | '\u{200d}' | '\u{feff}' => None,
            other => Some(other),
        })
        .collect()
}

/// Collapse runs of whitespace into one space and trim both ends.
pub fn collapse_whitespace(s: &str) -> String {
    WHITESPACE.replace_all(s.trim(), " ").into_owned()
}

/// Full title cleaning chain used by every feed dialect.
pub fn clean_title(raw: &str) -> String {
    let text = strip_tags(raw);
    let text = strip_brackets(&text);
    let text = normalize_spaces(&text);
    collapse_whitespace(&text)
}

/// Word-set Jaccard similarity of two titles, in `0.0..=1.0`.
pub fn title_similarity(a: &str, b: &str) -> f64 {
    let words_a: HashSet<&str> = a.split_whitespace().collect();
    let words_b: HashSet<&str> = b.split_whitespace().collect();
    let union = words_a.union(&words_b).count();
    if union == 0 {
        return 0.0;
    }
    let intersection = words_a.intersection(&words_b).count();
    intersection as f64 / union as f64
}

/// Truncate a string for logging purposes.
///
/// Cuts on a character boundary so Hangul titles never split mid-codepoint,
/// then appends `"…(+N bytes)"` with the number of bytes dropped.
pub fn truncate_for_log(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        None => s.to_string(),
        Some((cut, _)) => format!("{}…(+{} bytes)", &s[..cut], s.len() - cut),
    }
}

/// Ensure a directory exists and is writable.
///
/// Creates the directory if needed, then writes and removes a probe file.
#[instrument(level = "info", skip_all, fields(path = %path))]
pub async fn ensure_writable_dir(path: &str) -> Result<(), Box<dyn Error>> {
    fs::create_dir_all(path).await?;
    let probe_path = format!("{}/..__probe_write__", path.trim_end_matches('/'));
    stdfs::File::create(&probe_path)?;
    let _ = stdfs::remove_file(&probe_path);
    info!("Snapshot directory is writable");
    Ok(())
}
