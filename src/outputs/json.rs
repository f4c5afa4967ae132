//! JSON snapshot of the collected news for the newsletter renderer.
//!
//! The snapshot lives at `{dir}/news_cache.json` and is only considered
//! current on the local day it was written:
//!
//! ```json
//! { "date": "2024-05-06", "timestamp": "2024-05-06T09:12:44+09:00", "news": [ ... ] }
//! ```

use crate::models::NewsItem;
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::path::PathBuf;
use tokio::fs;
use tracing::{debug, info, instrument, warn};

pub const SNAPSHOT_FILE: &str = "news_cache.json";

#[derive(Debug, Serialize, Deserialize)]
pub struct NewsSnapshot {
    /// Local date of writing, `YYYY-MM-DD`.
    pub date: String,
    /// RFC-3339 local timestamp of writing.
    pub timestamp: String,
    pub news: Vec<NewsItem>,
}

fn snapshot_path(dir: &str) -> PathBuf {
    PathBuf::from(dir).join(SNAPSHOT_FILE)
}

/// Write `items` as today's snapshot, replacing any previous one.
#[instrument(level = "info", skip_all, fields(dir = %dir))]
pub async fn write_snapshot(items: &[NewsItem], dir: &str) -> Result<PathBuf, Box<dyn Error>> {
    let now = Local::now();
    let snapshot = NewsSnapshot {
        date: now.date_naive().to_string(),
        timestamp: now.to_rfc3339(),
        news: items.to_vec(),
    };
    let json = serde_json::to_string_pretty(&snapshot)?;

    fs::create_dir_all(dir).await?;
    let path = snapshot_path(dir);
    fs::write(&path, json).await?;
    info!(path = %path.display(), count = items.len(), "Wrote news snapshot");
    Ok(path)
}

/// Today's snapshot items, or an empty list if the snapshot is missing,
/// unreadable or from another day.
#[instrument(level = "info", skip_all, fields(dir = %dir))]
pub async fn load_snapshot(dir: &str) -> Vec<NewsItem> {
    let path = snapshot_path(dir);
    let text = match fs::read_to_string(&path).await {
        Ok(text) => text,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "No readable news snapshot");
            return Vec::new();
        }
    };
    let snapshot: NewsSnapshot = match serde_json::from_str(&text) {
        Ok(snapshot) => snapshot,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Ignoring malformed news snapshot");
            return Vec::new();
        }
    };

    let today = Local::now().date_naive().to_string();
    if snapshot.date != today {
        debug!(snapshot_date = %snapshot.date, %today, "News snapshot is stale");
        return Vec::new();
    }
    snapshot.news
}
