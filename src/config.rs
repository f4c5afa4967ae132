//! Collection settings loaded from a YAML file, with built-in defaults.
//!
//! Every field is optional in the file; anything missing takes the default
//! below. Command-line flags are applied on top in `main`.
//!
//! ```yaml
//! sources:
//!   - https://news.naver.com/rss/section/102.xml
//! google_queries:
//!   - 법률 개정
//! exclude_keywords: [베트남, vietnam]
//! limit: 5
//! fetch_timeout_secs: 8
//! cache_ttl_secs: 1800
//! similarity_threshold: 0.8
//! ```

use crate::error::ConfigError;
use crate::feeds::DEFAULT_USER_AGENT;
use crate::feeds::links::google_news_search_url;
use crate::scoring::ImportanceKeywords;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{info, instrument};

fn strings(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewsConfig {
    /// Feed URLs, fetched in this order.
    pub sources: Vec<String>,
    /// Google News search terms, turned into feed URLs after `sources`.
    pub google_queries: Vec<String>,
    /// Titles containing any of these (case-insensitive substring) are dropped.
    pub exclude_keywords: Vec<String>,
    pub importance: ImportanceKeywords,
    pub limit: usize,
    pub allow_fallback: bool,
    pub fetch_timeout_secs: u64,
    pub cache_ttl_secs: u64,
    pub user_agent: String,
    /// Drop titles whose word overlap with an accepted title exceeds this.
    pub similarity_threshold: Option<f64>,
    pub snapshot_dir: Option<String>,
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self {
            sources: strings(&[
                "https://news.naver.com/rss/section/102.xml",
                "https://news.naver.com/rss/section/101.xml",
                "https://news.naver.com/rss/section/100.xml",
                "https://news.daum.net/rss/society",
                "https://news.daum.net/rss/economic",
            ]),
            google_queries: strings(&[
                "법률 개정",
                "법원 판결",
                "변호사 법무",
                "개인정보보호법",
                "부동산 법률",
                "노동법 근로기준법",
                "법무부 정책",
            ]),
            exclude_keywords: strings(&[
                "베트남", "vietnam", "하노이", "호치민",
                "중국", "china", "일본", "japan",
                "태국", "thailand", "필리핀", "philippines",
                "말레이시아", "malaysia", "싱가포르", "singapore",
                "인도네시아", "indonesia", "라오스", "laos",
                "캄보디아", "cambodia", "미얀마", "myanmar",
            ]),
            importance: ImportanceKeywords::default(),
            limit: 5,
            allow_fallback: true,
            fetch_timeout_secs: 8,
            cache_ttl_secs: 30 * 60,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            similarity_threshold: None,
            snapshot_dir: None,
        }
    }
}

impl NewsConfig {
    /// Load settings from a YAML file.
    #[instrument(level = "info", skip_all, fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path_str = path.as_ref().display().to_string();
        let text = std::fs::read_to_string(path.as_ref()).map_err(|source| ConfigError::Io {
            path: path_str.clone(),
            source,
        })?;
        let config = Self::from_yaml(&text).map_err(|source| ConfigError::Yaml {
            path: path_str,
            source,
        })?;
        info!(
            sources = config.sources.len(),
            google_queries = config.google_queries.len(),
            "Loaded configuration"
        );
        Ok(config)
    }

    pub fn from_yaml(text: &str) -> Result<Self, serde_yaml::Error> {
        // an empty file deserializes as unit, not as an empty mapping
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(text)
    }

    /// All feed URLs to fetch: `sources` then one search feed per query,
    /// without repeats.
    pub fn feed_urls(&self) -> Vec<String> {
        self.sources
            .iter()
            .map(|s| s.trim().to_string())
            .chain(
                self.google_queries
                    .iter()
                    .map(|q| q.trim())
                    .filter(|q| !q.is_empty())
                    .map(google_news_search_url),
            )
            .filter(|s| !s.is_empty())
            .unique()
            .collect()
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}
