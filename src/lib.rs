//! # Newsletter News
//!
//! Collects fresh news headlines for a small-business email newsletter from
//! Naver, Daum and Google News RSS feeds (or any RSS 2.0 feed).
//!
//! ## Pipeline
//!
//! 1. **Fetch**: each feed is classified into a dialect and fetched once, with
//!    a per-feed timeout ([`feeds`])
//! 2. **Normalize**: titles are cleaned, Google News redirects unwrapped and
//!    dates rendered as `YYYY.MM.DD` ([`feeds::links`], [`feeds::dates`])
//! 3. **Filter**: excluded topics, duplicates, low-quality items and unresolved
//!    Google links are dropped ([`collector`])
//! 4. **Finish**: newest first, padded with fallback samples when short,
//!    truncated, scored and cached for 30 minutes ([`cache`], [`scoring`])
//!
//! ## Example
//!
//! ```no_run
//! use newsletter_news::{CollectRequest, NewsCache, NewsCollector, RssFetcher};
//! use newsletter_news::feeds::DEFAULT_USER_AGENT;
//! use std::sync::Arc;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let fetcher = RssFetcher::new(DEFAULT_USER_AGENT)?;
//! let collector = NewsCollector::new(fetcher, Arc::new(NewsCache::default()));
//! let collection = collector
//!     .collect(&CollectRequest {
//!         sources: vec!["https://news.daum.net/rss/society".to_string()],
//!         limit: 5,
//!         allow_fallback: true,
//!         force_refresh: false,
//!     })
//!     .await;
//! for item in &collection.items {
//!     println!("{} {}", item.date, item.title);
//! }
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod cli;
pub mod collector;
pub mod config;
pub mod error;
pub mod fallback;
pub mod feeds;
pub mod models;
pub mod outputs;
pub mod scoring;
pub mod utils;

pub use cache::NewsCache;
pub use collector::{CollectRequest, Collection, NewsCollector, Origin};
pub use config::NewsConfig;
pub use error::{ConfigError, DateParseError, FetchError};
pub use feeds::{FetchFeed, RssFetcher, SourceKind};
pub use models::{NewsItem, NewsSource};
