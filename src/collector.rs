//! News collection pipeline: fetch, filter, deduplicate, sort, pad, cache.
//!
//! [`NewsCollector::collect`] walks the configured feeds in order and keeps
//! every item that passes, in this order:
//!
//! 1. **Keyword filter**: the lowercased title contains no excluded keyword
//! 2. **Dedup**: neither the lowercased title nor the URL was seen before
//! 3. **Quality floor**: title of at least 5 characters, absolute `http(s)` URL
//! 4. **Platform links**: no Google News link outside `/articles/`
//! 5. **Near duplicates** (optional): word overlap with accepted titles stays
//!    at or below the configured threshold
//!
//! A failing feed is recorded as a diagnostic and skipped; nothing a feed
//! does can abort the collection. Scanning stops once twice the requested
//! number of items has been gathered. The result is sorted newest first,
//! topped up with fallback samples when short, truncated to the limit and
//! cached.

use crate::cache::{NewsCache, cache_key};
use crate::config::NewsConfig;
use crate::fallback::sample_news;
use crate::feeds::FetchFeed;
use crate::feeds::dates::{parse_display_date, today};
use crate::feeds::links::is_unresolved_google_link;
use crate::models::NewsItem;
use crate::scoring::{ImportanceKeywords, score_importance};
use crate::utils::{collapse_whitespace, title_similarity, truncate_for_log};
use std::cmp::Reverse;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// What to collect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectRequest {
    pub sources: Vec<String>,
    pub limit: usize,
    pub allow_fallback: bool,
    pub force_refresh: bool,
}

/// Where the returned items came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Served from a still-valid cache entry.
    Cache,
    /// Collected from the feeds (possibly topped up with samples).
    Live,
    /// Every feed failed; the items are fallback samples only.
    Fallback,
}

/// Result of one collection run.
#[derive(Debug, Clone)]
pub struct Collection {
    pub items: Vec<NewsItem>,
    /// One line per failed feed, e.g. `source 2: feed returned HTTP 503`.
    pub errors: Vec<String>,
    pub successful_sources: usize,
    /// Feed items that passed screening, before fallback top-up and
    /// truncation. Zero for cache hits.
    pub accepted: usize,
    pub origin: Origin,
}

/// Why an item was dropped. Dropping is not an error, only logged.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Rejection {
    Excluded(String),
    DuplicateTitle,
    DuplicateUrl,
    BelowQualityFloor,
    UnresolvedGoogleLink,
    NearDuplicate,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::Excluded(keyword) => write!(f, "excluded keyword {keyword:?}"),
            Rejection::DuplicateTitle => f.write_str("duplicate title"),
            Rejection::DuplicateUrl => f.write_str("duplicate url"),
            Rejection::BelowQualityFloor => f.write_str("below quality floor"),
            Rejection::UnresolvedGoogleLink => f.write_str("unresolved Google News link"),
            Rejection::NearDuplicate => f.write_str("near-duplicate title"),
        }
    }
}

/// Titles and URLs already in the result.
#[derive(Debug, Default)]
struct Seen {
    titles: HashSet<String>,
    urls: HashSet<String>,
    /// Lowercased accepted titles, in order, for the similarity check.
    accepted: Vec<String>,
}

impl Seen {
    fn contains(&self, item: &NewsItem) -> bool {
        self.titles.contains(&item.title_key()) || self.urls.contains(&item.url)
    }

    fn mark(&mut self, item: &NewsItem) {
        let key = item.title_key();
        self.titles.insert(key.clone());
        self.urls.insert(item.url.clone());
        self.accepted.push(key);
    }
}

/// Runs collections against a [`FetchFeed`] implementation and a shared
/// [`NewsCache`].
///
/// The collector holds no per-run state, so one instance can serve
/// concurrent [`collect`](Self::collect) calls; they only share the cache.
pub struct NewsCollector<F> {
    fetcher: F,
    cache: Arc<NewsCache>,
    exclude_keywords: Vec<String>,
    importance: ImportanceKeywords,
    similarity_threshold: Option<f64>,
    fetch_timeout: Duration,
}

impl<F> fmt::Debug for NewsCollector<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewsCollector")
            .field("exclude_keywords", &self.exclude_keywords.len())
            .field("similarity_threshold", &self.similarity_threshold)
            .field("fetch_timeout", &self.fetch_timeout)
            .finish()
    }
}

impl<F: FetchFeed> NewsCollector<F> {
    /// A collector with the default filter settings.
    pub fn new(fetcher: F, cache: Arc<NewsCache>) -> Self {
        Self::from_config(fetcher, cache, &NewsConfig::default())
    }

    /// Build a collector from loaded settings.
    ///
    /// # Arguments
    ///
    /// * `fetcher` - Source of feed items, usually an [`RssFetcher`](crate::feeds::RssFetcher)
    /// * `cache` - Cache shared with other collectors, if any
    /// * `config` - Exclude keywords, importance tiers, similarity threshold
    ///   and per-feed timeout are taken from here
    pub fn from_config(fetcher: F, cache: Arc<NewsCache>, config: &NewsConfig) -> Self {
        Self {
            fetcher,
            cache,
            exclude_keywords: normalize_keywords(&config.exclude_keywords),
            importance: config.importance.clone(),
            similarity_threshold: config.similarity_threshold,
            fetch_timeout: config.fetch_timeout(),
        }
    }

    /// Replace the exclude keywords. Keywords are trimmed and lowercased;
    /// blank ones are ignored.
    pub fn with_exclude_keywords(mut self, keywords: &[String]) -> Self {
        self.exclude_keywords = normalize_keywords(keywords);
        self
    }

    /// Enable (`Some`) or disable (`None`) the near-duplicate title filter.
    pub fn with_similarity_threshold(mut self, threshold: Option<f64>) -> Self {
        self.similarity_threshold = threshold;
        self
    }

    /// The cache this collector reads and writes.
    pub fn cache(&self) -> &Arc<NewsCache> {
        &self.cache
    }

    /// Collect up to `request.limit` news items.
    ///
    /// Never fails: feed errors end up in [`Collection::errors`] and the worst
    /// case is an empty item list.
    #[instrument(level = "info", skip_all, fields(sources = request.sources.len(), limit = request.limit))]
    pub async fn collect(&self, request: &CollectRequest) -> Collection {
        let key = cache_key(&request.sources);
        let limit = request.limit;

        if !request.force_refresh {
            if let Some(mut items) = self.cache.get(&key).await {
                info!(count = items.len(), "Using recently collected news from cache");
                items.truncate(limit);
                return Collection {
                    items,
                    errors: Vec::new(),
                    successful_sources: 0,
                    accepted: 0,
                    origin: Origin::Cache,
                };
            }
        }

        let overscan = limit.saturating_mul(2);
        let per_feed_cap = limit.saturating_mul(3);
        let mut collected: Vec<NewsItem> = Vec::new();
        let mut seen = Seen::default();
        let mut errors = Vec::new();
        let mut successful_sources = 0usize;

        for (index, source) in request.sources.iter().enumerate() {
            let number = index + 1;
            match self.fetcher.fetch(source, self.fetch_timeout).await {
                Err(e) => {
                    warn!(source = %source, error = %e, "Feed fetch failed; skipping source");
                    errors.push(format!("source {number}: {e}"));
                }
                Ok(items) => {
                    successful_sources += 1;
                    let offered = items.len();
                    let mut accepted = 0usize;
                    for item in items {
                        match self.screen(item, &seen) {
                            Ok(item) => {
                                seen.mark(&item);
                                collected.push(item);
                                accepted += 1;
                                if collected.len() >= per_feed_cap {
                                    break;
                                }
                            }
                            Err((title, reason)) => {
                                debug!(title = %truncate_for_log(&title, 60), %reason, "Dropped item");
                            }
                        }
                    }
                    info!(source = number, offered, accepted, "Collected items from source");
                }
            }

            if collected.len() >= overscan {
                debug!(collected = collected.len(), "Enough items gathered; skipping remaining sources");
                break;
            }
        }

        let accepted = collected.len();
        sort_newest_first(&mut collected);

        if collected.len() < limit && request.allow_fallback {
            let samples = sample_news(today());
            if successful_sources == 0 {
                warn!(
                    failed = errors.len(),
                    "Every news source failed; returning fallback samples"
                );
                let items = samples
                    .into_iter()
                    .take(limit)
                    .map(|item| self.scored(item))
                    .collect();
                return Collection {
                    items,
                    errors,
                    successful_sources,
                    accepted,
                    origin: Origin::Fallback,
                };
            }

            let shortfall = limit - collected.len();
            for sample in samples {
                if collected.len() >= limit {
                    break;
                }
                if seen.contains(&sample) {
                    continue;
                }
                seen.mark(&sample);
                collected.push(sample);
            }
            info!(shortfall, "Topped up with fallback samples");
        }

        if collected.len() < limit {
            warn!(
                collected = collected.len(),
                limit, "Fewer news items than requested"
            );
        }

        let items: Vec<NewsItem> = collected
            .into_iter()
            .take(limit)
            .map(|item| self.scored(item))
            .collect();

        self.cache.put(&key, items.clone()).await;
        info!(
            count = items.len(),
            successful_sources,
            failed_sources = errors.len(),
            accepted,
            "News collection complete"
        );

        Collection {
            items,
            errors,
            successful_sources,
            accepted,
            origin: Origin::Live,
        }
    }

    /// Normalize one fetched item and run it through every filter.
    fn screen(&self, item: NewsItem, seen: &Seen) -> Result<NewsItem, (String, Rejection)> {
        let item = NewsItem {
            title: collapse_whitespace(&item.title),
            url: item.url.trim().to_string(),
            ..item
        };
        let key = item.title_key();

        if let Some(keyword) = self.exclude_keywords.iter().find(|k| key.contains(k.as_str())) {
            return Err((item.title, Rejection::Excluded(keyword.clone())));
        }
        if seen.titles.contains(&key) {
            return Err((item.title, Rejection::DuplicateTitle));
        }
        if seen.urls.contains(&item.url) {
            return Err((item.title, Rejection::DuplicateUrl));
        }
        if !item.meets_quality_floor() {
            return Err((item.title, Rejection::BelowQualityFloor));
        }
        if is_unresolved_google_link(&item.url) {
            return Err((item.title, Rejection::UnresolvedGoogleLink));
        }
        if let Some(threshold) = self.similarity_threshold {
            if seen
                .accepted
                .iter()
                .any(|other| title_similarity(&key, other) > threshold)
            {
                return Err((item.title, Rejection::NearDuplicate));
            }
        }
        Ok(item)
    }

    fn scored(&self, item: NewsItem) -> NewsItem {
        let importance = score_importance(&item.title, &self.importance);
        NewsItem {
            importance: Some(importance),
            ..item
        }
    }
}

fn normalize_keywords(keywords: &[String]) -> Vec<String> {
    keywords
        .iter()
        .map(|k| k.trim().to_lowercase())
        .filter(|k| !k.is_empty())
        .collect()
}

/// Stable sort by display date, newest first. If any date does not parse,
/// the fetch order is kept as is.
fn sort_newest_first(items: &mut [NewsItem]) {
    if items.iter().any(|i| parse_display_date(&i.date).is_none()) {
        debug!("Unparsable display date; keeping fetch order");
        return;
    }
    items.sort_by_cached_key(|i| Reverse(parse_display_date(&i.date)));
}
