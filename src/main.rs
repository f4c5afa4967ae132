use clap::Parser;
use newsletter_news::cli::Cli;
use newsletter_news::outputs::json;
use newsletter_news::utils::ensure_writable_dir;
use newsletter_news::{CollectRequest, NewsCache, NewsCollector, NewsConfig, NewsItem, Origin, RssFetcher};
use std::error::Error;
use std::sync::Arc;
use tracing::{debug, error, info, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("newsletter_news starting up");

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    // ---- Configuration ----
    let mut config = match &args.config {
        Some(path) => NewsConfig::load(path)?,
        None => NewsConfig::default(),
    };
    args.apply(&mut config);

    // ---- Today's snapshot, if asked for ----
    if args.reuse_snapshot {
        if let Some(dir) = &config.snapshot_dir {
            let items = json::load_snapshot(dir).await;
            if !items.is_empty() {
                info!(count = items.len(), "Using today's news snapshot");
                print_items(&items);
                return Ok(());
            }
            info!("No snapshot for today; collecting");
        }
    }

    // ---- Collect ----
    let fetcher = RssFetcher::new(&config.user_agent)?;
    let cache = Arc::new(NewsCache::new(config.cache_ttl()));
    let collector = NewsCollector::from_config(fetcher, cache, &config);
    let request = CollectRequest {
        sources: config.feed_urls(),
        limit: config.limit,
        allow_fallback: config.allow_fallback,
        force_refresh: args.force_refresh,
    };
    info!(sources = request.sources.len(), limit = request.limit, "Collecting news");

    let collection = collector.collect(&request).await;

    if !collection.errors.is_empty() {
        warn!(
            successful_sources = collection.successful_sources,
            failed_sources = collection.errors.len(),
            "Some news sources had problems"
        );
        for message in collection.errors.iter().take(3) {
            warn!("- {message}");
        }
    }
    if collection.origin == Origin::Fallback {
        warn!("Every news source failed; showing sample news");
    }

    print_items(&collection.items);

    // ---- Snapshot ----
    if let Some(dir) = &config.snapshot_dir {
        if let Err(e) = ensure_writable_dir(dir).await {
            error!(path = %dir, error = %e, "Snapshot directory is not writable");
            return Err(e);
        }
        if collection.items.is_empty() {
            warn!("No news collected; keeping the previous snapshot");
        } else if let Err(e) = json::write_snapshot(&collection.items, dir).await {
            error!(error = %e, "Failed to write news snapshot");
        }
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        count = collection.items.len(),
        origin = ?collection.origin,
        "Execution complete"
    );
    Ok(())
}

fn print_items(items: &[NewsItem]) {
    if items.is_empty() {
        println!("No news items collected.");
        return;
    }
    for (i, item) in items.iter().enumerate() {
        let importance = item.importance.map(|s| format!(" ★{s}")).unwrap_or_default();
        println!("{:>2}. [{}] {} ({}){}", i + 1, item.source, item.title, item.date, importance);
        println!("    {}", item.url);
    }
}
