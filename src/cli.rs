//! Command-line interface definitions.
//!
//! Every option overrides the matching field of the YAML config file (or the
//! built-in defaults when no file is given).

use crate::config::NewsConfig;
use clap::Parser;

/// Collect the latest news items for the newsletter.
///
/// # Examples
///
/// ```sh
/// # Default Naver/Daum/Google News sources, five items
/// newsletter_news
///
/// # Custom feeds, ten items, bypass the cache, keep a JSON snapshot
/// newsletter_news -s https://news.daum.net/rss/society -l 10 --force-refresh -o ./newsletter_data
///
/// # Google News search terms and a config file
/// newsletter_news -c newsletter.yaml -g "개인정보보호법" -g "상속세"
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Optional path to a YAML config file
    #[arg(short, long, env = "NEWSLETTER_CONFIG")]
    pub config: Option<String>,

    /// Feed URL to collect from (repeatable; replaces configured sources)
    #[arg(short, long = "source")]
    pub sources: Vec<String>,

    /// Google News search term (repeatable; replaces configured queries)
    #[arg(short, long = "google-query")]
    pub google_queries: Vec<String>,

    /// Maximum number of news items
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Return fewer items instead of padding with sample news
    #[arg(long)]
    pub no_fallback: bool,

    /// Ignore recently collected news and fetch again
    #[arg(long)]
    pub force_refresh: bool,

    /// Per-feed request timeout in seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Directory for the daily JSON snapshot
    #[arg(short = 'o', long, env = "NEWSLETTER_SNAPSHOT_DIR")]
    pub snapshot_dir: Option<String>,

    /// Print today's snapshot instead of collecting, when one exists
    #[arg(long, requires = "snapshot_dir")]
    pub reuse_snapshot: bool,
}

impl Cli {
    /// Apply command-line overrides on top of `config`.
    pub fn apply(&self, config: &mut NewsConfig) {
        if !self.sources.is_empty() {
            config.sources = self.sources.clone();
        }
        if !self.google_queries.is_empty() {
            config.google_queries = self.google_queries.clone();
        }
        if let Some(limit) = self.limit {
            config.limit = limit;
        }
        if self.no_fallback {
            config.allow_fallback = false;
        }
        if let Some(secs) = self.timeout_secs {
            config.fetch_timeout_secs = secs;
        }
        if self.snapshot_dir.is_some() {
            config.snapshot_dir = self.snapshot_dir.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["newsletter_news"]);
        assert!(cli.sources.is_empty());
        assert_eq!(cli.limit, None);
        assert!(!cli.force_refresh);
        assert!(!cli.no_fallback);
    }

    #[test]
    fn test_cli_repeatable_sources() {
        let cli = Cli::parse_from([
            "newsletter_news",
            "-s",
            "https://a.example.com/rss",
            "--source",
            "https://b.example.com/rss",
            "-l",
            "7",
            "--force-refresh",
        ]);
        assert_eq!(
            cli.sources,
            vec!["https://a.example.com/rss", "https://b.example.com/rss"]
        );
        assert_eq!(cli.limit, Some(7));
        assert!(cli.force_refresh);
    }

    #[test]
    fn test_reuse_snapshot_requires_dir() {
        let result = Cli::try_parse_from(["newsletter_news", "--reuse-snapshot"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_apply_overrides_config() {
        let cli = Cli::parse_from([
            "newsletter_news",
            "-g",
            "상속세",
            "-l",
            "3",
            "--no-fallback",
            "--timeout-secs",
            "2",
        ]);
        let mut config = NewsConfig::default();
        let default_sources = config.sources.clone();
        cli.apply(&mut config);
        assert_eq!(config.sources, default_sources);
        assert_eq!(config.google_queries, vec!["상속세"]);
        assert_eq!(config.limit, 3);
        assert!(!config.allow_fallback);
        assert_eq!(config.fetch_timeout_secs, 2);
    }
}
