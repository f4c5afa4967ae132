//! Google News redirect unwrapping.
//!
//! Google News RSS items sometimes link to `news.google.com/...?...&url=<real
//! article>` instead of the article itself. [`unwrap_google_link`] pulls the
//! real URL out of the `url` query parameter when it is there.

use url::Url;

pub const GOOGLE_NEWS_HOST: &str = "news.google.com";

/// Base URL of the Google News RSS search endpoint.
pub const GOOGLE_NEWS_SEARCH: &str = "https://news.google.com/rss/search";

/// Return the article URL wrapped in a Google News redirect link.
///
/// Links on any other host, links without a `url` parameter and links whose
/// `url` parameter is not an absolute URL come back unchanged.
pub fn unwrap_google_link(link: &str) -> String {
    let Ok(parsed) = Url::parse(link) else {
        return link.to_string();
    };
    if !is_google_news_host(&parsed) {
        return link.to_string();
    }

    parsed
        .query_pairs()
        .find(|(key, _)| key == "url")
        .map(|(_, value)| value.into_owned())
        .filter(|target| Url::parse(target).is_ok_and(|u| u.has_host()))
        .unwrap_or_else(|| link.to_string())
}

/// Whether `link` is a Google News link that never resolved to an article.
///
/// Canonical Google News item links live under `/articles/`; anything else
/// on that host is a redirect or search page the reader cannot open.
pub fn is_unresolved_google_link(link: &str) -> bool {
    match Url::parse(link) {
        Ok(parsed) => is_google_news_host(&parsed) && !parsed.path().contains("/articles/"),
        Err(_) => link.contains(GOOGLE_NEWS_HOST) && !link.contains("/articles/"),
    }
}

/// Build a Korean-locale Google News RSS search URL for `query`.
pub fn google_news_search_url(query: &str) -> String {
    format!(
        "{}?q={}&hl=ko&gl=KR&ceid=KR:ko",
        GOOGLE_NEWS_SEARCH,
        urlencoding::encode(query)
    )
}

fn is_google_news_host(url: &Url) -> bool {
    url.host_str()
        .is_some_and(|host| host.eq_ignore_ascii_case(GOOGLE_NEWS_HOST))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unwrap_redirect_link() {
        let link = "https://news.google.com/rss/articles/XYZ?url=https%3A%2F%2Fexample.com%2Fa";
        assert_eq!(unwrap_google_link(link), "https://example.com/a");
    }

    #[test]
    fn test_non_google_link_unchanged() {
        let link = "https://n.news.naver.com/article/001/0014000000?url=https%3A%2F%2Fexample.com";
        assert_eq!(unwrap_google_link(link), link);
    }

    #[test]
    fn test_google_link_without_url_param_unchanged() {
        let link = "https://news.google.com/rss/articles/CBMiXWh0dHBz?oc=5";
        assert_eq!(unwrap_google_link(link), link);
    }

    #[test]
    fn test_relative_url_param_unchanged() {
        let link = "https://news.google.com/rss/articles/XYZ?url=%2Flocal%2Fpath";
        assert_eq!(unwrap_google_link(link), link);
    }

    #[test]
    fn test_unparsable_link_unchanged() {
        assert_eq!(unwrap_google_link("not a link"), "not a link");
        assert_eq!(unwrap_google_link(""), "");
    }

    #[test]
    fn test_unresolved_google_link_detection() {
        assert!(is_unresolved_google_link("https://news.google.com/rss/search?q=x"));
        assert!(!is_unresolved_google_link("https://news.google.com/rss/articles/CBMi?oc=5"));
        assert!(!is_unresolved_google_link("https://example.com/search"));
    }

    #[test]
    fn test_google_news_search_url_encodes_query() {
        let url = google_news_search_url("법률 개정");
        assert!(url.starts_with("https://news.google.com/rss/search?q="));
        assert!(url.contains("%EB%B2%95%EB%A5%A0%20%EA%B0%9C%EC%A0%95"));
        assert!(url.ends_with("&hl=ko&gl=KR&ceid=KR:ko"));
    }
}
