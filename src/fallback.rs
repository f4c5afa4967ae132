//! Placeholder headlines used when live collection comes up short.

use crate::feeds::dates::DISPLAY_FORMAT;
use crate::models::{NewsItem, NewsSource};
use chrono::{Duration, NaiveDate};

const SAMPLES: [(&str, &str); 5] = [
    ("개인정보보호법 개정안 국회 통과", "https://news.example.com/law1"),
    ("새로운 상속세 면제 한도 확대", "https://news.example.com/law2"),
    ("부동산 계약 관련 법률 개정 사항", "https://news.example.com/law3"),
    ("근로기준법 개정으로 인한 기업 대응 방안", "https://news.example.com/law4"),
    ("디지털세법 시행령 발표", "https://news.example.com/law5"),
];

/// The fixed sample list, dated `today`, `today - 1`, … so it sorts newest first.
pub fn sample_news(today: NaiveDate) -> Vec<NewsItem> {
    SAMPLES
        .iter()
        .enumerate()
        .map(|(i, (title, url))| NewsItem {
            title: title.to_string(),
            url: url.to_string(),
            date: (today - Duration::days(i as i64))
                .format(DISPLAY_FORMAT)
                .to_string(),
            raw_date: None,
            source: NewsSource::Fallback,
            importance: None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_samples_are_dated_backwards() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 2).unwrap();
        let samples = sample_news(today);
        let dates: Vec<&str> = samples.iter().map(|s| s.date.as_str()).collect();
        assert_eq!(
            dates,
            ["2024.03.02", "2024.03.01", "2024.02.29", "2024.02.28", "2024.02.27"]
        );
    }

    #[test]
    fn test_samples_satisfy_item_invariants() {
        let samples = sample_news(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert!(samples.iter().all(NewsItem::meets_quality_floor));
        assert!(samples.iter().all(|s| s.source == NewsSource::Fallback));
        let titles: HashSet<String> = samples.iter().map(NewsItem::title_key).collect();
        let urls: HashSet<&str> = samples.iter().map(|s| s.url.as_str()).collect();
        assert_eq!(titles.len(), samples.len());
        assert_eq!(urls.len(), samples.len());
    }
}
