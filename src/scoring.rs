//! Keyword-weighted importance score for headlines.

use serde::{Deserialize, Serialize};

pub const MAX_IMPORTANCE: u8 = 5;

/// Keyword tiers worth 3, 2 and 1 points per match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportanceKeywords {
    pub high: Vec<String>,
    pub medium: Vec<String>,
    pub low: Vec<String>,
}

impl Default for ImportanceKeywords {
    fn default() -> Self {
        let words = |list: &[&str]| -> Vec<String> { list.iter().map(|s| s.to_string()).collect() };
        Self {
            high: words(&["법원", "판결", "대법원", "헌법재판소", "개정", "시행", "의무화"]),
            medium: words(&["정책", "제도", "규정", "기준", "절차", "신설", "변경"]),
            low: words(&["논의", "검토", "계획", "예정", "발표", "공개"]),
        }
    }
}

/// Score a title: every contained keyword adds its tier's weight, capped at
/// [`MAX_IMPORTANCE`].
pub fn score_importance(title: &str, keywords: &ImportanceKeywords) -> u8 {
    let tiers: [(&[String], u32); 3] = [
        (&keywords.high, 3),
        (&keywords.medium, 2),
        (&keywords.low, 1),
    ];
    let score: u32 = tiers
        .iter()
        .map(|(words, weight)| {
            words
                .iter()
                .filter(|w| !w.is_empty() && title.contains(w.as_str()))
                .count() as u32
                * weight
        })
        .sum();
    score.min(MAX_IMPORTANCE as u32) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_keywords_scores_zero() {
        assert_eq!(score_importance("날씨 맑음", &ImportanceKeywords::default()), 0);
    }

    #[test]
    fn test_tier_weights() {
        let kw = ImportanceKeywords::default();
        assert_eq!(score_importance("헌법재판소 소식", &kw), 3);
        assert_eq!(score_importance("새 정책 소식", &kw), 2);
        assert_eq!(score_importance("내년 계획 소식", &kw), 1);
        assert_eq!(score_importance("정책 검토 소식", &kw), 3);
    }

    #[test]
    fn test_score_is_capped() {
        let kw = ImportanceKeywords::default();
        // 대법원 also contains 법원: 3 + 3 + 3 (판결) = 9, capped
        assert_eq!(score_importance("대법원 판결", &kw), MAX_IMPORTANCE);
    }

    #[test]
    fn test_custom_keywords() {
        let kw = ImportanceKeywords {
            high: vec!["tax".into()],
            medium: vec![],
            low: vec!["".into()],
        };
        assert_eq!(score_importance("new tax rules", &kw), 3);
        assert_eq!(score_importance("nothing here", &kw), 0);
    }
}
