//! Key-point extraction.
//!
//! Runs a fixed battery of pattern groups against clean article text in
//! priority order: named actors, organizations (suffix-based), events and
//! achievements (suffix-based), then numeric facts. Each group contributes
//! up to a small per-group cap of distinct matches; collection stops at the
//! global cap. Near-duplicate points are dropped via the same prefix-key
//! technique the candidate dedup uses.
//!
//! This is rule-priority extraction, not NLP: given the same text and the
//! same tables, the output is the same list in the same order.

use regex::Regex;

use crate::article::{Facet, KeyPoint};
use crate::dedup::prefix_key;

/// Hard cap on key points per article.
pub const GLOBAL_POINT_CAP: usize = 4;

/// Tunables for point extraction.
#[derive(Debug, Clone)]
pub struct KeyPointConfig {
    /// Global cap across all facets.
    pub max_points: usize,
    /// Prefix length (chars) for near-duplicate point detection.
    pub dedup_prefix_chars: usize,
}

impl Default for KeyPointConfig {
    fn default() -> Self {
        Self { max_points: GLOBAL_POINT_CAP, dedup_prefix_chars: 12 }
    }
}

struct PatternGroup {
    facet: Facet,
    patterns: &'static [&'static str],
    /// Max points this group may contribute.
    cap: usize,
    /// Accepted match length in chars, when the suffix patterns overshoot.
    len_range: Option<(usize, usize)>,
}

/// State leadership names, the actors that dominate this news domain.
const PERSON_PATTERNS: &[&str] = &[r"习近平|李强|丁薛祥|李希|王毅|赵乐际"];

/// Government bodies and enterprises by institutional suffix.
const ORGANIZATION_PATTERNS: &[&str] = &[
    // Lazy repetition: take the shortest stem before the suffix so adjacent
    // names do not fuse into one overlong match.
    r"[^\s，。！？、]{1,7}?(?:部|委|局|办|政府|监委|航天局|办公室)",
    r"[^\s，。！？、]{1,8}?(?:公司|企业|研究所|工程办)",
];

/// Events and achievements by action suffix.
const EVENT_PATTERNS: &[&str] = &[
    r"[^\s，。！？、]{2,10}?(?:试验|发射|成功|突破|发布|实施)",
    r"[^\s，。！？、]{2,8}?(?:工程|计划|项目|火箭|飞船)",
];

/// Numeric facts: years, dates, percentages, 万/亿 magnitudes.
const FIGURE_PATTERNS: &[&str] = &[r"\d{4}年", r"\d+月\d+日", r"\d+(?:\.\d+)?%", r"\d+(?:\.\d+)?[万亿]"];

const GROUPS: &[PatternGroup] = &[
    PatternGroup { facet: Facet::Person, patterns: PERSON_PATTERNS, cap: 2, len_range: None },
    PatternGroup { facet: Facet::Organization, patterns: ORGANIZATION_PATTERNS, cap: 3, len_range: Some((2, 6)) },
    PatternGroup { facet: Facet::Event, patterns: EVENT_PATTERNS, cap: 3, len_range: Some((3, 10)) },
    PatternGroup { facet: Facet::Figure, patterns: FIGURE_PATTERNS, cap: 2, len_range: None },
];

/// Substrings that mark an organization match as attribution noise.
const ORGANIZATION_NOISE: &[&str] = &["据", "记者"];

/// Extracts up to [`KeyPointConfig::max_points`] labeled facts from clean text.
///
/// Pure function of the text and the static tables; empty text yields an
/// empty list.
pub fn extract_key_points(text: &str, config: &KeyPointConfig) -> Vec<KeyPoint> {
    let mut points: Vec<KeyPoint> = Vec::new();
    let mut seen_prefixes: Vec<String> = Vec::new();

    for group in GROUPS {
        let mut group_count = 0;
        for pattern in group.patterns {
            let re = Regex::new(pattern).unwrap();
            for m in re.find_iter(text) {
                if points.len() >= config.max_points || group_count >= group.cap {
                    break;
                }
                let matched = m.as_str();
                if !accept_match(group, matched) {
                    continue;
                }
                let point = KeyPoint::new(group.facet, matched);
                let key = prefix_key(&point.to_string(), config.dedup_prefix_chars);
                if seen_prefixes.contains(&key) {
                    continue;
                }
                seen_prefixes.push(key);
                points.push(point);
                group_count += 1;
            }
        }
        if points.len() >= config.max_points {
            break;
        }
    }

    points
}

fn accept_match(group: &PatternGroup, matched: &str) -> bool {
    if let Some((min, max)) = group.len_range {
        let chars = matched.chars().count();
        if chars < min || chars > max {
            return false;
        }
    }
    if group.facet == Facet::Organization && ORGANIZATION_NOISE.iter().any(|n| matched.contains(n)) {
        return false;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text() {
        assert!(extract_key_points("", &KeyPointConfig::default()).is_empty());
    }

    #[test]
    fn test_person_extraction_first() {
        let text = "习近平出席会议并发表讲话，国务院部署下一阶段工作。";
        let points = extract_key_points(text, &KeyPointConfig::default());
        assert_eq!(points[0].facet, Facet::Person);
        assert_eq!(points[0].text, "习近平");
    }

    #[test]
    fn test_organization_suffix_extraction() {
        let text = "工信部和科技部联合发文。";
        let points = extract_key_points(text, &KeyPointConfig::default());
        let orgs: Vec<_> = points.iter().filter(|p| p.facet == Facet::Organization).collect();
        assert!(orgs.iter().any(|p| p.text.contains("工信部")));
    }

    #[test]
    fn test_organization_noise_rejected() {
        let text = "据教育部介绍情况。";
        let points = extract_key_points(text, &KeyPointConfig::default());
        // 据教育部 carries the attribution particle and must not surface.
        assert!(points.iter().all(|p| !p.text.starts_with('据')));
    }

    #[test]
    fn test_event_extraction() {
        let text = "长征火箭完成第五百次发射，探月工程进入新阶段。";
        let points = extract_key_points(text, &KeyPointConfig::default());
        assert!(points.iter().any(|p| p.facet == Facet::Event));
    }

    #[test]
    fn test_figure_extraction_caps_at_two() {
        let text = "2025年产量增长12.5%，达到380万件，出口额超50亿，2026年预计再增8.3%。";
        let points = extract_key_points(text, &KeyPointConfig::default());
        let figures: Vec<_> = points.iter().filter(|p| p.facet == Facet::Figure).collect();
        assert!(figures.len() <= 2);
        assert!(!figures.is_empty());
    }

    #[test]
    fn test_global_cap_four() {
        let text = "习近平和李强出席。工信部、科技部、教育部和财政部参加。\
                    探月工程与载人航天项目推进。2025年增长12.5%，达到380万。";
        let points = extract_key_points(text, &KeyPointConfig::default());
        assert_eq!(points.len(), GLOBAL_POINT_CAP);
    }

    #[test]
    fn test_prefix_dedup_of_near_duplicates() {
        // The same ministry mentioned twice must yield one point.
        let text = "工信部发布规划，工信部同时表示将继续推进。";
        let points = extract_key_points(text, &KeyPointConfig::default());
        let count = points.iter().filter(|p| p.text == "工信部").count();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_deterministic_output() {
        let config = KeyPointConfig::default();
        let text = "李强主持会议，国务院部署探月工程，2026年投入超100亿。";
        let a = extract_key_points(text, &config);
        let b = extract_key_points(text, &config);
        assert_eq!(a, b);
    }
}
