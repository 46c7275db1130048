//! Article body normalization.
//!
//! Fetched bodies carry listing-page leftovers: attribution fragments
//! (来源/作者/责任编辑), inline timestamps, and share-widget chrome. The
//! normalizer runs a fixed, ordered battery of substitutions and finishes by
//! collapsing whitespace. Order matters: timestamp removal must run before
//! the whitespace collapse, otherwise partially-stripped fragments leave
//! irregular spacing that a later pass cannot repair.

use regex::Regex;

/// Attribution fragments injected by publishers.
const ATTRIBUTION_PATTERNS: &[&str] = &[
    r"来源[：:]\s*\S+",
    r"作者[：:]\s*\S+",
    r"责任编辑[：:]\s*\S+",
    r"（[^）]*记者[^）]*）",
    r"\([^)]*记者[^)]*\)",
];

/// Embedded timestamp shapes: full datetimes (both 年月日 and hyphenated
/// forms) first, bare clock times last so the broader patterns win.
const TIMESTAMP_PATTERNS: &[&str] = &[
    r"\d{4}年\d{1,2}月\d{1,2}日\s*\d{1,2}:\d{2}(?::\d{2})?",
    r"\d{4}[-_]\d{1,2}[-_]\d{1,2}\s*\d{1,2}:\d{2}(?::\d{2})?",
    r"\d{1,2}:\d{2}(?::\d{2})?",
];

/// Share-widget and font-size UI leftovers.
const WIDGET_PATTERNS: &[&str] = &[r"分享到\S*", r"大字体小字体\S*", r"字号[：:]?\s*[大中小]+"];

/// Normalizes a raw article body into clean text.
///
/// Runs attribution, timestamp, and widget stripping in that order, then
/// collapses whitespace runs to single spaces and trims. An empty body
/// normalizes to an empty string; downstream stages treat that as "no
/// content available" rather than an error.
pub fn normalize_content(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }
    let text = strip_attribution(raw);
    let text = strip_timestamps(&text);
    let text = strip_widget_noise(&text);
    collapse_whitespace(&text)
}

/// Removes publisher attribution fragments.
fn strip_attribution(text: &str) -> String {
    apply_patterns(text, ATTRIBUTION_PATTERNS)
}

/// Removes embedded datetime strings.
fn strip_timestamps(text: &str) -> String {
    apply_patterns(text, TIMESTAMP_PATTERNS)
}

/// Removes share-widget and font-size chrome.
fn strip_widget_noise(text: &str) -> String {
    apply_patterns(text, WIDGET_PATTERNS)
}

/// Collapses whitespace runs to single spaces and trims.
fn collapse_whitespace(text: &str) -> String {
    let re = Regex::new(r"\s+").unwrap();
    re.replace_all(text, " ").trim().to_string()
}

fn apply_patterns(text: &str, patterns: &[&str]) -> String {
    let mut result = text.to_string();
    for pattern in patterns {
        let re = Regex::new(pattern).unwrap();
        result = re.replace_all(&result, "").to_string();
    }
    result
}
