//! Candidate deduplication.
//!
//! The same underlying story is routinely re-published at different URLs
//! (syndication) while keeping a byte-identical or near-identical headline,
//! and the same URL reappears across discovery passes with volatile query
//! strings. Deduplication therefore uses a dual key: the normalized URL and
//! a fixed-length prefix of the title. First-seen wins and input order is
//! preserved.
//!
//! Prefix matching is an approximation of near-duplicate detection; the
//! prefix lengths are named, tunable strategy parameters rather than magic
//! constants. True similarity hashing is out of scope.

use std::collections::HashSet;

use url::Url;

use crate::article::RawCandidate;

/// Tunables for the dual-key dedup strategy.
#[derive(Debug, Clone)]
pub struct DedupConfig {
    /// Title prefix length (in chars) treated as "the same headline".
    pub title_prefix_chars: usize,
    /// Key-point prefix length (in chars) used for fact-level dedup.
    pub point_prefix_chars: usize,
}

impl Default for DedupConfig {
    fn default() -> Self {
        Self { title_prefix_chars: 40, point_prefix_chars: 12 }
    }
}

/// Normalizes a URL into its dedup key.
///
/// Canonicalizes the scheme (http and https are the same story), lowercases
/// the host, drops query string and fragment, and collapses duplicate path
/// slashes. Returns `None` for unparseable input.
pub fn normalize_url(raw: &str) -> Option<String> {
    let parsed = Url::parse(raw).ok()?;
    match parsed.scheme() {
        "http" | "https" => {}
        _ => return None,
    }
    let host = parsed.host_str()?.to_lowercase();
    let path = collapse_slashes(parsed.path());
    match parsed.port() {
        Some(port) => Some(format!("https://{}:{}{}", host, port, path)),
        None => Some(format!("https://{}{}", host, path)),
    }
}

/// Extracts the collapsed URL path, the identifier used by hot-ranking
/// signals (scheme/host variants of a syndicated link still match).
pub fn url_path(raw: &str) -> Option<String> {
    let parsed = Url::parse(raw).ok()?;
    Some(collapse_slashes(parsed.path()))
}

fn collapse_slashes(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    let mut prev_slash = false;
    for c in path.chars() {
        if c == '/' {
            if prev_slash {
                continue;
            }
            prev_slash = true;
        } else {
            prev_slash = false;
        }
        out.push(c);
    }
    out
}

/// Takes the first `chars` characters of a string as a comparison key.
///
/// Char-based, not byte-based: the domain text is CJK and byte slicing
/// would split code points.
pub fn prefix_key(s: &str, chars: usize) -> String {
    s.chars().take(chars).collect()
}

/// Removes duplicate candidates, first-seen-wins.
///
/// A candidate is dropped when its normalized URL or its title prefix has
/// been seen before. Candidates with a missing URL or title are noise from
/// uncontrolled upstream listings and are dropped silently. This operation
/// cannot fail and is idempotent.
pub fn dedup_candidates(candidates: Vec<RawCandidate>, config: &DedupConfig) -> Vec<RawCandidate> {
    let mut seen_urls: HashSet<String> = HashSet::new();
    let mut seen_titles: HashSet<String> = HashSet::new();
    let mut out = Vec::with_capacity(candidates.len());

    for candidate in candidates {
        if candidate.url.is_empty() || candidate.title.is_empty() {
            continue;
        }
        let Some(url_key) = normalize_url(&candidate.url) else {
            continue;
        };
        let title_key = prefix_key(&candidate.title, config.title_prefix_chars);
        if seen_urls.contains(&url_key) || seen_titles.contains(&title_key) {
            continue;
        }
        seen_urls.insert(url_key);
        seen_titles.insert(title_key);
        out.push(candidate);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(url: &str, title: &str) -> RawCandidate {
        RawCandidate {
            url: url.to_string(),
            title: title.to_string(),
            content: None,
            publish_date: None,
            source: None,
            channel: None,
        }
    }

    #[test]
    fn test_normalize_url_scheme_and_query() {
        assert_eq!(
            normalize_url("http://Example.com/a/b.html?from=feed#top"),
            Some("https://example.com/a/b.html".to_string())
        );
    }

    #[test]
    fn test_normalize_url_double_slash_variant() {
        let a = normalize_url("https://a.example/2026/02-12/x.html");
        let b = normalize_url("https://a.example//2026/02-12/x.html");
        assert_eq!(a, b);
        assert!(a.is_some());
    }

    #[test]
    fn test_normalize_url_rejects_garbage() {
        assert_eq!(normalize_url("not a url"), None);
        assert_eq!(normalize_url("ftp://example.com/file"), None);
    }

    #[test]
    fn test_url_path() {
        assert_eq!(
            url_path("https://www.chinanews.com.cn//gn/2026/02-12/1.shtml"),
            Some("/gn/2026/02-12/1.shtml".to_string())
        );
    }

    #[test]
    fn test_prefix_key_is_char_based() {
        assert_eq!(prefix_key("国台办：坚持一个中国原则", 3), "国台办");
    }

    #[test]
    fn test_dedup_first_seen_wins() {
        let input = vec![
            candidate("https://a.example/1.html", "第一条新闻标题甲"),
            candidate("http://a.example/1.html?ref=x", "完全不同的标题乙"),
            candidate("https://b.example/2.html", "第三条新闻标题丙"),
        ];
        let out = dedup_candidates(input, &DedupConfig::default());
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].title, "第一条新闻标题甲");
        assert_eq!(out[1].url, "https://b.example/2.html");
    }

    #[test]
    fn test_dedup_by_title_prefix() {
        let config = DedupConfig { title_prefix_chars: 5, ..Default::default() };
        let input = vec![
            candidate("https://a.example/1.html", "同一个故事的标题（甲站）"),
            candidate("https://b.example/2.html", "同一个故事的标题（乙站）"),
        ];
        let out = dedup_candidates(input, &config);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].url, "https://a.example/1.html");
    }

    #[test]
    fn test_dedup_drops_malformed_silently() {
        let input = vec![
            candidate("", "有标题但没有链接"),
            candidate("https://a.example/1.html", ""),
            candidate("https://a.example/2.html", "有效候选"),
        ];
        let out = dedup_candidates(input, &DedupConfig::default());
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].title, "有效候选");
    }

    #[test]
    fn test_dedup_idempotent() {
        let config = DedupConfig::default();
        let input = vec![
            candidate("https://a.example/1.html", "标题一甲乙丙丁"),
            candidate("https://a.example//1.html", "标题一甲乙丙丁"),
            candidate("https://b.example/2.html", "标题二戊己庚辛"),
        ];
        let once = dedup_candidates(input, &config);
        let twice = dedup_candidates(once.clone(), &config);
        assert_eq!(once.len(), twice.len());
        for (a, b) in once.iter().zip(twice.iter()) {
            assert_eq!(a.url, b.url);
        }
    }

    #[test]
    fn test_dedup_empty_input() {
        let out = dedup_candidates(Vec::new(), &DedupConfig::default());
        assert!(out.is_empty());
    }
}
