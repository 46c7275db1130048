//! Chapter matching: scores article text against the taxonomy rule table.

use serde::{Deserialize, Serialize};

use crate::article::Category;
use crate::taxonomy::Taxonomy;

/// Score assigned when no rule fires and the category fallback is used.
pub const FALLBACK_SCORE: u32 = 60;

/// Tunables for the matcher.
#[derive(Debug, Clone)]
pub struct MatchConfig {
    /// Matches below this score are dropped.
    pub min_score: u32,
    /// How many chars of body text to scan after the title.
    pub content_scan_chars: usize,
}

impl Default for MatchConfig {
    fn default() -> Self {
        MatchConfig { min_score: 70, content_scan_chars: 800 }
    }
}

/// One article-to-chapter alignment with its score and trigger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterMatch {
    pub chapter_title: String,
    pub book_name: String,
    pub score: u32,
    /// The keyword that fired, empty for category fallbacks.
    #[serde(default)]
    pub matched_keyword: String,
}

/// Matches title plus a bounded prefix of the body against the rule table.
///
/// Each rule contributes at most one match (its first keyword hit). Matches
/// are deduplicated by chapter keeping the highest score, sorted by score
/// descending with rule order as the stable tie-break, then filtered by
/// `min_score`.
pub fn match_text(
    title: &str,
    content: &str,
    taxonomy: &Taxonomy,
    config: &MatchConfig,
) -> Vec<ChapterMatch> {
    let scan: String = content.chars().take(config.content_scan_chars).collect();
    let haystack = format!("{title} {scan}");

    let mut matches: Vec<ChapterMatch> = Vec::new();
    for rule in &taxonomy.rules {
        let Some(keyword) = rule.keywords.iter().find(|k| haystack.contains(k.as_str())) else {
            continue;
        };
        matches.push(ChapterMatch {
            chapter_title: rule.chapter_title.clone(),
            book_name: rule.book_name.clone(),
            score: rule.base_score,
            matched_keyword: keyword.clone(),
        });
    }

    // Keep the best match per chapter; first occurrence wins ties because
    // rule order encodes priority.
    let mut best: Vec<ChapterMatch> = Vec::new();
    for m in matches {
        match best.iter_mut().find(|b| b.chapter_title == m.chapter_title) {
            Some(existing) if m.score > existing.score => *existing = m,
            Some(_) => {}
            None => best.push(m),
        }
    }

    best.sort_by(|a, b| b.score.cmp(&a.score));
    best.retain(|m| m.score >= config.min_score);
    best
}

/// Builds a low-confidence fallback match from an article's category.
///
/// Used when no rule fires so every article still lands in a chapter. The
/// fallback score sits below every rule score, keeping rule-driven matches
/// ahead of guesses.
pub fn fallback_for_category(category: Category, taxonomy: &Taxonomy) -> ChapterMatch {
    let chapter_title = match category {
        Category::Technology => "创新驱动发展",
        Category::CrossStrait => "中华一家亲",
        _ => "民主与法治",
    };
    let book_name = taxonomy
        .chapters
        .iter()
        .find(|c| c.chapter_title == chapter_title)
        .map(|c| c.book_name.clone())
        .unwrap_or_else(|| "九年级上册".to_string());

    ChapterMatch {
        chapter_title: chapter_title.to_string(),
        book_name,
        score: FALLBACK_SCORE,
        matched_keyword: String::new(),
    }
}
