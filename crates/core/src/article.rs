//! Article records and their derived fields.
//!
//! This module defines the core data structures flowing through the pipeline:
//! - [`RawCandidate`]: a raw discovery record handed over by a fetcher
//! - [`Article`]: the enriched record owned by the pipeline
//! - [`KeyPoint`] / [`Facet`]: labeled facts extracted from article text
//! - [`Category`]: the coarse single-label classification
//! - [`FetchStatus`]: per-article fetch outcome
//!
//! Fetchers own only the raw discovery fields; every derived field
//! (`clean_content`, `summary`, `key_points`, `category`) is owned by the
//! pipeline and recomputed on each run.

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Default publisher label when a source cannot be determined.
pub const DEFAULT_SOURCE: &str = "中国新闻网";

/// Default channel label for listing entries without one.
pub const DEFAULT_CHANNEL: &str = "要闻";

/// A raw candidate record as discovered by a fetcher.
///
/// `url` and `title` are the only fields a fetcher must provide; everything
/// else is optional and will be derived or defaulted by the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawCandidate {
    /// Absolute article URL. The dedup identity key.
    pub url: String,
    /// Headline as shown on the listing page.
    pub title: String,
    /// Article body, if the fetcher already retrieved it.
    #[serde(default)]
    pub content: Option<String>,
    /// Publication date (`YYYY-MM-DD`), if known.
    #[serde(default)]
    pub publish_date: Option<String>,
    /// Publisher label.
    #[serde(default)]
    pub source: Option<String>,
    /// Listing channel (e.g. 要闻, 社会).
    #[serde(default)]
    pub channel: Option<String>,
}

/// Per-article fetch outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FetchStatus {
    /// Discovered but not yet fetched.
    Pending,
    /// Body retrieval completed (possibly with an empty body).
    Fetched,
    /// Retrieval failed; excluded from matching and assembly.
    Failed,
}

/// Facet label for an extracted key point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Facet {
    /// A named actor (人物).
    Person,
    /// A named organization (机构).
    Organization,
    /// A named event or achievement (事件).
    Event,
    /// A numeric fact (数据).
    Figure,
}

impl Facet {
    /// The Chinese label used when rendering a point, e.g. `机构`.
    pub fn label(&self) -> &'static str {
        match self {
            Facet::Person => "人物",
            Facet::Organization => "机构",
            Facet::Event => "事件",
            Facet::Figure => "数据",
        }
    }
}

/// A short labeled fact extracted from article text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyPoint {
    pub facet: Facet,
    pub text: String,
}

impl KeyPoint {
    pub fn new(facet: Facet, text: impl Into<String>) -> Self {
        Self { facet, text: text.into() }
    }
}

impl std::fmt::Display for KeyPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}：{}", self.facet.label(), self.text)
    }
}

/// Coarse single-label article classification.
///
/// Derived from title/content keyword hits; [`Category::Headline`] (要闻) is
/// the catch-all when nothing matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "科技")]
    Technology,
    #[serde(rename = "教育")]
    Education,
    #[serde(rename = "法律")]
    Legal,
    #[serde(rename = "两岸")]
    CrossStrait,
    #[serde(rename = "国际")]
    International,
    #[serde(rename = "经济")]
    Economy,
    #[serde(rename = "社会")]
    Society,
    #[serde(rename = "要闻")]
    Headline,
}

/// Ordered category keyword table. First hit wins, so more distinctive
/// categories come before broad ones.
const CATEGORY_KEYWORDS: &[(Category, &[&str])] = &[
    (Category::Technology, &["科技", "AI", "微信", "互联网", "数字"]),
    (Category::Education, &["教育", "学校", "学生", "考试"]),
    (Category::Legal, &["法院", "检察", "司法", "违法", "犯罪"]),
    (Category::CrossStrait, &["台湾", "两岸", "国台办", "台海", "赖清德"]),
    (Category::International, &["美国", "日本", "韩国", "国际", "外媒"]),
    (Category::Economy, &["经济", "金价", "就业", "关税", "企业"]),
    (Category::Society, &["社会", "民生", "交通", "生活"]),
];

impl Category {
    /// Classifies text by the ordered keyword table; defaults to 要闻.
    pub fn classify(text: &str) -> Category {
        for (category, keywords) in CATEGORY_KEYWORDS {
            if keywords.iter().any(|kw| text.contains(kw)) {
                return *category;
            }
        }
        Category::Headline
    }

    /// The Chinese display label, e.g. `两岸`.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Technology => "科技",
            Category::Education => "教育",
            Category::Legal => "法律",
            Category::CrossStrait => "两岸",
            Category::International => "国际",
            Category::Economy => "经济",
            Category::Society => "社会",
            Category::Headline => "要闻",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A news article as it moves through the pipeline.
///
/// Created from a [`RawCandidate`], enriched in place by the pipeline, and
/// consumed read-only by renderers and persistence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    /// Absolute URL; unique identity within a run.
    pub url: String,
    /// Headline. Non-empty after validation at the dedup boundary.
    pub title: String,
    /// Publisher label.
    pub source: String,
    /// Listing channel.
    pub channel: String,
    /// Publication date, `YYYY-MM-DD`.
    pub publish_date: String,
    /// Body text as fetched, before normalization.
    #[serde(default)]
    pub raw_content: String,
    /// Body text after boilerplate stripping.
    #[serde(default)]
    pub clean_content: String,
    /// Bounded-length derived summary.
    #[serde(default)]
    pub summary: String,
    /// Extracted labeled facts, at most [`crate::keypoints::GLOBAL_POINT_CAP`].
    #[serde(default)]
    pub key_points: Vec<KeyPoint>,
    /// Coarse classification label.
    pub category: Category,
    /// Fetch outcome.
    pub status: FetchStatus,
}

impl Article {
    /// Builds a pipeline-owned article from a raw candidate.
    ///
    /// A candidate that arrives with body content is considered fetched;
    /// one without stays pending until a detail fetch fills it in. The
    /// publish date falls back to URL path segments, then to `fallback_date`.
    pub fn from_candidate(candidate: RawCandidate, fallback_date: &str) -> Self {
        let publish_date = candidate
            .publish_date
            .clone()
            .or_else(|| date_from_url(&candidate.url))
            .unwrap_or_else(|| fallback_date.to_string());

        // Present-but-empty content still counts as fetched: some articles
        // legitimately have no body and live on title-only matches.
        let status =
            if candidate.content.is_some() { FetchStatus::Fetched } else { FetchStatus::Pending };
        let raw_content = candidate.content.unwrap_or_default();
        let category = Category::classify(&candidate.title);

        Self {
            url: candidate.url,
            title: candidate.title,
            source: candidate.source.unwrap_or_else(|| DEFAULT_SOURCE.to_string()),
            channel: candidate.channel.unwrap_or_else(|| DEFAULT_CHANNEL.to_string()),
            publish_date,
            raw_content,
            clean_content: String::new(),
            summary: String::new(),
            key_points: Vec::new(),
            category,
            status,
        }
    }
}

/// Derives a publication date from `/YYYY/MM-DD/` URL path segments.
///
/// chinanews-style article URLs carry the date in the path, e.g.
/// `https://www.chinanews.com.cn/gn/2026/02-12/10371355.shtml`.
pub fn date_from_url(url: &str) -> Option<String> {
    let re = Regex::new(r"/(\d{4})/(\d{2})-(\d{2})/").unwrap();
    let caps = re.captures(url)?;
    Some(format!("{}-{}-{}", &caps[1], &caps[2], &caps[3]))
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

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
    fn test_date_from_url() {
        assert_eq!(
            date_from_url("https://www.chinanews.com.cn/gn/2026/02-12/10371355.shtml"),
            Some("2026-02-12".to_string())
        );
        assert_eq!(date_from_url("https://example.com/article.html"), None);
    }

    #[test]
    fn test_from_candidate_defaults() {
        let article = Article::from_candidate(candidate("https://example.com/x.html", "标题"), "2026-02-12");

        assert_eq!(article.source, DEFAULT_SOURCE);
        assert_eq!(article.channel, DEFAULT_CHANNEL);
        assert_eq!(article.publish_date, "2026-02-12");
        assert_eq!(article.status, FetchStatus::Pending);
    }

    #[test]
    fn test_from_candidate_with_content_is_fetched() {
        let mut cand = candidate("https://example.com/x.html", "标题");
        cand.content = Some("正文内容".to_string());
        let article = Article::from_candidate(cand, "2026-02-12");
        assert_eq!(article.status, FetchStatus::Fetched);
        assert_eq!(article.raw_content, "正文内容");
    }

    #[test]
    fn test_from_candidate_empty_content_is_fetched() {
        // An empty body that was actually retrieved is a fetched article,
        // not a pending one; only a missing body means pending.
        let mut cand = candidate("https://example.com/x.html", "标题");
        cand.content = Some(String::new());
        let article = Article::from_candidate(cand, "2026-02-12");
        assert_eq!(article.status, FetchStatus::Fetched);
        assert!(article.raw_content.is_empty());
    }

    #[test]
    fn test_from_candidate_url_date_wins_over_fallback() {
        let cand = candidate("https://www.chinanews.com.cn/gn/2026/02-10/1.shtml", "标题");
        let article = Article::from_candidate(cand, "2026-02-12");
        assert_eq!(article.publish_date, "2026-02-10");
    }

    #[test]
    fn test_category_classify_ordered() {
        assert_eq!(Category::classify("国台办：坚持一个中国原则"), Category::CrossStrait);
        assert_eq!(Category::classify("全国法院审理案件数量上升"), Category::Legal);
        assert_eq!(Category::classify("某地举办龙舟赛"), Category::Headline);
        // 科技 precedes 经济 in the table; a text hitting both resolves to 科技.
        assert_eq!(Category::classify("科技企业发展迅速"), Category::Technology);
    }

    #[rstest]
    #[case("国台办新闻发布会", Category::CrossStrait)]
    #[case("全国中小学校秋季开学", Category::Education)]
    #[case("美国宣布加征关税", Category::International)]
    #[case("某地举办美食节", Category::Headline)]
    fn test_classify_cases(#[case] title: &str, #[case] expected: Category) {
        assert_eq!(Category::classify(title), expected);
    }

    #[test]
    fn test_category_serde_labels() {
        let json = serde_json::to_string(&Category::CrossStrait).unwrap();
        assert_eq!(json, "\"两岸\"");
        let back: Category = serde_json::from_str("\"要闻\"").unwrap();
        assert_eq!(back, Category::Headline);
    }

    #[test]
    fn test_key_point_display() {
        let point = KeyPoint::new(Facet::Organization, "国务院");
        assert_eq!(point.to_string(), "机构：国务院");
    }

    #[test]
    fn test_candidate_deserialization_minimal() {
        let json = r#"{"url": "https://example.com/a.html", "title": "某标题"}"#;
        let cand: RawCandidate = serde_json::from_str(json).unwrap();
        assert_eq!(cand.title, "某标题");
        assert!(cand.content.is_none());
    }
}
