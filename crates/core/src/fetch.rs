//! Article detail fetching over HTTP.
//!
//! Listing pages carry only titles and URLs; this module fills in body
//! text, publish time, and source from the article detail pages. Retrieval
//! is async with a bounded worker pool; HTML field extraction is plain
//! synchronous selector work.

use std::time::Duration;

use futures::stream::{self, StreamExt};
use reqwest::Client;
use scraper::{Html, Selector};
use url::Url;

use crate::article::{date_from_url, Article, FetchStatus, RawCandidate};
use crate::error::{NewslinkError, Result};

/// Minimum paragraph length kept during body extraction. Shorter fragments
/// are navigation crumbs and photo credits.
const MIN_PARAGRAPH_CHARS: usize = 20;

/// HTTP client settings for detail fetches.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Request timeout in seconds.
    pub timeout: u64,
    /// User-Agent header sent with every request.
    pub user_agent: String,
    /// Concurrent detail fetches.
    pub concurrency: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: 10,
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/120.0 Safari/537.36"
                .to_string(),
            concurrency: 5,
        }
    }
}

/// Fields recovered from one article detail page.
#[derive(Debug, Clone, Default)]
pub struct FetchedDetail {
    pub content: String,
    pub publish_date: Option<String>,
    pub source: Option<String>,
}

/// Fetches and parses a single article detail page.
pub async fn fetch_detail(url: &str, config: &FetchConfig) -> Result<FetchedDetail> {
    let parsed = Url::parse(url).map_err(|e| NewslinkError::InvalidUrl(e.to_string()))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(NewslinkError::InvalidUrl(format!("unsupported scheme: {}", parsed.scheme())));
    }

    let client = Client::builder()
        .timeout(Duration::from_secs(config.timeout))
        .build()
        .map_err(NewslinkError::HttpError)?;

    let response = client
        .get(parsed)
        .header("User-Agent", &config.user_agent)
        .header("Accept", "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8")
        .header("Accept-Language", "zh-CN,zh;q=0.9")
        .send()
        .await
        .map_err(|e| {
            if e.is_timeout() {
                NewslinkError::Timeout { timeout: config.timeout }
            } else {
                NewslinkError::HttpError(e)
            }
        })?;

    let html = response.text().await?;
    let mut detail = parse_detail(&html);
    if detail.publish_date.is_none() {
        detail.publish_date = date_from_url(url);
    }
    Ok(detail)
}

/// Extracts body, publish time, and source from detail-page HTML.
///
/// Kept synchronous so the parsed document never lives across an await.
pub fn parse_detail(html: &str) -> FetchedDetail {
    let document = Html::parse_document(html);

    let body_selector = Selector::parse(".content p, .left_zw p").unwrap();
    let paragraphs: Vec<String> = document
        .select(&body_selector)
        .map(|p| p.text().collect::<String>().trim().to_string())
        .filter(|t| t.chars().count() >= MIN_PARAGRAPH_CHARS)
        .collect();
    let content = paragraphs.join("\n");

    let time_selector = Selector::parse(".pub-time, .left-t").unwrap();
    let publish_date = document
        .select(&time_selector)
        .map(|e| e.text().collect::<String>())
        .find_map(|t| extract_date(&t));

    let source_selector = Selector::parse(".pub-source, .source").unwrap();
    let source = document
        .select(&source_selector)
        .map(|e| e.text().collect::<String>().trim().to_string())
        .find(|t| !t.is_empty())
        .map(|t| t.trim_start_matches("来源：").trim().to_string());

    FetchedDetail { content, publish_date, source }
}

fn extract_date(text: &str) -> Option<String> {
    let re = regex::Regex::new(r"(\d{4})[-年](\d{1,2})[-月](\d{1,2})").unwrap();
    let caps = re.captures(text)?;
    let year: u32 = caps[1].parse().ok()?;
    let month: u32 = caps[2].parse().ok()?;
    let day: u32 = caps[3].parse().ok()?;
    Some(format!("{year:04}-{month:02}-{day:02}"))
}

/// Fetches details for every pending candidate through a bounded pool.
///
/// Output order matches input order. A failed fetch yields a `Failed`
/// article instead of aborting the batch; candidates that already carry
/// content skip the network round trip.
pub async fn fetch_candidates(
    candidates: Vec<RawCandidate>,
    fallback_date: &str,
    config: &FetchConfig,
) -> Vec<Article> {
    stream::iter(candidates)
        .map(|candidate| async move {
            if candidate.content.is_some() {
                return Article::from_candidate(candidate, fallback_date);
            }
            match fetch_detail(&candidate.url, config).await {
                Ok(detail) => {
                    let filled = RawCandidate {
                        url: candidate.url,
                        title: candidate.title,
                        content: Some(detail.content),
                        publish_date: candidate.publish_date.or(detail.publish_date),
                        source: candidate.source.or(detail.source),
                        channel: candidate.channel,
                    };
                    Article::from_candidate(filled, fallback_date)
                }
                Err(_) => {
                    let mut article = Article::from_candidate(candidate, fallback_date);
                    article.status = FetchStatus::Failed;
                    article
                }
            }
        })
        .buffered(config.concurrency.max(1))
        .collect()
        .await
}
