//! Report assembly: orders articles by the hot signal and freezes the
//! day's report.

use serde::{Deserialize, Serialize};

use crate::article::{Article, FetchStatus};
use crate::dedup::url_path;
use crate::matcher::ChapterMatch;

/// Tunables for report assembly.
#[derive(Debug, Clone)]
pub struct AssembleConfig {
    /// Leading records flagged as hot.
    pub hot_cap: usize,
    /// Hard cap on records in the report.
    pub max_records: usize,
}

impl Default for AssembleConfig {
    fn default() -> Self {
        AssembleConfig { hot_cap: 10, max_records: 25 }
    }
}

/// One ranked entry in a report. Immutable once assembled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportRecord {
    /// 1-based position in the report.
    pub rank: usize,
    pub hot: bool,
    pub article: Article,
    pub chapter_matches: Vec<ChapterMatch>,
}

/// A finished daily report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Reporting date, `YYYY-MM-DD`.
    pub date: String,
    /// Assembly timestamp, RFC 3339.
    pub generated_at: String,
    pub records: Vec<ReportRecord>,
}

impl Report {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Assembles the day's report from matched articles and the hot signal.
///
/// The hot signal is an ordered list of URL paths. Articles whose
/// normalized path appears in the signal come first, in signal order;
/// everything else follows in discovery order. Ranks are contiguous from 1
/// and the first `hot_cap` records are flagged hot. Only `Fetched`
/// articles participate. An empty or missing signal degrades to plain
/// discovery order.
pub fn assemble(
    articles: Vec<(Article, Vec<ChapterMatch>)>,
    hot_paths: &[String],
    date: &str,
    generated_at: &str,
    config: &AssembleConfig,
) -> Report {
    let mut entries: Vec<(Article, Vec<ChapterMatch>)> = articles
        .into_iter()
        .filter(|(a, _)| a.status == FetchStatus::Fetched)
        .collect();

    // Signal rank per article path; unmatched articles keep discovery
    // order after every matched one.
    let signal_rank = |article: &Article| -> usize {
        url_path(&article.url)
            .and_then(|p| hot_paths.iter().position(|h| h == &p))
            .unwrap_or(usize::MAX)
    };
    let mut keyed: Vec<(usize, usize, (Article, Vec<ChapterMatch>))> = entries
        .drain(..)
        .enumerate()
        .map(|(i, entry)| (signal_rank(&entry.0), i, entry))
        .collect();
    keyed.sort_by(|a, b| a.0.cmp(&b.0).then(a.1.cmp(&b.1)));

    let records = keyed
        .into_iter()
        .take(config.max_records)
        .enumerate()
        .map(|(i, (_, _, (article, chapter_matches)))| ReportRecord {
            rank: i + 1,
            hot: i < config.hot_cap,
            article,
            chapter_matches,
        })
        .collect();

    Report { date: date.to_string(), generated_at: generated_at.to_string(), records }
}
