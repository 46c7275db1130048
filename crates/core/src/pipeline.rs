//! Pipeline entry point: runs a raw candidate batch through every stage
//! and produces the day's report.

use chrono::Local;

use crate::article::{Article, Category, FetchStatus, RawCandidate};
use crate::assemble::{self, AssembleConfig, Report};
use crate::dedup::{self, DedupConfig};
use crate::error::{NewslinkError, Result};
use crate::keypoints::{self, KeyPointConfig};
use crate::matcher::{self, ChapterMatch, MatchConfig};
use crate::normalize;
use crate::summarize::{self, SummaryConfig};
use crate::taxonomy::Taxonomy;

/// All pipeline tunables in one place.
///
/// Every stage config has a sensible default; use [`PipelineConfigBuilder`]
/// to adjust individual knobs.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub dedup: DedupConfig,
    pub key_points: KeyPointConfig,
    pub matching: MatchConfig,
    pub summary: SummaryConfig,
    pub assembly: AssembleConfig,
    /// Reporting date, `YYYY-MM-DD`. Today when unset.
    pub report_date: Option<String>,
    /// Attach a category-based fallback match when no rule fires. Off,
    /// unmatched articles carry an empty match list.
    pub category_fallback: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            dedup: DedupConfig::default(),
            key_points: KeyPointConfig::default(),
            matching: MatchConfig::default(),
            summary: SummaryConfig::default(),
            assembly: AssembleConfig::default(),
            report_date: None,
            category_fallback: true,
        }
    }
}

impl PipelineConfig {
    pub fn builder() -> PipelineConfigBuilder {
        PipelineConfigBuilder::default()
    }
}

/// Builder for [`PipelineConfig`].
#[derive(Debug, Default)]
pub struct PipelineConfigBuilder {
    config: PipelineConfig,
}

impl PipelineConfigBuilder {
    pub fn min_score(mut self, min_score: u32) -> Self {
        self.config.matching.min_score = min_score;
        self
    }

    pub fn hot_cap(mut self, hot_cap: usize) -> Self {
        self.config.assembly.hot_cap = hot_cap;
        self
    }

    pub fn max_records(mut self, max_records: usize) -> Self {
        self.config.assembly.max_records = max_records;
        self
    }

    pub fn title_prefix_chars(mut self, chars: usize) -> Self {
        self.config.dedup.title_prefix_chars = chars;
        self
    }

    pub fn max_summary_chars(mut self, chars: usize) -> Self {
        self.config.summary.max_chars = chars;
        self
    }

    pub fn report_date(mut self, date: impl Into<String>) -> Self {
        self.config.report_date = Some(date.into());
        self
    }

    pub fn category_fallback(mut self, enabled: bool) -> Self {
        self.config.category_fallback = enabled;
        self
    }

    pub fn build(self) -> PipelineConfig {
        self.config
    }
}

/// Result of one pipeline run.
#[derive(Debug, Clone)]
pub struct Outcome {
    pub report: Report,
    /// Articles whose detail fetch failed, kept for diagnostics.
    pub failed: Vec<Article>,
    /// Candidates dropped as duplicates.
    pub duplicates_dropped: usize,
}

/// The batch pipeline. Holds config and taxonomy; carries no mutable state
/// between runs.
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: PipelineConfig,
    taxonomy: Taxonomy,
}

impl Pipeline {
    /// A pipeline over the built-in taxonomy.
    pub fn new(config: PipelineConfig) -> Self {
        Self { config, taxonomy: Taxonomy::builtin() }
    }

    pub fn with_taxonomy(config: PipelineConfig, taxonomy: Taxonomy) -> Result<Self> {
        taxonomy.validate()?;
        Ok(Self { config, taxonomy })
    }

    pub fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Runs dedup, normalization, extraction, matching, summarization and
    /// assembly over an already-fetched batch.
    ///
    /// `hot_paths` is the ordered priority signal (URL paths); pass an empty
    /// slice to rank by discovery order. Fails with `EmptyBatch` when no
    /// candidate in the batch carries fetched content.
    pub fn process(&self, candidates: Vec<RawCandidate>, hot_paths: &[String]) -> Result<Outcome> {
        let date = self.report_date();
        let before = candidates.len();
        let unique = dedup::dedup_candidates(candidates, &self.config.dedup);
        let duplicates_dropped = before - unique.len();

        let articles: Vec<Article> =
            unique.into_iter().map(|c| Article::from_candidate(c, &date)).collect();
        let mut outcome = self.process_articles(articles, hot_paths)?;
        outcome.duplicates_dropped = duplicates_dropped;
        Ok(outcome)
    }

    /// Like [`Pipeline::process`] but over articles built elsewhere, e.g.
    /// after a detail-fetch pass. Skips deduplication.
    pub fn process_articles(
        &self,
        articles: Vec<Article>,
        hot_paths: &[String],
    ) -> Result<Outcome> {
        if !articles.iter().any(|a| a.status == FetchStatus::Fetched) {
            return Err(NewslinkError::EmptyBatch);
        }

        let mut enriched: Vec<(Article, Vec<ChapterMatch>)> = Vec::with_capacity(articles.len());
        let mut failed = Vec::new();
        for article in articles {
            if article.status == FetchStatus::Failed {
                failed.push(article);
                continue;
            }
            enriched.push(self.enrich(article));
        }

        let date = self.report_date();
        let generated_at = Local::now().to_rfc3339();
        let report =
            assemble::assemble(enriched, hot_paths, &date, &generated_at, &self.config.assembly);
        Ok(Outcome { report, failed, duplicates_dropped: 0 })
    }

    /// The configured reporting date, today when unset.
    pub fn report_date(&self) -> String {
        self.config
            .report_date
            .clone()
            .unwrap_or_else(|| Local::now().format("%Y-%m-%d").to_string())
    }

    /// Runs the per-article stages and attaches chapter matches.
    fn enrich(&self, mut article: Article) -> (Article, Vec<ChapterMatch>) {
        article.clean_content = normalize::normalize_content(&article.raw_content);
        article.category = Category::classify(&article.title);
        article.key_points =
            keypoints::extract_key_points(&article.clean_content, &self.config.key_points);
        article.summary = summarize::summarize(&article.clean_content, &self.config.summary);

        let mut matches = matcher::match_text(
            &article.title,
            &article.clean_content,
            &self.taxonomy,
            &self.config.matching,
        );
        if matches.is_empty() && self.config.category_fallback {
            matches.push(matcher::fallback_for_category(article.category, &self.taxonomy));
        }
        (article, matches)
    }
}
