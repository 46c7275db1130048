pub mod article;
pub mod assemble;
pub mod dedup;
pub mod error;
#[cfg(feature = "fetch")]
pub mod fetch;
pub mod keypoints;
pub mod matcher;
pub mod normalize;
pub mod pipeline;
pub mod store;
pub mod summarize;
pub mod taxonomy;

pub use article::{Article, Category, Facet, FetchStatus, KeyPoint, RawCandidate, date_from_url};
pub use assemble::{AssembleConfig, Report, ReportRecord, assemble};
pub use dedup::{DedupConfig, dedup_candidates, normalize_url, url_path};
pub use error::{NewslinkError, Result};
#[cfg(feature = "fetch")]
pub use fetch::{FetchConfig, FetchedDetail, fetch_candidates, fetch_detail};
pub use keypoints::{KeyPointConfig, extract_key_points};
pub use matcher::{ChapterMatch, MatchConfig, fallback_for_category, match_text};
pub use normalize::normalize_content;
pub use pipeline::{Outcome, Pipeline, PipelineConfig, PipelineConfigBuilder};
pub use store::{default_data_dir, load_report, save_report, upsert_articles};
pub use summarize::{SummaryConfig, summarize};
pub use taxonomy::{Chapter, ChapterRule, Taxonomy};
