//! Report and article snapshots on disk.
//!
//! Plain JSON files, overwritten whole. Re-running a day replaces that
//! day's report and upserts its articles; nothing here appends.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::article::Article;
use crate::assemble::Report;
use crate::dedup::normalize_url;
use crate::error::Result;

/// File name of the rolling latest-report snapshot.
pub const LATEST_REPORT_FILE: &str = "report_latest.json";

/// File name of the merged article archive.
pub const ARTICLES_FILE: &str = "articles.json";

/// Default data directory, `<platform data dir>/newslink`.
///
/// Falls back to the current directory when the platform reports no data
/// dir (some containers).
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir().map(|d| d.join("newslink")).unwrap_or_else(|| PathBuf::from("."))
}

/// Writes `report_<date>.json` and refreshes `report_latest.json`.
///
/// Writing the same date twice overwrites, so a rerun upserts the day.
/// Returns the dated snapshot path.
pub fn save_report(report: &Report, dir: impl AsRef<Path>) -> Result<PathBuf> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;

    let json = serde_json::to_string_pretty(report)?;
    let dated = dir.join(format!("report_{}.json", report.date));
    fs::write(&dated, &json)?;
    fs::write(dir.join(LATEST_REPORT_FILE), &json)?;
    Ok(dated)
}

/// Reads a previously saved report snapshot.
pub fn load_report(path: impl AsRef<Path>) -> Result<Report> {
    let data = fs::read_to_string(path.as_ref())?;
    Ok(serde_json::from_str(&data)?)
}

/// Merges articles into `articles.json`, keyed by normalized URL.
///
/// Existing records with the same key are replaced; everything else is
/// kept. Articles whose URL fails normalization keep their raw URL as the
/// key. Returns the number of records in the archive after the merge.
pub fn upsert_articles(articles: &[Article], dir: impl AsRef<Path>) -> Result<usize> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;
    let path = dir.join(ARTICLES_FILE);

    let mut archive: BTreeMap<String, Article> = if path.exists() {
        serde_json::from_str(&fs::read_to_string(&path)?)?
    } else {
        BTreeMap::new()
    };

    for article in articles {
        let key = normalize_url(&article.url).unwrap_or_else(|| article.url.clone());
        archive.insert(key, article.clone());
    }

    fs::write(&path, serde_json::to_string_pretty(&archive)?)?;
    Ok(archive.len())
}
