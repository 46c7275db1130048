use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::Context;
use chrono::Local;
use clap::Parser;
use newslink_core::{
    FetchConfig, Outcome, Pipeline, PipelineConfig, RawCandidate, Report, Taxonomy,
    dedup_candidates, default_data_dir, fetch_candidates, save_report, upsert_articles,
};
use owo_colors::OwoColorize;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build a curriculum-aligned daily report from raw news candidates
#[derive(Parser, Debug)]
#[command(name = "newslink")]
#[command(version = VERSION)]
#[command(about = "Deduplicate, enrich, and rank news articles into a daily report", long_about = None)]
struct Args {
    /// JSON file with raw candidates, or "-" for stdin
    #[arg(value_name = "INPUT")]
    input: String,

    /// JSON file with the ordered hot-signal URL paths
    #[arg(long, value_name = "FILE")]
    hot: Option<PathBuf>,

    /// Reporting date, YYYY-MM-DD (default: today)
    #[arg(long, value_name = "DATE")]
    date: Option<String>,

    /// Taxonomy rules JSON (default: built-in rule table)
    #[arg(long, value_name = "FILE")]
    taxonomy: Option<PathBuf>,

    /// Directory for report and article snapshots
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Fetch detail pages for candidates that arrive without content
    #[arg(long)]
    fetch_details: bool,

    /// HTTP timeout in seconds for detail fetches
    #[arg(long, default_value = "10", value_name = "SECS")]
    timeout: u64,

    /// Minimum chapter-match score
    #[arg(long, default_value = "70", value_name = "NUM")]
    min_score: u32,

    /// Maximum records in the report
    #[arg(long, default_value = "25", value_name = "NUM")]
    max_records: usize,

    /// Leading records flagged as hot
    #[arg(long, default_value = "10", value_name = "NUM")]
    hot_cap: usize,

    /// Print progress details
    #[arg(short, long)]
    verbose: bool,
}

/// Print a styled step message
fn print_step(step: usize, total: usize, message: &str) {
    eprintln!("{} {}", format!("[{}/{}]", step, total).dimmed(), message.bright_cyan());
}

/// Print a success message
fn print_success(message: &str) {
    eprintln!("{} {}", "✓".green(), message.bright_green());
}

/// Print a warning message
fn print_warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow(), message.bright_yellow());
}

fn read_candidates(input: &str) -> anyhow::Result<Vec<RawCandidate>> {
    let data = if input == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer).context("Failed to read from stdin")?;
        buffer
    } else {
        fs::read_to_string(input).with_context(|| format!("Failed to read file: {}", input))?
    };
    serde_json::from_str(&data).context("Failed to parse candidates JSON")
}

fn read_hot_paths(path: Option<&PathBuf>) -> anyhow::Result<Vec<String>> {
    let Some(path) = path else { return Ok(Vec::new()) };
    let data = fs::read_to_string(path)
        .with_context(|| format!("Failed to read hot-signal file: {}", path.display()))?;
    serde_json::from_str(&data).context("Failed to parse hot-signal JSON")
}

/// Print a styled report preview to stdout
fn print_report(report: &Report) {
    println!("{} {}", report.date.bold().bright_blue(), "新闻课程对齐报告".bold());
    println!();
    for record in &report.records {
        let marker = if record.hot { "[热]".bright_red().to_string() } else { "    ".to_string() };
        println!("{:>3}. {} {}", record.rank, marker, record.article.title.bright_white());
        if let Some(top) = record.chapter_matches.first() {
            let keyword = if top.matched_keyword.is_empty() {
                "栏目回退".to_string()
            } else {
                format!("关键词 {}", top.matched_keyword)
            };
            println!(
                "      {} {} · {} · {}分 · {}",
                "章节".dimmed(),
                top.chapter_title,
                top.book_name,
                top.score,
                keyword.dimmed()
            );
        }
        if !record.article.summary.is_empty() {
            let snippet: String = record.article.summary.chars().take(60).collect();
            println!("      {} {}", "摘要".dimmed(), snippet);
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let total_steps = if args.fetch_details { 4 } else { 3 };

    if args.verbose {
        print_step(1, total_steps, &format!("Reading candidates from {}", args.input));
    }
    let candidates = read_candidates(&args.input)?;
    let hot_paths = read_hot_paths(args.hot.as_ref())?;
    if candidates.is_empty() {
        anyhow::bail!("no candidates in input");
    }

    let date = args.date.clone().unwrap_or_else(|| Local::now().format("%Y-%m-%d").to_string());
    let config = PipelineConfig::builder()
        .min_score(args.min_score)
        .max_records(args.max_records)
        .hot_cap(args.hot_cap)
        .report_date(date.as_str())
        .build();

    let pipeline = match &args.taxonomy {
        Some(path) => {
            let taxonomy = Taxonomy::from_file(path)
                .with_context(|| format!("Failed to load taxonomy: {}", path.display()))?;
            Pipeline::with_taxonomy(config, taxonomy)?
        }
        None => Pipeline::new(config),
    };

    let outcome: Outcome = if args.fetch_details {
        if args.verbose {
            print_step(2, total_steps, "Fetching article details");
        }
        let unique = dedup_candidates(candidates, &pipeline.config().dedup);
        let fetch_config = FetchConfig { timeout: args.timeout, ..Default::default() };
        let articles = fetch_candidates(unique, &date, &fetch_config).await;
        pipeline.process_articles(articles, &hot_paths)?
    } else {
        if args.verbose {
            print_step(2, total_steps, "Running pipeline");
        }
        pipeline.process(candidates, &hot_paths)?
    };

    if args.verbose {
        if outcome.duplicates_dropped > 0 {
            print_warning(&format!("{} duplicate candidates dropped", outcome.duplicates_dropped));
        }
        if !outcome.failed.is_empty() {
            print_warning(&format!("{} articles failed to fetch", outcome.failed.len()));
        }
    }

    if args.verbose {
        print_step(total_steps, total_steps, "Writing snapshots");
    }
    let output_dir = args.output_dir.clone().unwrap_or_else(default_data_dir);
    let report_path = save_report(&outcome.report, &output_dir)
        .with_context(|| format!("Failed to write report to {}", output_dir.display()))?;
    let articles: Vec<_> = outcome.report.records.iter().map(|r| r.article.clone()).collect();
    upsert_articles(&articles, &output_dir).context("Failed to update article archive")?;

    print_report(&outcome.report);
    println!();
    print_success(&format!("Report written to {}", report_path.display()));

    Ok(())
}
