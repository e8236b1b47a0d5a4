// src/cli.rs
use std::path::PathBuf;
use std::time::Duration;

use chrono::Local;
use clap::Parser;

use crate::{
    config::consts::{DEFAULT_OUT_DIR, DEFAULT_PAGE_SIZE, DEFAULT_TIMEOUT_SECS, DEFAULT_WORKERS, DETAIL_URL, SEARCH_URL},
    config::options::RunOptions,
    core::HttpSource,
    error::{Error, Result},
    progress::Progress,
    runner::{self, RunSummary},
};

/// Export active CDT/DTP training grants from UKRI Gateway to Research.
///
/// With no arguments, searches both categories, fetches every project's
/// details and writes `<category>_projects_<date>.csv` to the current directory.
#[derive(Debug, Parser)]
#[command(name = "gtr_scrape", version, about)]
pub struct Cli {
    /// Directory for the CSV files.
    #[arg(short, long, env = "GTR_OUT_DIR", default_value = DEFAULT_OUT_DIR)]
    pub out_dir: PathBuf,

    /// Per-request timeout in seconds.
    #[arg(long, env = "GTR_TIMEOUT", default_value_t = DEFAULT_TIMEOUT_SECS,
          value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: u64,

    /// Search results per page.
    #[arg(long, env = "GTR_PAGE_SIZE", default_value_t = DEFAULT_PAGE_SIZE,
          value_parser = clap::value_parser!(u32).range(1..=100))]
    pub page_size: u32,

    /// Concurrent detail requests (1 = sequential).
    #[arg(short, long, env = "GTR_WORKERS", default_value_t = DEFAULT_WORKERS)]
    pub workers: usize,

    /// Only run these categories (repeatable), e.g. `--category DTP`.
    #[arg(short, long = "category", env = "GTR_CATEGORIES", value_delimiter = ',')]
    pub categories: Vec<String>,

    /// Grant category a search hit must carry to be kept.
    #[arg(long, env = "GTR_GRANT_CATEGORY")]
    pub grant_category: Option<String>,

    /// Search endpoint.
    #[arg(long, env = "GTR_SEARCH_URL", default_value = SEARCH_URL)]
    pub search_url: String,

    /// Detail endpoint.
    #[arg(long, env = "GTR_DETAIL_URL", default_value = DETAIL_URL)]
    pub detail_url: String,

    /// Debug logging for this crate.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn into_options(self) -> Result<RunOptions> {
        let mut options = RunOptions::default();
        options.retain_categories(&self.categories);
        if options.categories.is_empty() {
            return Err(Error::Config(format!("no category matches {:?}", self.categories)));
        }
        if let Some(gc) = self.grant_category.as_deref() {
            options.set_grant_category(gc);
        }
        options.search.url = self.search_url;
        options.search.page_size = self.page_size;
        options.detail.url = self.detail_url;
        options.detail.workers = self.workers;
        options.export.out_dir = self.out_dir;
        options.timeout = Duration::from_secs(self.timeout);
        Ok(options)
    }
}

/// Parse arguments, set up logging and run the whole pipeline.
pub fn run() -> Result<RunSummary> {
    let cli = Cli::parse();
    crate::log::init(cli.verbose);

    let options = cli.into_options()?;
    let src = HttpSource::new(options.timeout)?;
    let today = Local::now().date_naive();

    let mut console = ConsoleProgress::default();
    let progress: &mut dyn Progress = &mut console;
    let summary = runner::run(&options, &src, today, Some(progress))?;

    for c in &summary.categories {
        let out = c
            .output
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| s!("(not written)"));
        println!(
            "{}: {} project(s), {} without details -> {}",
            c.label,
            c.records,
            c.detail_failures.len(),
            out
        );
    }
    Ok(summary)
}

/// Prints one line per stage to stdout.
#[derive(Default)]
struct ConsoleProgress {
    stage: String,
    total: usize,
    done: usize,
    failed: usize,
}

impl Progress for ConsoleProgress {
    fn begin(&mut self, stage: &str, total: usize) {
        self.stage = s!(stage);
        self.total = total;
        self.done = 0;
        self.failed = 0;
        println!("{stage}: {total} item(s)…");
    }

    fn log(&mut self, msg: &str) {
        println!("{msg}");
    }

    fn item_done(&mut self, _item: &str) {
        self.done += 1;
    }

    fn item_failed(&mut self, _item: &str, _reason: &str) {
        self.failed += 1;
    }

    fn finish(&mut self) {
        println!(
            "{}: {}/{} done, {} failed",
            self.stage, self.done, self.total, self.failed
        );
    }
}
