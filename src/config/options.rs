// src/config/options.rs
use std::path::PathBuf;
use std::time::Duration;

use chrono::NaiveDate;

use super::consts::*;

/// Everything one run needs to know. Built from the CLI, defaults otherwise.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunOptions {
    pub categories: Vec<Category>,
    pub search: SearchOptions,
    pub detail: DetailOptions,
    pub export: ExportOptions,
    pub timeout: Duration,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            categories: Category::defaults(),
            search: SearchOptions::default(),
            detail: DetailOptions::default(),
            export: ExportOptions::default(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl RunOptions {
    /// Keep only the categories whose label matches one of `labels`
    /// (case-insensitive). An empty filter keeps everything.
    pub fn retain_categories(&mut self, labels: &[String]) {
        if labels.is_empty() {
            return;
        }
        self.categories
            .retain(|c| labels.iter().any(|l| l.eq_ignore_ascii_case(&c.label)));
    }

    pub fn set_grant_category(&mut self, grant_category: &str) {
        for c in &mut self.categories {
            c.grant_category = s!(grant_category);
        }
    }
}

/// One funding category: what to search for and what to keep.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Category {
    pub label: String,
    pub keywords: Vec<String>,
    pub grant_category: String,
}

impl Category {
    pub fn new(label: &str, keywords: &[&str]) -> Self {
        Self {
            label: s!(label),
            keywords: keywords.iter().map(|k| s!(*k)).collect(),
            grant_category: s!(DEFAULT_GRANT_CATEGORY),
        }
    }

    pub fn defaults() -> Vec<Category> {
        CATEGORIES
            .iter()
            .map(|(label, keywords)| Category::new(label, keywords))
            .collect()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchOptions {
    pub url: String,
    pub accept: String,
    pub page_size: u32,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            url: s!(SEARCH_URL),
            accept: s!(SEARCH_ACCEPT),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DetailOptions {
    pub url: String,
    /// 1 = strictly sequential.
    pub workers: usize,
}

impl Default for DetailOptions {
    fn default() -> Self {
        Self {
            url: s!(DETAIL_URL),
            workers: DEFAULT_WORKERS,
        }
    }
}

impl DetailOptions {
    /// Worker count actually used for `jobs` requests.
    pub fn effective_workers(&self, jobs: usize) -> usize {
        self.workers.clamp(1, MAX_WORKERS).min(jobs.max(1))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportOptions {
    pub out_dir: PathBuf,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self { out_dir: PathBuf::from(DEFAULT_OUT_DIR) }
    }
}

impl ExportOptions {
    /// `<out_dir>/<label>_projects_<YYYY-MM-DD>.csv`
    pub fn out_path(&self, label: &str, date: NaiveDate) -> PathBuf {
        let stem = crate::core::sanitize::sanitize_file_stem(label);
        let date = date.format("%Y-%m-%d").to_string();
        self.out_dir.join(join!(&stem, FILE_INFIX, &date, ".", FILE_EXT))
    }
}
