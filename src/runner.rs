// src/runner.rs
use std::path::PathBuf;

use chrono::NaiveDate;
use tracing::{error, info};

use crate::{
    config::options::{Category, RunOptions},
    core::JsonSource,
    data::ProjectCollection,
    error::Result,
    file::export_category,
    progress::Progress,
    scrape::{collect_projects, enrich_projects},
};

/// What one category produced.
#[derive(Clone, Debug)]
pub struct CategoryReport {
    pub label: String,
    pub records: usize,
    /// References left with basic fields only.
    pub detail_failures: Vec<String>,
    /// None when the export failed.
    pub output: Option<PathBuf>,
}

/// Summary of what was produced.
#[derive(Clone, Debug, Default)]
pub struct RunSummary {
    pub categories: Vec<CategoryReport>,
}

impl RunSummary {
    pub fn files_written(&self) -> Vec<PathBuf> {
        self.categories.iter().filter_map(|c| c.output.clone()).collect()
    }
}

/// Top-level pipeline: search every category, then fetch details, then export.
///
/// Only a first-page search failure ends the run early; nothing is written in
/// that case. Every other failure is logged and the run carries on.
pub fn run(
    options: &RunOptions,
    src: &dyn JsonSource,
    today: NaiveDate,
    mut progress: Option<&mut (dyn Progress + '_)>,
) -> Result<RunSummary> {
    // Stage 1: search
    let mut found: Vec<(&Category, ProjectCollection)> = Vec::with_capacity(options.categories.len());
    for category in &options.categories {
        let projects = collect_projects(src, &options.search, category, progress.as_deref_mut())?;
        found.push((category, projects));
    }

    // Stage 2: details
    let mut enriched = Vec::with_capacity(found.len());
    for (category, projects) in found {
        let enrichment = enrich_projects(src, &options.detail, &category.label, projects, progress.as_deref_mut());
        enriched.push((category, enrichment));
    }

    // Stage 3: export
    let mut summary = RunSummary::default();
    for (category, enrichment) in enriched {
        let label = category.label.as_str();
        let output = match export_category(&options.export, label, &enrichment.projects, today) {
            Ok(path) => {
                info!(category = label, path = %path.display(), records = enrichment.projects.len(), "export written");
                if let Some(p) = progress.as_deref_mut() {
                    p.log(&format!("{label}: wrote {} record(s) to {}", enrichment.projects.len(), path.display()));
                }
                Some(path)
            }
            Err(e) => {
                error!(category = label, path = %e.path.display(), kind = "export", error = %e.source, "export failed");
                if let Some(p) = progress.as_deref_mut() {
                    p.log(&format!("{label}: export failed: {e}"));
                }
                None
            }
        };
        summary.categories.push(CategoryReport {
            label: s!(label),
            records: enrichment.projects.len(),
            detail_failures: enrichment.failed,
            output,
        });
    }

    Ok(summary)
}
