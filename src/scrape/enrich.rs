// src/scrape/enrich.rs
use std::{
    sync::{atomic::{AtomicUsize, Ordering}, mpsc},
    thread,
};

use tracing::{info, warn};

use crate::{
    config::options::DetailOptions,
    core::JsonSource,
    data::ProjectCollection,
    error::FetchError,
    progress::Progress,
    specs::detail::{parse_detail, ProjectDetail},
};

/// Result of the detail stage for one category.
#[derive(Clone, Debug, Default)]
pub struct Enrichment {
    pub projects: ProjectCollection,
    /// References whose detail request failed; they keep basic fields only.
    pub failed: Vec<String>,
}

pub fn detail_url(detail: &DetailOptions, reference: &str) -> String {
    format!("{}?ref={}", detail.url, urlencoding::encode(reference))
}

/// Fetch one detail payload and parse it into typed form.
pub fn fetch_detail(
    src: &dyn JsonSource,
    detail: &DetailOptions,
    reference: &str,
) -> Result<ProjectDetail, FetchError> {
    let url = detail_url(detail, reference);
    let body = src.get(&url, None)?;
    parse_detail(&body).map_err(|source| FetchError::Parse { url, source })
}

/// Fetch and merge the detail payload of every project in `projects`.
///
/// With `detail.workers == 1` requests go out one after another. With more,
/// scoped workers pull references off a shared counter; only this thread
/// merges and reports, so the output is the same either way.
pub fn enrich_projects(
    src: &dyn JsonSource,
    detail: &DetailOptions,
    label: &str,
    projects: ProjectCollection,
    mut progress: Option<&mut (dyn Progress + '_)>,
) -> Enrichment {
    let refs = projects.references();

    if let Some(p) = progress.as_deref_mut() {
        p.begin(&format!("{label} details"), refs.len());
    }

    let mut out = Enrichment { projects, failed: Vec::new() };
    let workers = detail.effective_workers(refs.len());

    if workers == 1 {
        for reference in &refs {
            let result = fetch_detail(src, detail, reference);
            merge_outcome(&mut out, reference, result, progress.as_deref_mut());
        }
    } else {
        let counter = AtomicUsize::new(0);
        let (res_tx, res_rx) = mpsc::channel::<(usize, Result<ProjectDetail, FetchError>)>();

        thread::scope(|scope| {
            for _ in 0..workers {
                let tx = res_tx.clone();
                let refs = &refs;
                let counter = &counter;
                scope.spawn(move || loop {
                    let i = counter.fetch_add(1, Ordering::Relaxed);
                    if i >= refs.len() {
                        break;
                    }
                    let result = fetch_detail(src, detail, &refs[i]);
                    if tx.send((i, result)).is_err() {
                        break;
                    }
                });
            }
            drop(res_tx); // this thread is the sole receiver now

            for (i, result) in res_rx {
                merge_outcome(&mut out, &refs[i], result, progress.as_deref_mut());
            }
        });
    }

    out.failed.sort();
    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }
    info!(
        category = label,
        total = refs.len(),
        failed = out.failed.len(),
        workers,
        "detail fetch finished"
    );
    out
}

fn merge_outcome(
    out: &mut Enrichment,
    reference: &str,
    result: Result<ProjectDetail, FetchError>,
    progress: Option<&mut (dyn Progress + '_)>,
) {
    match result {
        Ok(detail) => {
            out.projects.merge_detail(reference, &detail);
            if let Some(p) = progress {
                p.item_done(reference);
            }
        }
        Err(e) => {
            warn!(url = e.url(), kind = e.kind(), error = %e, reference, "detail fetch failed; keeping basic fields");
            out.failed.push(s!(reference));
            if let Some(p) = progress {
                p.item_failed(reference, &e.to_string());
            }
        }
    }
}
