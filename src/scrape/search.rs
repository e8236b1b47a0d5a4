// src/scrape/search.rs
use tracing::{debug, info, warn};

use crate::{
    config::options::{Category, SearchOptions},
    core::JsonSource,
    data::ProjectCollection,
    error::{Error, FetchError, Result},
    progress::Progress,
    specs::search::{parse_page, SearchResultPage},
};

/// Keyword terms, each URL-encoded, joined as an OR query.
pub fn build_query(keywords: &[String]) -> String {
    keywords
        .iter()
        .map(|k| k.trim())
        .filter(|k| !k.is_empty())
        .map(|k| urlencoding::encode(k).into_owned())
        .collect::<Vec<_>>()
        .join("+OR+")
}

/// Page 1 carries no `p` parameter.
pub fn page_url(search: &SearchOptions, query: &str, page: u32) -> String {
    let mut url = format!("{}?s={}&q={}", search.url, search.page_size, query);
    if page > 1 {
        url.push_str(&format!("&p={page}"));
    }
    url
}

/// Fetch one result page and parse it into typed form.
pub fn fetch_page(src: &dyn JsonSource, search: &SearchOptions, url: &str) -> std::result::Result<SearchResultPage, FetchError> {
    let body = src.get(url, Some(search.accept.as_str()))?;
    parse_page(&body).map_err(|source| FetchError::Parse { url: s!(url), source })
}

/// Walk every result page for `category` and keep the matching, active hits.
///
/// The first page is mandatory: without it there is no page count, so its
/// failure is returned. Any later page that fails is logged and skipped.
pub fn collect_projects(
    src: &dyn JsonSource,
    search: &SearchOptions,
    category: &Category,
    mut progress: Option<&mut (dyn Progress + '_)>,
) -> Result<ProjectCollection> {
    let label = category.label.as_str();
    let query = build_query(&category.keywords);

    let first_url = page_url(search, &query, 1);
    let first = fetch_page(src, search, &first_url)
        .map_err(|source| Error::Search { category: s!(label), source })?;

    let total_pages = first.total_pages.unwrap_or(1).max(1);
    info!(
        category = label,
        total_pages,
        total_size = first.total_size.unwrap_or(0),
        "search started"
    );
    if let Some(reported) = first.page.filter(|p| *p != 1) {
        // Requested page 1 but the server says otherwise; still walk 2..=total.
        warn!(category = label, reported, "first search response reports page != 1");
    }

    if let Some(p) = progress.as_deref_mut() {
        p.begin(&format!("{label} search"), total_pages as usize);
    }

    let mut projects = ProjectCollection::new();
    let kept = absorb_page(&mut projects, first, category);
    debug!(category = label, page = 1, kept, "search page read");
    if let Some(p) = progress.as_deref_mut() {
        p.item_done("page 1");
    }

    for page in 2..=total_pages {
        let url = page_url(search, &query, page);
        match fetch_page(src, search, &url) {
            Ok(result) => {
                let kept = absorb_page(&mut projects, result, category);
                debug!(category = label, page, kept, "search page read");
                if let Some(p) = progress.as_deref_mut() {
                    p.item_done(&format!("page {page}"));
                }
            }
            Err(e) => {
                warn!(url = e.url(), kind = e.kind(), error = %e, category = label, page, "skipping search page");
                if let Some(p) = progress.as_deref_mut() {
                    p.item_failed(&format!("page {page}"), &e.to_string());
                }
            }
        }
    }

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }
    info!(category = label, kept = projects.len(), "search finished");
    Ok(projects)
}

/// Filter one page into the collection. Returns how many hits were kept.
fn absorb_page(projects: &mut ProjectCollection, page: SearchResultPage, category: &Category) -> usize {
    let mut kept = 0;
    for raw in page.project {
        let id = raw.id.clone();
        match raw.into_record(category) {
            Ok(record) => {
                projects.insert(record);
                kept += 1;
            }
            Err(reason) => debug!(category = %category.label, id = ?id, ?reason, "search hit dropped"),
        }
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_encodes_each_term() {
        let q = build_query(&[s!("Centre for Doctoral Training"), s!(" CDT "), s!("")]);
        assert_eq!(q, "Centre%20for%20Doctoral%20Training+OR+CDT");
    }

    #[test]
    fn page_param_only_after_first() {
        let search = SearchOptions { url: s!("http://h/api/projects"), accept: s!("x"), page_size: 50 };
        assert_eq!(page_url(&search, "q1", 1), "http://h/api/projects?s=50&q=q1");
        assert_eq!(page_url(&search, "q1", 3), "http://h/api/projects?s=50&q=q1&p=3");
    }
}
