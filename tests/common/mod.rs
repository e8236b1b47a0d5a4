// tests/common/mod.rs
//
// Canned registry for driving the pipeline without a network.
//
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use gtr_scrape::config::options::{Category, DetailOptions, RunOptions, SearchOptions};
use gtr_scrape::core::JsonSource;
use gtr_scrape::error::FetchError;
use gtr_scrape::scrape::{build_query, detail_url, page_url};

pub const SEARCH: &str = "http://gtr.test/api/projects";
pub const DETAIL: &str = "http://gtr.test/projects.json";

/// URL → body, or a network failure for URLs registered with `fail`.
/// Anything unregistered answers 404.
#[derive(Default)]
pub struct FakeSource {
    bodies: HashMap<String, String>,
    failing: Vec<String>,
    pub requests: Mutex<Vec<(String, Option<String>)>>,
}

impl FakeSource {
    pub fn new() -> Self { Self::default() }

    pub fn ok(mut self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.bodies.insert(url.into(), body.into());
        self
    }

    pub fn fail(mut self, url: impl Into<String>) -> Self {
        self.failing.push(url.into());
        self
    }

    pub fn requested(&self) -> Vec<String> {
        self.requests.lock().unwrap().iter().map(|(u, _)| u.clone()).collect()
    }
}

impl JsonSource for FakeSource {
    fn get(&self, url: &str, accept: Option<&str>) -> Result<String, FetchError> {
        self.requests.lock().unwrap().push((url.to_string(), accept.map(str::to_string)));
        if self.failing.iter().any(|u| u == url) {
            return Err(FetchError::Network { url: url.to_string(), source: "connection reset".into() });
        }
        match self.bodies.get(url) {
            Some(body) => Ok(body.clone()),
            None => Err(FetchError::Status { url: url.to_string(), status: 404 }),
        }
    }
}

pub fn search_options() -> SearchOptions {
    SearchOptions { url: SEARCH.into(), page_size: 100, ..SearchOptions::default() }
}

pub fn detail_options(workers: usize) -> DetailOptions {
    DetailOptions { url: DETAIL.into(), workers }
}

pub fn run_options(out_dir: &std::path::Path) -> RunOptions {
    let mut o = RunOptions::default();
    o.search = search_options();
    o.detail = detail_options(1);
    o.export.out_dir = out_dir.to_path_buf();
    o
}

pub fn search_url(category: &Category, page: u32) -> String {
    page_url(&search_options(), &build_query(&category.keywords), page)
}

pub fn detail_for(reference: &str) -> String {
    detail_url(&detail_options(1), reference)
}

/// One search hit.
pub fn hit(reference: &str, title: &str, grant_category: &str, status: &str) -> String {
    format!(
        r#"{{ "id": "id-{reference}", "title": "{title}", "status": "{status}",
             "grantCategory": "{grant_category}",
             "identifiers": {{ "identifier": [ {{ "value": "{reference}", "type": "RCUK" }} ] }} }}"#
    )
}

/// A search envelope around `hits`.
pub fn page(total_pages: u32, page: u32, hits: &[String]) -> String {
    format!(
        r#"{{ "totalPages": {total_pages}, "totalSize": {}, "page": {page}, "size": 100, "project": [ {} ] }}"#,
        hits.len(),
        hits.join(",")
    )
}

/// A detail payload with one principal investigator.
pub fn detail(org: &str, surname: &str) -> String {
    format!(
        r#"{{ "projectOverview": {{ "projectComposition": {{
            "leadResearchOrganisation": {{ "name": "{org}", "department": "Physics",
              "address": {{ "line1": "1 College Road", "city": "Exeter", "postCode": "EX4 4QJ", "region": "South West" }} }},
            "project": {{ "url": "https://gtr.ukri.org/projects?ref=x",
              "fund": {{ "funder": {{ "name": "NERC" }}, "start": "2020-10-01", "end": "2028-09-30", "valuePounds": 250000 }} }},
            "personRole": [ {{ "firstName": "Ada", "surname": "{surname}",
                              "role": [ {{ "name": "PRINCIPAL_INVESTIGATOR" }} ] }} ]
        }} }} }}"#
    )
}
