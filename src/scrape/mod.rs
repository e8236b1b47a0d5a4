// src/scrape/mod.rs
mod enrich;
mod search;

pub use enrich::{detail_url, enrich_projects, fetch_detail, Enrichment};
pub use search::{build_query, collect_projects, fetch_page, page_url};
