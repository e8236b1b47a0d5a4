// src/config/consts.rs

// Net config
pub const SEARCH_URL: &str = "https://gtr.ukri.org/api/projects";
pub const SEARCH_ACCEPT: &str = "application/vnd.rcuk.gtr.json-v7";
pub const DETAIL_URL: &str = "https://gtr.ukri.org/projects.json";
pub const USER_AGENT: &str = concat!("gtr_scrape/", env!("CARGO_PKG_VERSION"));
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

// Search
pub const DEFAULT_PAGE_SIZE: u32 = 100; // registry maximum
pub const IDENTIFIER_TYPE: &str = "RCUK";
pub const CLOSED_STATUS: &str = "closed";
pub const DEFAULT_GRANT_CATEGORY: &str = "Training Grant";

// Categories: (label, keyword set)
pub const CATEGORIES: [(&str, &[&str]); 2] = [
    ("CDT", &["Centre for Doctoral Training", "CDT"]),
    ("DTP", &["Doctoral Training Partnership", "DTP"]),
];

// Detail
pub const INVESTIGATOR_ROLES: [&str; 2] = ["TRAINING_GRANT_HOLDER", "PRINCIPAL_INVESTIGATOR"];

// Export
pub const DEFAULT_OUT_DIR: &str = ".";
pub const FILE_INFIX: &str = "_projects_";
pub const FILE_EXT: &str = "csv";
pub const CSV_SEP: char = ',';

// Concurrency
pub const DEFAULT_WORKERS: usize = 1; // sequential
pub const MAX_WORKERS: usize = 16;
