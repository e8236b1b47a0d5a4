// src/error.rs
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Transport-level cause, kept for the report chain.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// One failed request against the registry.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("network error for {url}: {source}")]
    Network {
        url: String,
        #[source]
        source: BoxError,
    },

    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("unparsable response from {url}: {source}")]
    Parse {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl FetchError {
    pub fn url(&self) -> &str {
        match self {
            FetchError::Network { url, .. }
            | FetchError::Status { url, .. }
            | FetchError::Parse { url, .. } => url,
        }
    }

    /// Short category name used in log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Network { .. } => "network",
            FetchError::Status { .. } => "status",
            FetchError::Parse { .. } => "parse",
        }
    }
}

#[derive(Debug, Error)]
#[error("failed to write {}: {source}", path.display())]
pub struct ExportError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

/// Errors that end a run.
#[derive(Debug, Error)]
pub enum Error {
    #[error("search for {category} failed on the first page: {source}")]
    Search {
        category: String,
        #[source]
        source: FetchError,
    },

    #[error("could not build HTTP client")]
    Client(#[source] reqwest::Error),

    #[error("invalid configuration: {0}")]
    Config(String),
}
