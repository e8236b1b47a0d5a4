// src/core/net.rs
// Blocking HTTP GET against the registry, behind a small trait so the
// pipeline can run against canned payloads.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::ACCEPT;

use crate::config::consts::USER_AGENT;
use crate::error::{Error, FetchError};

/// Anything that can answer a GET with a response body.
///
/// `Sync` so detail requests can fan out over scoped worker threads.
pub trait JsonSource: Sync {
    /// GET `url`, optionally with an `Accept` header. Non-2xx is an error.
    fn get(&self, url: &str, accept: Option<&str>) -> Result<String, FetchError>;
}

pub struct HttpSource {
    client: Client,
}

impl HttpSource {
    /// `timeout` covers the whole request, connect through body.
    pub fn new(timeout: Duration) -> Result<Self, Error> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(Error::Client)?;
        Ok(Self { client })
    }
}

impl JsonSource for HttpSource {
    fn get(&self, url: &str, accept: Option<&str>) -> Result<String, FetchError> {
        let mut req = self.client.get(url);
        if let Some(accept) = accept {
            req = req.header(ACCEPT, accept);
        }

        let network = |e: reqwest::Error| FetchError::Network {
            url: s!(url),
            source: Box::new(e),
        };

        let resp = req.send().map_err(network)?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status { url: s!(url), status: status.as_u16() });
        }
        resp.text().map_err(network)
    }
}
