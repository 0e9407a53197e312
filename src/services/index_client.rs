//! HTTP client for the learned-index service.
//!
//! The service exposes two resources:
//! - `GET /benchmark` — live benchmark statistics
//! - `GET /?search=<key>` — point lookup of a single key

use std::future::Future;

use reqwest::Url;
use serde::de::DeserializeOwned;

use crate::config::DashboardConfig;
use crate::errors::ClientError;
use crate::models::{BenchmarkStats, SearchResult};

/// The two operations the dashboard needs from the index service.
pub trait IndexService: Send + Sync + 'static {
    /// Fetch the current benchmark statistics.
    fn fetch_benchmark(&self) -> impl Future<Output = Result<BenchmarkStats, ClientError>> + Send;

    /// Look up a single key.
    fn search(&self, key: &str) -> impl Future<Output = Result<SearchResult, ClientError>> + Send;
}

/// `IndexService` backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpIndexClient {
    http: reqwest::Client,
    base_url: Url,
}

impl HttpIndexClient {
    /// Build a client for `config.base_url` with the configured request timeout.
    pub fn new(config: &DashboardConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        let mut base_url = config.base_url.clone();
        // Relative joins replace the last segment unless the path is a directory.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        base_url.set_query(None);
        base_url.set_fragment(None);

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// URL of the stats endpoint.
    pub fn benchmark_url(&self) -> Result<Url, ClientError> {
        self.base_url
            .join("benchmark")
            .map_err(|e| ClientError::InvalidUrl(e.to_string()))
    }

    /// URL of the query endpoint with `key` percent-encoded as the `search` parameter.
    pub fn search_url(&self, key: &str) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut().append_pair("search", key);
        url
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ClientError> {
        let response = self.http.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

impl IndexService for HttpIndexClient {
    async fn fetch_benchmark(&self) -> Result<BenchmarkStats, ClientError> {
        let url = self.benchmark_url()?;
        self.get_json(url).await
    }

    async fn search(&self, key: &str) -> Result<SearchResult, ClientError> {
        let url = self.search_url(key);
        tracing::debug!(%url, "Issuing index lookup");
        self.get_json(url).await
    }
}
