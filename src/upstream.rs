//! Remote analytics backend client
//!
//! Thin reqwest wrapper shared by the chart and overview services. Calls are
//! best-effort: callers absorb every error and substitute fallback data, so
//! there is no retry policy here.

use crate::config::UpstreamConfig;
use crate::error::{Error, Result};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

/// Where the data in a response came from.
///
/// Upstream failures are absorbed and replaced with fallback data; this tag
/// is the caller's only way to tell the two apart without reading logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    Live,
    Fallback,
}

/// HTTP client for the analytics backend
#[derive(Clone)]
pub struct UpstreamClient {
    base_url: Option<String>,
    client: reqwest::Client,
    timeout: Duration,
}

impl UpstreamClient {
    /// Create a client from configuration
    pub fn new(config: &UpstreamConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            client: reqwest::Client::new(),
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }

    /// Whether a backend base URL is configured
    pub fn configured(&self) -> bool {
        self.base_url.is_some()
    }

    /// GET a JSON document from the backend
    pub async fn get_json(&self, path: &str, query: &[(&str, &str)]) -> Result<Value> {
        let base = self
            .base_url
            .as_deref()
            .ok_or_else(|| Error::Upstream("no backend base URL configured".to_string()))?;

        let url = format!("{}{}", base.trim_end_matches('/'), path);
        let response = self
            .client
            .get(&url)
            .query(query)
            .timeout(self.timeout)
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json().await?)
    }
}
