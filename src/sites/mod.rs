//! Site list retrieval
//!
//! The list of monitored sites lives in a remote plaintext resource, one URL
//! per line. It is fetched fresh at the start of every cycle; a failed fetch
//! yields an empty list and the cycle is skipped.

use crate::config::{MonitorConfig, SitesConfig, ENV_SITE_LIST_URL};
use crate::MonitorError;
use reqwest::Client;
use std::fmt;
use std::time::Duration;

/// One monitored URL, kept exactly as it appeared in the list
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Site(String);

impl Site {
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Site {
    fn from(url: &str) -> Self {
        Self::new(url)
    }
}

impl From<String> for Site {
    fn from(url: String) -> Self {
        Self(url)
    }
}

/// Splits a plaintext site list into sites
///
/// Lines are trimmed and blank lines dropped. No other validation happens;
/// a malformed URL surfaces later as a probe failure.
pub fn parse_site_list(text: &str) -> Vec<Site> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(Site::from)
        .collect()
}

/// Fetches the current site list from the configured location
pub struct SiteListProvider {
    client: Client,
    list_url: Option<String>,
}

impl SiteListProvider {
    /// Creates a provider with its own HTTP client
    ///
    /// The client carries the fetch timeout so a stalled list server cannot
    /// hang the loop.
    pub fn new(sites: &SitesConfig, monitor: &MonitorConfig) -> Result<Self, MonitorError> {
        let client = Client::builder()
            .user_agent(monitor.user_agent.clone())
            .timeout(Duration::from_secs(monitor.fetch_timeout_secs))
            .build()?;

        Ok(Self::with_client(client, sites.list_url.clone()))
    }

    pub fn with_client(client: Client, list_url: Option<String>) -> Self {
        Self { client, list_url }
    }

    pub fn list_url(&self) -> Option<&str> {
        self.list_url.as_deref()
    }

    /// Returns the sites for this cycle, or an empty list on any failure
    pub async fn fetch_sites(&self) -> Vec<Site> {
        let Some(url) = self.list_url.as_deref() else {
            tracing::warn!("{} environment variable is not set.", ENV_SITE_LIST_URL);
            return Vec::new();
        };

        match self.fetch_list_text(url).await {
            Ok(text) => {
                let sites = parse_site_list(&text);
                tracing::debug!("Fetched {} sites from {}", sites.len(), url);
                sites
            }
            Err(e) => {
                tracing::error!("Error fetching site list: {}", e);
                Vec::new()
            }
        }
    }

    async fn fetch_list_text(&self, url: &str) -> Result<String, reqwest::Error> {
        self.client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await
    }
}
