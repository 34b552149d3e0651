//! Site checking
//!
//! This module contains the per-cycle probing logic:
//! - building the probe HTTP client
//! - issuing one bounded GET per site
//! - collecting every outcome into a [`StatusResult`]

mod fetcher;
mod outcome;

pub use fetcher::{build_http_client, classify_error, probe_url, HttpProbe, Probe};
pub use outcome::{FailureKind, Outcome, ProbeFailure, SiteStatus, StatusResult};

use crate::config::MonitorConfig;
use crate::sites::Site;
use crate::MonitorError;
use std::time::Duration;

/// Checks a list of sites one after another
///
/// Every site gets exactly one attempt. A slow site delays the ones behind
/// it by up to the probe timeout; nothing is skipped or retried.
pub struct SiteChecker {
    probe: Box<dyn Probe>,
}

impl SiteChecker {
    /// Creates a checker that probes over HTTP with the configured timeout
    pub fn new(config: &MonitorConfig) -> Result<Self, MonitorError> {
        let client = build_http_client(config)?;
        let probe = HttpProbe::new(client, Duration::from_secs(config.probe_timeout_secs));
        Ok(Self::with_probe(Box::new(probe)))
    }

    pub fn with_probe(probe: Box<dyn Probe>) -> Self {
        Self { probe }
    }

    /// Probes a single site
    pub async fn probe(&self, site: &Site) -> Outcome {
        self.probe.probe(site).await
    }

    /// Probes every site in order and returns their outcomes
    ///
    /// A site listed twice is probed once and keeps its first position.
    pub async fn check_all(&self, sites: &[Site]) -> StatusResult {
        let mut result = StatusResult::new();

        for site in sites {
            if result.contains(site) {
                tracing::debug!("Skipping duplicate site {}", site);
                continue;
            }

            let outcome = self.probe(site).await;
            if let Outcome::Failure(failure) = &outcome {
                tracing::info!("{} unreachable ({}): {}", site, failure.kind, failure.message);
            }
            result.insert(site.clone(), outcome);
        }

        tracing::info!(
            "Checked {} sites, {} failed",
            result.len(),
            result.failure_count()
        );

        result
    }
}
