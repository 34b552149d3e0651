//! Monitor loop - fetch, check, report, sleep
//!
//! This module ties the components together. One cycle:
//! 1. fetches the site list
//! 2. probes every site
//! 3. appends the results to the status log and sends the report
//!
//! Cycles repeat after a fixed pause until the stop signal flips. There is
//! no catch-up: the pause always starts when the previous cycle ends.

mod clock;

pub use clock::{describe_interval, Clock, SystemClock};

use crate::checker::{SiteChecker, StatusResult};
use crate::config::Config;
use crate::report::{ReportOutcome, Reporter};
use crate::sites::SiteListProvider;
use crate::MonitorError;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

/// What one cycle did
#[derive(Debug)]
pub struct CycleSummary {
    /// Number of entries in the fetched site list
    pub sites_listed: usize,
    pub result: StatusResult,
    /// `None` when the cycle was skipped for lack of sites
    pub report: Option<ReportOutcome>,
}

impl CycleSummary {
    fn skipped() -> Self {
        Self {
            sites_listed: 0,
            result: StatusResult::new(),
            report: None,
        }
    }

    pub fn was_skipped(&self) -> bool {
        self.report.is_none()
    }
}

/// Main monitor structure
pub struct Monitor {
    provider: SiteListProvider,
    checker: SiteChecker,
    reporter: Reporter,
    clock: Arc<dyn Clock>,
    interval: Duration,
}

impl Monitor {
    /// Creates a monitor from a validated configuration
    pub fn from_config(config: &Config) -> Result<Self, MonitorError> {
        let provider = SiteListProvider::new(&config.sites, &config.monitor)?;
        let checker = SiteChecker::new(&config.monitor)?;
        let reporter = Reporter::from_config(config)?;

        Ok(Self::new(provider, checker, reporter)
            .with_interval(Duration::from_secs(config.monitor.interval_secs)))
    }

    /// Creates a monitor with the system clock and the default five minute interval
    pub fn new(provider: SiteListProvider, checker: SiteChecker, reporter: Reporter) -> Self {
        Self {
            provider,
            checker,
            reporter,
            clock: Arc::new(SystemClock),
            interval: Duration::from_secs(300),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Runs a single fetch, check and report pass
    pub async fn run_cycle(&self) -> CycleSummary {
        let sites = self.provider.fetch_sites().await;
        if sites.is_empty() {
            tracing::info!("No sites to check.");
            return CycleSummary::skipped();
        }

        tracing::info!("Checking {} sites", sites.len());
        let result = self.checker.check_all(&sites).await;

        let timestamp = self.clock.now();
        let report = self.reporter.report(&result, &timestamp).await;

        CycleSummary {
            sites_listed: sites.len(),
            result,
            report: Some(report),
        }
    }

    /// Runs cycles until `stop` turns true or `max_cycles` have completed
    ///
    /// The stop signal is honored between cycles and during the pause; a
    /// cycle already in flight runs to completion.
    ///
    /// # Returns
    ///
    /// The number of cycles that ran
    pub async fn run(&self, mut stop: watch::Receiver<bool>, max_cycles: Option<u64>) -> u64 {
        let mut cycles = 0;

        loop {
            if *stop.borrow() {
                tracing::info!("Stop requested, exiting monitor loop");
                break;
            }
            if max_cycles.is_some_and(|max| cycles >= max) {
                break;
            }

            let summary = self.run_cycle().await;
            cycles += 1;
            tracing::debug!(
                "Cycle {} finished: {} sites listed, skipped: {}",
                cycles,
                summary.sites_listed,
                summary.was_skipped()
            );

            // No pause after the last allowed cycle.
            if max_cycles.is_some_and(|max| cycles >= max) {
                break;
            }

            tracing::info!(
                "Waiting {} before next check...",
                describe_interval(self.interval)
            );
            if self.pause(&mut stop).await {
                tracing::info!("Stop requested during pause, exiting monitor loop");
                break;
            }
        }

        cycles
    }

    /// Sleeps for the interval; returns true if the stop signal fired first
    async fn pause(&self, stop: &mut watch::Receiver<bool>) -> bool {
        let mut sleep = self.clock.sleep(self.interval);

        loop {
            tokio::select! {
                _ = &mut sleep => return false,
                changed = stop.changed() => match changed {
                    Ok(()) if *stop.borrow() => return true,
                    Ok(()) => continue,
                    Err(_) => {
                        // Sender gone: nobody can stop us any more.
                        sleep.await;
                        return false;
                    }
                },
            }
        }
    }
}
