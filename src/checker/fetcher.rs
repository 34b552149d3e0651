//! HTTP probe implementation
//!
//! This module issues the single GET request made against each site and
//! turns whatever happens into an [`Outcome`]:
//! - any HTTP response becomes `Outcome::Status` with the code as returned
//! - any client error becomes `Outcome::Failure` with a classified kind

use crate::checker::outcome::{FailureKind, Outcome, ProbeFailure};
use crate::config::MonitorConfig;
use crate::sites::Site;
use async_trait::async_trait;
use reqwest::{redirect::Policy, Client};
use std::error::Error as _;
use std::time::{Duration, Instant};

/// Maximum redirect hops followed before a probe fails
const MAX_REDIRECTS: usize = 10;

/// Something that can check one site
///
/// `SiteChecker` drives implementations strictly one site at a time.
#[async_trait]
pub trait Probe: Send + Sync {
    async fn probe(&self, site: &Site) -> Outcome;
}

#[async_trait]
impl<P: Probe + ?Sized> Probe for std::sync::Arc<P> {
    async fn probe(&self, site: &Site) -> Outcome {
        (**self).probe(site).await
    }
}

/// Builds the HTTP client used for probes
///
/// # Example
///
/// ```no_run
/// use site_pulse::config::MonitorConfig;
/// use site_pulse::checker::build_http_client;
///
/// let client = build_http_client(&MonitorConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &MonitorConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .connect_timeout(Duration::from_secs(config.probe_timeout_secs))
        .redirect(Policy::limited(MAX_REDIRECTS))
        .build()
}

/// Probes sites with a plain GET and a per-request timeout
#[derive(Debug, Clone)]
pub struct HttpProbe {
    client: Client,
    timeout: Duration,
}

impl HttpProbe {
    pub fn new(client: Client, timeout: Duration) -> Self {
        Self { client, timeout }
    }
}

#[async_trait]
impl Probe for HttpProbe {
    async fn probe(&self, site: &Site) -> Outcome {
        probe_url(&self.client, site.as_str(), self.timeout).await
    }
}

/// Sends one GET request and records the status code or the failure
///
/// The body is never read; the status line is all that is recorded.
pub async fn probe_url(client: &Client, url: &str, timeout: Duration) -> Outcome {
    let started = Instant::now();

    let outcome = match client.get(url).timeout(timeout).send().await {
        Ok(response) => Outcome::Status(response.status().as_u16()),
        Err(e) => Outcome::Failure(ProbeFailure::new(classify_error(&e), describe_error(&e))),
    };

    tracing::debug!(
        "Probed {} -> {} in {}ms",
        url,
        outcome,
        started.elapsed().as_millis()
    );

    outcome
}

/// Maps a client error onto a failure category
pub fn classify_error(error: &reqwest::Error) -> FailureKind {
    if error.is_timeout() {
        FailureKind::Timeout
    } else if error.is_builder() {
        FailureKind::InvalidUrl
    } else if error.is_redirect() {
        FailureKind::Redirect
    } else if error.is_connect() {
        FailureKind::Connect
    } else if error.is_body() || error.is_decode() {
        FailureKind::Body
    } else if error.is_request() {
        FailureKind::Request
    } else {
        FailureKind::Other
    }
}

/// Flattens an error and its sources into one line
fn describe_error(error: &reqwest::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();

    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !message.contains(&cause_text) {
            message.push_str(": ");
            message.push_str(&cause_text);
        }
        source = cause.source();
    }

    message
}
