//! Probe outcomes and the per-cycle status mapping

use crate::sites::Site;
use std::collections::HashMap;
use std::fmt;

/// Why a probe could not produce a status code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// No response within the probe timeout
    Timeout,
    /// DNS failure, refused or reset connection, TLS handshake failure
    Connect,
    /// The site string is not a usable URL
    InvalidUrl,
    /// Redirect loop or too many redirects
    Redirect,
    /// The request failed after the connection was set up
    Request,
    /// The response body could not be read
    Body,
    Other,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::Timeout => "timeout",
            FailureKind::Connect => "connect",
            FailureKind::InvalidUrl => "invalid_url",
            FailureKind::Redirect => "redirect",
            FailureKind::Request => "request",
            FailureKind::Body => "body",
            FailureKind::Other => "other",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A probe that did not complete
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeFailure {
    pub kind: FailureKind,
    pub message: String,
}

impl ProbeFailure {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Result of probing a single site
///
/// Status codes are kept verbatim; a 503 is a `Status`, not a failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Status(u16),
    Failure(ProbeFailure),
}

impl Outcome {
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Outcome::Status(code) => Some(*code),
            Outcome::Failure(_) => None,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::Failure(_))
    }
}

/// Renders as the bare status code or `Error: <message>`
impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Status(code) => write!(f, "{}", code),
            Outcome::Failure(failure) => write!(f, "Error: {}", failure.message),
        }
    }
}

/// One entry of a [`StatusResult`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteStatus {
    pub site: Site,
    pub outcome: Outcome,
}

/// Outcome of every site checked in one cycle
///
/// Each site appears once. Iteration follows first insertion.
#[derive(Debug, Clone, Default)]
pub struct StatusResult {
    entries: Vec<SiteStatus>,
    index: HashMap<Site, usize>,
}

impl StatusResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an outcome; returns false and keeps the existing entry if the site is already present
    pub fn insert(&mut self, site: Site, outcome: Outcome) -> bool {
        if self.index.contains_key(&site) {
            return false;
        }
        self.index.insert(site.clone(), self.entries.len());
        self.entries.push(SiteStatus { site, outcome });
        true
    }

    pub fn contains(&self, site: &Site) -> bool {
        self.index.contains_key(site)
    }

    pub fn get(&self, site: &Site) -> Option<&Outcome> {
        self.index.get(site).map(|&i| &self.entries[i].outcome)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SiteStatus> {
        self.entries.iter()
    }

    pub fn failure_count(&self) -> usize {
        self.entries.iter().filter(|e| e.outcome.is_failure()).count()
    }
}

impl<'a> IntoIterator for &'a StatusResult {
    type Item = &'a SiteStatus;
    type IntoIter = std::slice::Iter<'a, SiteStatus>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
