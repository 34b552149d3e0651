//! Notifier trait and report types
//!
//! This module defines the delivery interface used by the [`Reporter`]
//! together with the message it delivers and the errors both sides raise.
//!
//! [`Reporter`]: crate::report::Reporter

use crate::checker::StatusResult;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur while writing the status log
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Failed to write status log {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
}

/// Result type for status log operations
pub type ReportResult<T> = Result<T, ReportError>;

/// Errors that can occur while delivering a report
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("Invalid email address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("Failed to build message: {0}")]
    Message(#[from] lettre::error::Error),

    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    #[error("Notification failed: {0}")]
    Other(String),
}

/// A rendered status report, ready for delivery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub subject: String,
    pub body: String,
}

impl Report {
    /// Renders one `<site>: <outcome>` line per entry, in result order
    pub fn from_status(subject: impl Into<String>, result: &StatusResult) -> Self {
        let body = result
            .iter()
            .map(|entry| format!("{}: {}", entry.site, entry.outcome))
            .collect::<Vec<_>>()
            .join("\n");

        Self {
            subject: subject.into(),
            body,
        }
    }
}

/// Delivery channel for status reports
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Short name used in log lines
    fn name(&self) -> &str;

    /// Delivers one report
    ///
    /// # Arguments
    ///
    /// * `report` - The rendered report
    async fn notify(&self, report: &Report) -> Result<(), NotifyError>;
}

#[async_trait]
impl<N: Notifier + ?Sized> Notifier for Arc<N> {
    fn name(&self) -> &str {
        (**self).name()
    }

    async fn notify(&self, report: &Report) -> Result<(), NotifyError> {
        (**self).notify(report).await
    }
}
