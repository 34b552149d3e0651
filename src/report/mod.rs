//! Reporting of cycle results
//!
//! A finished [`StatusResult`] goes two places:
//! - the append-only status log on disk
//! - a notification channel (email by default)
//!
//! The two are independent. A log write failure does not hold back the
//! notification and a failed delivery does not undo the log lines.

mod smtp;
mod status_log;
mod traits;

pub use smtp::SmtpNotifier;
pub use status_log::{format_log_line, StatusLog, TIMESTAMP_FORMAT};
pub use traits::{Notifier, NotifyError, Report, ReportError, ReportResult};

use crate::checker::StatusResult;
use crate::config::Config;
use crate::MonitorError;
use chrono::NaiveDateTime;

/// What happened to the notification for one cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    Sent,
    /// No notifier is configured
    Skipped,
    Failed(String),
}

/// Result of reporting one cycle
#[derive(Debug)]
pub struct ReportOutcome {
    /// Lines appended to the status log, or why that failed
    pub persisted: ReportResult<usize>,
    pub delivery: Delivery,
}

/// Persists and forwards status results
pub struct Reporter {
    log: StatusLog,
    notifier: Option<Box<dyn Notifier>>,
    subject: String,
}

impl Reporter {
    /// Builds the reporter described by the configuration
    ///
    /// Email delivery is only wired up when sender, password and recipient
    /// are all present.
    pub fn from_config(config: &Config) -> Result<Self, MonitorError> {
        let log = StatusLog::new(&config.output.log_path);

        let notifier: Option<Box<dyn Notifier>> = match SmtpNotifier::from_config(&config.notify)? {
            Some(smtp) => {
                tracing::info!("Email reports will be sent via {}", smtp.relay());
                Some(Box::new(smtp))
            }
            None => {
                tracing::warn!("Email reports disabled: GMAIL_USER, GMAIL_PASS and RECIPIENT_EMAIL must all be set");
                None
            }
        };

        Ok(Self::new(log, notifier, config.notify.subject.clone()))
    }

    pub fn new(
        log: StatusLog,
        notifier: Option<Box<dyn Notifier>>,
        subject: impl Into<String>,
    ) -> Self {
        Self {
            log,
            notifier,
            subject: subject.into(),
        }
    }

    pub fn status_log(&self) -> &StatusLog {
        &self.log
    }

    pub fn has_notifier(&self) -> bool {
        self.notifier.is_some()
    }

    /// Writes the log lines, then sends the notification
    ///
    /// Both steps always run; errors are logged and returned in the outcome.
    pub async fn report(&self, result: &StatusResult, timestamp: &NaiveDateTime) -> ReportOutcome {
        let persisted = self.log.append(result, timestamp);
        if let Err(e) = &persisted {
            tracing::error!("{}", e);
        }

        let delivery = self.deliver(result).await;

        ReportOutcome {
            persisted,
            delivery,
        }
    }

    async fn deliver(&self, result: &StatusResult) -> Delivery {
        let Some(notifier) = &self.notifier else {
            tracing::warn!("Missing environment variables for email.");
            return Delivery::Skipped;
        };

        let report = Report::from_status(self.subject.clone(), result);

        match notifier.notify(&report).await {
            Ok(()) => {
                tracing::info!("Email sent successfully.");
                Delivery::Sent
            }
            Err(e) => {
                tracing::error!("Error sending {} notification: {}", notifier.name(), e);
                Delivery::Failed(e.to_string())
            }
        }
    }
}
