//! SMTP delivery through lettre
//!
//! Reports go out as plain-text mail over a STARTTLS relay, authenticated
//! with the sender's credentials.

use crate::config::NotifyConfig;
use crate::report::traits::{NotifyError, Report};
use crate::report::Notifier;
use async_trait::async_trait;
use lettre::message::{header::ContentType, Mailbox, Message};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Tokio1Executor};
use std::time::Duration;

/// Sends reports as email to a single recipient
pub struct SmtpNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    to: Mailbox,
    relay: String,
}

impl SmtpNotifier {
    /// Builds a notifier from configuration
    ///
    /// # Returns
    ///
    /// * `Ok(None)` - Sender, password or recipient is missing; delivery is disabled
    /// * `Ok(Some(SmtpNotifier))` - Ready to send
    /// * `Err(NotifyError)` - An address does not parse or the relay is unusable
    pub fn from_config(config: &NotifyConfig) -> Result<Option<Self>, NotifyError> {
        let Some((sender, password, recipient)) = config.credentials() else {
            return Ok(None);
        };

        let from: Mailbox = sender.parse()?;
        let to: Mailbox = recipient.parse()?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
            .port(config.smtp_port)
            .credentials(Credentials::new(sender.to_string(), password.to_string()))
            .timeout(Some(Duration::from_secs(config.timeout_secs)))
            .build();

        Ok(Some(Self {
            transport,
            from,
            to,
            relay: format!("{}:{}", config.smtp_host, config.smtp_port),
        }))
    }

    pub fn relay(&self) -> &str {
        &self.relay
    }

    /// Assembles the outgoing message for a report
    pub fn build_message(&self, report: &Report) -> Result<Message, NotifyError> {
        let message = Message::builder()
            .from(self.from.clone())
            .to(self.to.clone())
            .subject(report.subject.clone())
            .header(ContentType::TEXT_PLAIN)
            .body(report.body.clone())?;
        Ok(message)
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    fn name(&self) -> &str {
        "smtp"
    }

    async fn notify(&self, report: &Report) -> Result<(), NotifyError> {
        let message = self.build_message(report)?;
        self.transport.send(message).await?;
        Ok(())
    }
}
