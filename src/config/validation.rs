use crate::config::types::{Config, MonitorConfig, NotifyConfig, OutputConfig, SitesConfig};
use crate::ConfigError;
use lettre::message::Mailbox;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_monitor_config(&config.monitor)?;
    validate_sites_config(&config.sites)?;
    validate_output_config(&config.output)?;
    validate_notify_config(&config.notify)?;
    Ok(())
}

/// Validates polling and timeout settings
fn validate_monitor_config(config: &MonitorConfig) -> Result<(), ConfigError> {
    if config.interval_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "interval-secs must be >= 1, got {}",
            config.interval_secs
        )));
    }

    if config.probe_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "probe-timeout-secs must be >= 1, got {}",
            config.probe_timeout_secs
        )));
    }

    if config.fetch_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "fetch-timeout-secs must be >= 1, got {}",
            config.fetch_timeout_secs
        )));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates the site list location, when one is configured
fn validate_sites_config(config: &SitesConfig) -> Result<(), ConfigError> {
    let Some(list_url) = &config.list_url else {
        return Ok(());
    };

    let url = Url::parse(list_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid site list URL '{}': {}", list_url, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "Site list URL '{}' must use http or https",
            list_url
        )));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.log_path.is_empty() {
        return Err(ConfigError::Validation(
            "log-path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates notification settings
///
/// Missing sender, password or recipient is not an error here; it only
/// disables delivery. Values that are present must look sane.
fn validate_notify_config(config: &NotifyConfig) -> Result<(), ConfigError> {
    if config.smtp_host.trim().is_empty() {
        return Err(ConfigError::Validation(
            "smtp-host cannot be empty".to_string(),
        ));
    }

    if config.smtp_port == 0 {
        return Err(ConfigError::Validation(
            "smtp-port must be non-zero".to_string(),
        ));
    }

    if config.subject.trim().is_empty() {
        return Err(ConfigError::Validation(
            "subject cannot be empty".to_string(),
        ));
    }

    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "notify timeout-secs must be >= 1, got {}",
            config.timeout_secs
        )));
    }

    if let Some(sender) = &config.sender {
        validate_email(sender)?;
    }

    if let Some(recipient) = &config.recipient {
        validate_email(recipient)?;
    }

    Ok(())
}

/// Checks an address with the same parser the mail transport uses
fn validate_email(email: &str) -> Result<(), ConfigError> {
    let mailbox: Mailbox = email.parse().map_err(|e| {
        ConfigError::Validation(format!("Invalid email address '{}': {}", email, e))
    })?;

    if !mailbox.email.domain().contains('.') {
        return Err(ConfigError::Validation(format!(
            "Invalid email domain: '{}'",
            email
        )));
    }

    Ok(())
}
