//! site-pulse: a periodic website status monitor
//!
//! This crate fetches a list of sites from a remote plaintext file, probes
//! each one with a bounded HTTP GET, appends the results to a status log and
//! mails a summary. The cycle repeats on a fixed interval.

pub mod checker;
pub mod config;
pub mod monitor;
pub mod report;
pub mod sites;

use thiserror::Error;

/// Main error type for site-pulse operations
///
/// Only setup can fail this way. Once the loop runs, network and delivery
/// failures are absorbed into the cycle's outcome.
#[derive(Debug, Error)]
pub enum MonitorError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Notification setup error: {0}")]
    Notify(#[from] report::NotifyError),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for site-pulse operations
pub type Result<T> = std::result::Result<T, MonitorError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use checker::{Outcome, SiteChecker, StatusResult};
pub use config::Config;
pub use monitor::{Clock, CycleSummary, Monitor, SystemClock};
pub use report::{Notifier, Reporter};
pub use sites::{Site, SiteListProvider};
