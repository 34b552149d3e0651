use serde::Deserialize;

/// Main configuration structure for site-pulse
///
/// Every section is optional in the TOML file; the environment fills in the
/// site list location and the mail credentials afterwards.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub monitor: MonitorConfig,
    pub sites: SitesConfig,
    pub output: OutputConfig,
    pub notify: NotifyConfig,
}

/// Polling loop and probe behavior
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// Pause between the end of one cycle and the start of the next (seconds)
    #[serde(rename = "interval-secs")]
    pub interval_secs: u64,

    /// Timeout for each site probe (seconds)
    #[serde(rename = "probe-timeout-secs")]
    pub probe_timeout_secs: u64,

    /// Timeout for fetching the site list (seconds)
    #[serde(rename = "fetch-timeout-secs")]
    pub fetch_timeout_secs: u64,

    /// User-Agent header sent with every request
    #[serde(rename = "user-agent")]
    pub user_agent: String,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            interval_secs: 300,
            probe_timeout_secs: 10,
            fetch_timeout_secs: 30,
            user_agent: format!("site-pulse/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Where the site list comes from
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SitesConfig {
    /// URL of the plaintext site list (`SITE_LIST_URL`)
    #[serde(rename = "list-url")]
    pub list_url: Option<String>,
}

/// Status log configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path to the append-only status log
    #[serde(rename = "log-path")]
    pub log_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            log_path: "site_status.log".to_string(),
        }
    }
}

/// Email notification configuration
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct NotifyConfig {
    #[serde(rename = "smtp-host")]
    pub smtp_host: String,

    #[serde(rename = "smtp-port")]
    pub smtp_port: u16,

    /// Subject line of every report
    pub subject: String,

    /// SMTP connection and send timeout (seconds)
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// Sender address (`GMAIL_USER`)
    pub sender: Option<String>,

    /// Sender credential (`GMAIL_PASS`)
    pub password: Option<String>,

    /// Report recipient (`RECIPIENT_EMAIL`)
    pub recipient: Option<String>,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            smtp_host: "smtp.gmail.com".to_string(),
            smtp_port: 587,
            subject: "Website Status Report".to_string(),
            timeout_secs: 30,
            sender: None,
            password: None,
            recipient: None,
        }
    }
}

impl NotifyConfig {
    /// Returns sender, password and recipient when all three are present
    pub fn credentials(&self) -> Option<(&str, &str, &str)> {
        match (&self.sender, &self.password, &self.recipient) {
            (Some(sender), Some(password), Some(recipient)) => {
                Some((sender.as_str(), password.as_str(), recipient.as_str()))
            }
            _ => None,
        }
    }
}

// Hand-written so the password never lands in a log line.
impl std::fmt::Debug for NotifyConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotifyConfig")
            .field("smtp_host", &self.smtp_host)
            .field("smtp_port", &self.smtp_port)
            .field("subject", &self.subject)
            .field("timeout_secs", &self.timeout_secs)
            .field("sender", &self.sender)
            .field("password", &self.password.as_ref().map(|_| "********"))
            .field("recipient", &self.recipient)
            .finish()
    }
}
