use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Environment variable naming the remote site list
pub const ENV_SITE_LIST_URL: &str = "SITE_LIST_URL";
/// Environment variable naming the notification sender
pub const ENV_SENDER: &str = "GMAIL_USER";
/// Environment variable holding the sender credential
pub const ENV_PASSWORD: &str = "GMAIL_PASS";
/// Environment variable naming the notification recipient
pub const ENV_RECIPIENT: &str = "RECIPIENT_EMAIL";

/// Loads the configuration from an optional TOML file and the process environment
///
/// Without a path every setting starts from its default. Environment
/// variables override values from the file. The result is validated once.
///
/// # Example
///
/// ```no_run
/// use site_pulse::config::load_config;
///
/// let config = load_config(None).unwrap();
/// println!("Checking every {}s", config.monitor.interval_secs);
/// ```
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let config = match path {
        Some(path) => parse_config_file(path)?,
        None => Config::default(),
    };

    let config = apply_env(config, |name| std::env::var(name).ok());

    validate(&config)?;

    Ok(config)
}

/// Reads and parses a TOML configuration file without validating it
pub fn parse_config_file(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

/// Overlays environment values onto a configuration
///
/// `lookup` resolves a variable name; empty values count as unset.
pub fn apply_env<F>(mut config: Config, lookup: F) -> Config
where
    F: Fn(&str) -> Option<String>,
{
    let read = |name: &str| {
        lookup(name)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    if let Some(url) = read(ENV_SITE_LIST_URL) {
        config.sites.list_url = Some(url);
    }
    if let Some(sender) = read(ENV_SENDER) {
        config.notify.sender = Some(sender);
    }
    if let Some(password) = read(ENV_PASSWORD) {
        config.notify.password = Some(password);
    }
    if let Some(recipient) = read(ENV_RECIPIENT) {
        config.notify.recipient = Some(recipient);
    }

    config
}

/// Computes a SHA-256 hash of the configuration file content
///
/// Logged at startup so a long-running monitor can be matched to the file it loaded.
pub fn compute_config_hash(path: &Path) -> Result<String, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    let result = hasher.finalize();
    Ok(hex::encode(result))
}

/// Loads a configuration and returns it with the file hash, if a file was given
pub fn load_config_with_hash(path: Option<&Path>) -> Result<(Config, Option<String>), ConfigError> {
    let config = load_config(path)?;
    let hash = path.map(compute_config_hash).transpose()?;
    Ok((config, hash))
}
