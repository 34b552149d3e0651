//! Configuration module for site-pulse
//!
//! Settings come from an optional TOML file, then the process environment
//! (`SITE_LIST_URL`, `GMAIL_USER`, `GMAIL_PASS`, `RECIPIENT_EMAIL`) is laid
//! over them. The merged result is validated once at startup and handed to
//! each component's constructor.
//!
//! # Example
//!
//! ```no_run
//! use site_pulse::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Some(Path::new("site-pulse.toml"))).unwrap();
//! println!("Status log: {}", config.output.log_path);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, MonitorConfig, NotifyConfig, OutputConfig, SitesConfig};

// Re-export parser functions
pub use parser::{
    apply_env, compute_config_hash, load_config, load_config_with_hash, parse_config_file,
    ENV_PASSWORD, ENV_RECIPIENT, ENV_SENDER, ENV_SITE_LIST_URL,
};
pub use validation::validate;
