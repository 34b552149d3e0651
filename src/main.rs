//! site-pulse main entry point
//!
//! This is the command-line interface for the site-pulse status monitor.

use anyhow::Context;
use clap::Parser;
use site_pulse::config::{load_config_with_hash, Config};
use site_pulse::monitor::describe_interval;
use site_pulse::Monitor;
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::watch;
use tracing_subscriber::EnvFilter;

/// site-pulse: periodic website status monitor
///
/// Fetches the site list named by SITE_LIST_URL, checks every site, appends
/// the results to a status log and emails a report using GMAIL_USER,
/// GMAIL_PASS and RECIPIENT_EMAIL. Repeats until interrupted.
#[derive(Parser, Debug)]
#[command(name = "site-pulse")]
#[command(version)]
#[command(about = "Periodic website status monitor", long_about = None)]
struct Cli {
    /// Optional TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Run a single cycle and exit
    #[arg(long, conflicts_with = "dry_run")]
    once: bool,

    /// Validate configuration, print the effective settings and exit
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let (config, config_hash) =
        load_config_with_hash(cli.config.as_deref()).context("Failed to load configuration")?;
    match (&cli.config, config_hash) {
        (Some(path), Some(hash)) => {
            tracing::info!("Configuration loaded from {} (hash: {})", path.display(), hash)
        }
        _ => tracing::info!("Configuration loaded from defaults and environment"),
    }

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    handle_monitor(config, cli.once).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("site_pulse=info,warn"),
            1 => EnvFilter::new("site_pulse=debug,info"),
            2 => EnvFilter::new("site_pulse=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: shows what the monitor would do
fn handle_dry_run(config: &Config) {
    println!("=== site-pulse Dry Run ===\n");

    println!("Monitor:");
    println!(
        "  Interval: {}",
        describe_interval(Duration::from_secs(config.monitor.interval_secs))
    );
    println!("  Probe timeout: {}s", config.monitor.probe_timeout_secs);
    println!("  List fetch timeout: {}s", config.monitor.fetch_timeout_secs);
    println!("  User agent: {}", config.monitor.user_agent);

    println!("\nSite list:");
    match &config.sites.list_url {
        Some(url) => println!("  {}", url),
        None => println!("  (not set, every cycle will be skipped)"),
    }

    println!("\nStatus log:");
    println!("  {}", config.output.log_path);

    println!("\nNotification:");
    println!(
        "  Relay: {}:{}",
        config.notify.smtp_host, config.notify.smtp_port
    );
    println!("  Subject: {}", config.notify.subject);
    println!("  Sender: {}", config.notify.sender.as_deref().unwrap_or("(not set)"));
    println!(
        "  Password: {}",
        if config.notify.password.is_some() {
            "********"
        } else {
            "(not set)"
        }
    );
    println!(
        "  Recipient: {}",
        config.notify.recipient.as_deref().unwrap_or("(not set)")
    );

    println!("\n✓ Configuration is valid");
    if config.notify.credentials().is_none() {
        println!("! Email reports are disabled until all mail settings are present");
    }
}

/// Handles the main monitoring loop
async fn handle_monitor(config: Config, once: bool) -> anyhow::Result<()> {
    let monitor = Monitor::from_config(&config).context("Failed to initialize monitor")?;

    let (stop_tx, stop_rx) = watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Interrupt received, stopping after the current cycle");
            let _ = stop_tx.send(true);
        }
    });

    let max_cycles = if once { Some(1) } else { None };
    tracing::info!(
        "Starting monitor (interval: {})",
        describe_interval(monitor.interval())
    );

    let cycles = monitor.run(stop_rx, max_cycles).await;
    tracing::info!("Monitor stopped after {} cycles", cycles);

    Ok(())
}
