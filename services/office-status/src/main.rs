//! Office status notifier CLI
//!
//! Command-line interface for the office status webhook notifier.

use std::path::PathBuf;

use clap::Parser;
use office_status::{load_config, RunMode};
use tracing::Level;

#[derive(Parser)]
#[command(name = "office-status")]
#[command(about = "Announces office open/closed changes to a chat webhook")]
#[command(version)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "office-status.json")]
    config: PathBuf,

    /// Run a single poll and exit (for cron or systemd timers)
    #[arg(long)]
    once: bool,

    /// Log level
    #[arg(short, long, default_value = "info")]
    log_level: Level,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .init();

    tracing::debug!(
        "Parsed command line arguments: config={:?}, once={}, log_level={:?}",
        args.config,
        args.once,
        args.log_level
    );

    tracing::debug!("Loading configuration from {:?}", args.config);
    let mut config = load_config(&args.config)?;
    config.apply_env_overrides()?;

    tracing::info!("Starting office status notifier");
    tracing::debug!(
        "Endpoint: {}, interval: {}s, webhook: {:?}",
        config.status_endpoint_url,
        config.poll_interval_seconds,
        config.webhook_kind
    );

    let mode = if args.once {
        RunMode::Once
    } else {
        RunMode::Continuous
    };
    office_status::run(config, mode).await?;

    Ok(())
}
