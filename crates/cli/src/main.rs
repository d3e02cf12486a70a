//! nyaa - command-line torrent search and download client.

mod commands;
mod render;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use nyaa_core::{load_config_or_default, validate_config};

#[derive(Parser)]
#[command(name = "nyaa")]
#[command(about = "Search and download torrents from nyaa-style indexers")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: commands::Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Default to warn so log lines do not interleave with the result tables;
    // RUST_LOG overrides as usual.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let config_path = std::env::var("NYAA_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config.toml"));

    debug!(path = %config_path.display(), "Loading configuration");
    let config = load_config_or_default(&config_path)
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;
    validate_config(&config).context("Configuration validation failed")?;

    commands::handle_command(cli.command, &config).await
}
