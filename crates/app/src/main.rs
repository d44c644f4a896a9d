//! Clearsight - Main Entry Point
//!
//! Loads configuration, installs logging and runs one subcommand.

mod cli;
mod commands;

use anyhow::{Context, Result};
use clap::Parser;
use clearsight_infrastructure::ClearsightConfig;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config =
        ClearsightConfig::load(cli.config.as_deref()).context("loading configuration")?;

    // RUST_LOG wins over the configured level; logs go to stderr
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let data_dir = cli.data_dir.clone().unwrap_or_else(|| config.data_dir.clone());
    let mut stdout = std::io::stdout().lock();
    commands::run(cli.command, &config, &data_dir, &mut stdout).await
}
