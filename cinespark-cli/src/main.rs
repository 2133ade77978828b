//! CineSpark CLI - Command-line interface
//!
//! Browse, search and save movies from the terminal.

mod app;
mod commands;
mod render;

use std::path::PathBuf;

use anyhow::anyhow;
use cinespark_core::tracing_setup::{CliLogLevel, init_tracing};
use cinespark_core::{CinesparkConfig, RuntimeMode};
use clap::Parser;

/// Main CLI structure for CineSpark.
#[derive(Parser)]
#[command(name = "cinespark")]
#[command(about = "Discover movies, watch trailers and keep a list of favorites")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: commands::Commands,

    /// Console log level
    #[arg(long, value_enum, default_value_t = CliLogLevel::default(), global = true)]
    log_level: CliLogLevel,

    /// Use the offline demo catalog instead of TMDB
    #[arg(long, global = true)]
    demo: bool,

    /// Directory holding favorites, theme and logs
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = CinesparkConfig::from_env();
    if cli.demo {
        config.mode = RuntimeMode::Development;
    }
    if let Some(data_dir) = cli.data_dir {
        config.storage.data_dir = data_dir;
    }

    let logs_dir = config.storage.data_dir.join("logs");
    init_tracing(cli.log_level.as_tracing_level(), Some(logs_dir.as_path()))
        .map_err(|e| anyhow!("Failed to initialize logging: {e}"))?;

    config.validate().map_err(|e| anyhow!(e.user_message()))?;
    tracing::debug!(mode = %config.mode, data_dir = %config.storage.data_dir.display(), "Starting");

    let mut app = app::App::new(&config).map_err(|e| anyhow!(e.user_message()))?;
    commands::handle_command(&mut app, cli.command).await
}
