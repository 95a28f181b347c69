//! Motionflow CLI: command-line interface for sensor stream normalization.
//!
//! Usage:
//!   motionflow replay <PATH>             Replay a raw event recording, print snapshots
//!   motionflow check <PATH>              Report host capabilities for a recording
//!   motionflow normalize <AXIS> <VALUE>  Normalize a single value

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use motionflow_common::config::AppConfig;
use motionflow_common::error::PermissionCategory;

mod commands;

use commands::normalize::AxisArg;
use commands::ScreenArgs;

#[derive(Parser)]
#[command(
    name = "motionflow",
    about = "Orientation-aware motion sensor normalization",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a JSONL recording of raw events and print one snapshot per line
    Replay {
        /// Path to the recording
        path: PathBuf,

        #[command(flatten)]
        screen: ScreenArgs,

        /// Simulate a host that gates sensor access behind permissions
        #[arg(long)]
        gated: bool,

        /// Deny a permission category (motion|orientation); implies --gated
        #[arg(long)]
        deny: Vec<PermissionCategory>,
    },

    /// Check host capabilities for a recording
    Check {
        /// Path to the recording
        path: PathBuf,

        #[command(flatten)]
        screen: ScreenArgs,

        /// Treat the host as permission-gated
        #[arg(long)]
        gated: bool,
    },

    /// Normalize a single value and print it with two decimals
    Normalize {
        /// Bounding rule to apply
        #[arg(value_enum)]
        axis: AxisArg,

        /// Raw value; non-numeric input normalizes to 0
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let (mut config, config_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    // Initialize logging
    if cli.verbose {
        config.logging.level = "debug".to_string();
    }
    if cli.json_logs {
        config.logging.json = true;
    }
    motionflow_common::logging::init_logging(&config.logging);

    if let Some(e) = config_error {
        tracing::warn!(error = %e, "Ignoring unreadable config; using defaults");
    }

    match cli.command {
        Commands::Replay {
            path,
            screen,
            gated,
            deny,
        } => commands::replay::run(&config, path, screen, gated, deny).await,
        Commands::Check {
            path,
            screen,
            gated,
        } => commands::check::run(&config, path, screen, gated),
        Commands::Normalize { axis, value } => commands::normalize::run(axis, value),
    }
}
