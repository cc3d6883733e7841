//! Folio CLI.
//!
//! Replays JSON-lines event logs through the book/author reducers.
//!
//! # Quick Start
//!
//! ```bash
//! # One event per line: {"type": TAG, "payload": {...}}
//! folio replay events.jsonl
//!
//! # Print the state after every event
//! folio replay --trace events.jsonl
//!
//! # Read from stdin, show tables
//! cat events.jsonl | folio replay --format table
//! ```

mod commands;
mod style;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use folio_config::FolioConfig;
use tracing_subscriber::EnvFilter;

/// Folio - replay events through composed reducers.
#[derive(Parser)]
#[command(name = "folio")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Project directory holding folio.toml.
    #[arg(long, global = true, default_value = ".")]
    dir: PathBuf,

    /// Disable colored output.
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show version information.
    Version,

    /// Replay a JSON-lines event log and print the resulting state.
    Replay {
        /// Event log path, or '-' for stdin.
        #[arg(default_value = "-")]
        input: String,

        /// Print the state after every event instead of only the final one.
        #[arg(long)]
        trace: bool,

        /// Output format.
        #[arg(short, long, value_enum, default_value_t = StateFormat::Json)]
        format: StateFormat,

        /// Pretty-print JSON output.
        #[arg(long)]
        pretty: bool,
    },

    /// Show the effective configuration.
    Config {
        /// Output format.
        #[arg(short, long, value_enum, default_value_t = ConfigFormat::Toml)]
        format: ConfigFormat,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StateFormat {
    Json,
    Table,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ConfigFormat {
    Toml,
    Json,
}

fn init_logging(config: &FolioConfig, no_color: bool) {
    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.logging.level.to_ascii_lowercase()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(!no_color)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    style::set_no_color(cli.no_color);

    if let Commands::Version = cli.command {
        commands::version::run();
        return Ok(());
    }

    let config = FolioConfig::load_from_dir(&cli.dir)
        .with_context(|| format!("Failed to load configuration from {}", cli.dir.display()))?;

    init_logging(&config, cli.no_color);

    match cli.command {
        Commands::Version => Ok(()),
        Commands::Replay {
            input,
            trace,
            format,
            pretty,
        } => commands::replay::run(
            &input,
            &config,
            commands::replay::ReplayOptions {
                trace,
                format,
                pretty,
            },
        ),
        Commands::Config { format } => commands::config::show(&config, format),
    }
}
