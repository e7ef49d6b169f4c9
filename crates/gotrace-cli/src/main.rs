//! CLI for inspecting Go execution traces.
//!
//! Provides commands for dumping decoded events, summarizing a trace, and
//! listing the event-type catalog.

mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "gotrace")]
#[command(about = "Decode Go 1.19 execution traces", long_about = None)]
#[command(version)]
struct Cli {
    /// Log filter used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print every decoded event
    Dump {
        /// Path to the trace file, or "-" for stdin
        path: PathBuf,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Stop after this many events
        #[arg(long)]
        limit: Option<u64>,
    },

    /// Summarize event counts per type
    Stats {
        /// Path to the trace file, or "-" for stdin
        path: PathBuf,

        /// Emit the report as JSON
        #[arg(long)]
        json: bool,

        /// Stop after this many events
        #[arg(long)]
        limit: Option<u64>,
    },

    /// List the known event types and their arguments
    Catalog,
}

/// Output formats for the dump command.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One human-readable line per event
    Text,
    /// One JSON object per line
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Dump {
            path,
            format,
            limit,
        } => commands::dump(&path, format, limit),
        Commands::Stats { path, json, limit } => commands::stats(&path, json, limit),
        Commands::Catalog => commands::catalog(),
    }
}
