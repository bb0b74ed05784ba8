//! LeadHunter CLI - Command-line interface
//!
//! Runs the API server or performs searches and exports from the terminal.

mod commands;

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use leadhunter_core::tracing_setup::{CliLogLevel, init_tracing};

#[derive(Parser)]
#[command(name = "leadhunter")]
#[command(about = "Business lead search for hospitality suppliers in Spain", version)]
struct Cli {
    /// Console log level (RUST_LOG takes precedence)
    #[arg(long, global = true, value_enum, default_value_t = CliLogLevel::Info)]
    log_level: CliLogLevel,

    /// Directory for the full trace log of the last run
    #[arg(long, global = true, default_value = "logs")]
    logs_dir: PathBuf,

    #[command(subcommand)]
    command: commands::Commands,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.log_level.as_tracing_level(), Some(&cli.logs_dir))
        .context("failed to initialize logging")?;

    commands::handle_command(cli.command).await
}
