// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! jd: inspect and maintain a job coordination tree snapshot

mod color;
mod commands;
mod config;
mod env;
mod exit_error;
mod output;
mod store;
mod table;

use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::fleet::FleetArgs;
use commands::job::JobCommand;
use commands::migrate::MigrateArgs;
use commands::schedule::ScheduleCommand;
use commands::settings::SettingsArgs;
use commands::Context;
use config::Settings;
use output::OutputFormat;
use store::TreeFile;

#[derive(Parser)]
#[command(name = "jd", version, about = "Job status, schedules and migrations over a coordination tree")]
#[command(styles = color::styles())]
struct Cli {
    /// Tree snapshot file (JSON, zstd-compressed when the name ends in .zst)
    #[arg(long, global = true)]
    tree: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Job(JobCommand),
    #[command(flatten)]
    Schedule(ScheduleCommand),
    /// Classify the executor fleet by version
    Fleet(FleetArgs),
    /// Show or update job settings
    Settings(SettingsArgs),
    /// Move jobs between container tasks
    Migrate(MigrateArgs),
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(env::log_filter()))
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run().await {
        let code = exit_error::exit_code(&err);
        tracing::debug!(code, error = ?err, "command failed");
        eprintln!("Error: {}", err);
        std::process::exit(code);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let settings = Settings::resolve(cli.tree)?;
    let file = TreeFile::new(settings.tree_file);
    tracing::debug!(tree = %file.path().display(), "opening tree");
    let ctx = Context::open(file, settings.engine, cli.format)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    dispatch(cli.command, &ctx, &mut out).await?;
    out.flush()?;
    Ok(())
}

async fn dispatch(command: Commands, ctx: &Context, out: &mut dyn Write) -> Result<()> {
    match command {
        Commands::Job(command) => commands::job::handle(command, ctx, out).await,
        Commands::Schedule(command) => commands::schedule::handle(command, ctx, out).await,
        Commands::Fleet(args) => commands::fleet::handle(args, ctx, out).await,
        Commands::Settings(args) => commands::settings::handle(args.command, ctx, out).await,
        Commands::Migrate(args) => commands::migrate::handle(args.command, ctx, out).await,
    }
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
