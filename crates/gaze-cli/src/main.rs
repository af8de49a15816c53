//! Gaze CLI: build render-ready widget data for dashboard pages.
//!
//! Reads the dashboard layout from `~/.gaze/gaze.toml` (or `--config` /
//! `GAZE_CONFIG`), fetches every widget, and prints the results as JSON on
//! stdout. Logs go to stderr.

mod cli;
mod cmd;
mod ui;

use crate::cli::*;
use clap::Parser;

fn init_tracing_stderr() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing_stderr();

    match cli.command {
        Commands::Fetch {
            pages,
            concurrency,
            compact,
        } => cmd::fetch::cmd_fetch(cli.config, &pages, concurrency, compact),
        Commands::Plan { pages, compact } => cmd::plan::cmd_plan(cli.config, &pages, compact),
        Commands::Check => cmd::check::cmd_check(cli.config),
        Commands::Widgets { json } => cmd::widgets::cmd_widgets(json),
    }
}
