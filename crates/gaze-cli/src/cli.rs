//! Clap CLI definitions for Gaze.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub const AFTER_HELP: &str = "\
\x1b[1;36mExamples:\x1b[0m
  gaze check                    Validate the dashboard config
  gaze plan                     Show every widget slug without fetching
  gaze fetch                    Fetch all pages and print JSON
  gaze fetch --page Home        Fetch a single page
  gaze widgets                  List registered widget types";

/// Gaze: build-time data fetching for dashboard pages.
#[derive(Parser)]
#[command(name = "gaze", version, about = "Gaze dashboard data builder", after_help = AFTER_HELP)]
pub struct Cli {
    /// Path to config file.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch widget data and print `{ page: { slug: result } }` as JSON.
    Fetch {
        /// Only fetch these pages (by name or slug). Repeatable.
        #[arg(long = "page")]
        pages: Vec<String>,
        /// Override `fetch.max_concurrency`.
        #[arg(long)]
        concurrency: Option<usize>,
        /// Print compact JSON instead of pretty-printed.
        #[arg(long)]
        compact: bool,
    },
    /// Print the slug tree of each page without fetching anything.
    Plan {
        /// Only plan these pages (by name or slug). Repeatable.
        #[arg(long = "page")]
        pages: Vec<String>,
        /// Print compact JSON instead of pretty-printed.
        #[arg(long)]
        compact: bool,
    },
    /// Validate the configuration.
    Check,
    /// List the registered widget types.
    Widgets {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },
}
