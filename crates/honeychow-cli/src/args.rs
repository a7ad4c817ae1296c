//! Command-line arguments.

use clap::Parser;
use honeychow_core::AppConfig;
use std::path::PathBuf;

/// "Honey Chow": A fast, asynchronous username enumeration tool.
#[derive(Debug, Parser)]
#[command(name = "honeychow", version, long_about = None)]
pub struct Args {
    /// Username to search for
    pub username: Option<String>,

    /// Specific sites to check (space-separated)
    #[arg(short, long, num_args = 1.., value_name = "SITE")]
    pub sites: Vec<String>,

    /// Categories to search (space-separated)
    #[arg(short, long, num_args = 1.., value_name = "CATEGORY")]
    pub categories: Vec<String>,

    /// Request timeout in seconds [default: 15]
    #[arg(short, long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Max concurrent requests [default: 100]
    #[arg(short, long, value_name = "N", value_parser = clap::value_parser!(u64).range(1..))]
    pub workers: Option<u64>,

    /// Export results to CSV file
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Include not found and failed in CSV export
    #[arg(short = 'O', long)]
    pub output_all: bool,

    /// Show sites where username wasn't found
    #[arg(short = 'N', long)]
    pub not_found: bool,

    /// Show sites that errored (timeout, connection error, etc.)
    #[arg(short, long)]
    pub failed: bool,

    /// Only show summary (no live output)
    #[arg(short, long)]
    pub quiet: bool,

    /// List all available sites
    #[arg(short = 'S', long)]
    pub list_sites: bool,

    /// List all available categories
    #[arg(short = 'C', long)]
    pub list_categories: bool,

    /// Load sites from a local JSON file instead of the remote database
    #[arg(short, long, value_name = "PATH")]
    pub database: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(long)]
    pub verbose: bool,
}

impl Args {
    /// Layer flags over the loaded configuration. Flags win.
    pub fn apply_to(&self, config: &mut AppConfig) {
        if let Some(workers) = self.workers {
            config.search.workers = usize::try_from(workers).unwrap_or(usize::MAX);
        }

        if let Some(timeout) = self.timeout {
            config.search.timeout_secs = timeout;
        }

        if let Some(path) = &self.database {
            config.database.path = Some(path.clone());
        }

        config.output.show_not_found |= self.not_found;
        config.output.show_failed |= self.failed;
    }
}
