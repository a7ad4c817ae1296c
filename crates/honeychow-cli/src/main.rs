//! HoneyChow command-line entry point.
//!
//! Loads configuration and the site database, then either lists the catalog
//! or searches for a username and prints (and optionally exports) the results.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

mod args;
mod render;

use anyhow::{Context, Result};
use args::Args;
use clap::Parser;
use colored::Colorize;
use honeychow_core::AppConfig;
use honeychow_scanner::{
    export_csv_file, HttpTransport, ProbeOrchestrator, SearchStatus, SiteFilter,
};
use honeychow_sites::{SiteCatalog, SiteLoader};
use render::ConsoleReporter;
use std::process::ExitCode;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Initialize tracing subscriber for logging
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let default = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    debug!("Starting HoneyChow v{}", env!("CARGO_PKG_VERSION"));

    match run(args).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("[{}] {e:#}", render::error_mark());
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<ExitCode> {
    let mut config = AppConfig::load_with_env().context("failed to load configuration")?;
    args.apply_to(&mut config);
    config.validate().context("invalid configuration")?;

    let transport = HttpTransport::new()?;
    let catalog = load_catalog(&config, &transport, args.quiet).await?;

    if args.list_sites {
        render::print_sites(&catalog);
        return Ok(ExitCode::SUCCESS);
    }

    if args.list_categories {
        render::print_categories(&catalog);
        return Ok(ExitCode::SUCCESS);
    }

    let Some(username) = args.username.as_deref() else {
        println!("[{}] Username required for search", render::warn_mark());
        println!("Use --help for usage information");
        return Ok(ExitCode::from(2));
    };

    let cancel = CancellationToken::new();
    let watcher = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            watcher.cancel();
        }
    });

    let filter = SiteFilter::all()
        .with_names(args.sites.iter().cloned())
        .with_categories(args.categories.iter().cloned());

    let mut reporter = ConsoleReporter::new(
        args.quiet,
        config.output.show_not_found,
        config.output.show_failed,
    );

    let orchestrator = ProbeOrchestrator::from_config(Arc::new(transport), &config.search);
    let results = orchestrator
        .search(catalog.sites(), username, &filter, &mut reporter, &cancel)
        .await;

    match results.status {
        SearchStatus::NoMatchingSites => return Ok(ExitCode::FAILURE),
        SearchStatus::Interrupted => println!(
            "[{}] User interruption detected ({})",
            render::warn_mark(),
            "CTRL+C".yellow().bold()
        ),
        SearchStatus::Completed => {}
    }

    if !args.quiet {
        render::print_results(
            &results,
            config.output.show_not_found,
            config.output.show_failed,
        );
    }
    render::print_summary(username, &results.summary());

    if let Some(path) = &args.output {
        export_csv_file(path, &results, args.output_all)
            .with_context(|| format!("failed to export results to {}", path.display()))?;
        println!("[{}] Results exported to {}", "+".green().bold(), path.display());
    }

    Ok(ExitCode::SUCCESS)
}

async fn load_catalog(
    config: &AppConfig,
    transport: &HttpTransport,
    quiet: bool,
) -> Result<SiteCatalog> {
    let spinner = (!quiet).then(|| render::spinner("Loading site database..."));

    let loaded = SiteLoader::from_config(&config.database)
        .load(transport.client())
        .await;

    let catalog = match loaded {
        Ok(catalog) => catalog,
        Err(e) => {
            if let Some(spinner) = spinner {
                spinner.finish_and_clear();
            }
            return Err(e).context("failed to load site database");
        }
    };

    info!(sites = catalog.len(), origin = catalog.origin(), "site database ready");

    if let Some(spinner) = spinner {
        spinner.finish_with_message(format!(
            "[{}] Loaded {} sites from {}",
            render::ok_mark(),
            catalog.len(),
            catalog.origin()
        ));
    }

    Ok(catalog)
}
