//! `plate-checkr` — classify Indonesian license plates and look up their issuing region.
//!
//! # Flow
//! 1. Parse CLI arguments ([`cli`]) and install the `tracing` subscriber.
//! 2. Load config ([`config::load_config`]).
//! 3. Collect plates from arguments and `--file`.
//! 4. For each plate: normalize, classify and enrich ([`checker`], [`plate`]),
//!    calling the registration database ([`registry`]) for standard plates only.
//! 5. Render the requested report ([`report`]).
//! 6. Exit `0` (every plate resolved or recognized) or `1` (at least one error).

mod checker;
mod cli;
mod config;
mod error;
mod models;
mod plate;
mod registry;
mod report;

use anyhow::Result;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;

use checker::PlateChecker;
use cli::{read_plate_file, Cli, ReportFormat};
use config::load_config;
use registry::firestore::FirestoreRegistry;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.log_json);

    if cli.formats {
        report::terminal::render_formats();
        return Ok(());
    }

    let cwd = std::env::current_dir()?;
    let mut config = load_config(&cwd, cli.config.as_deref())?;
    if let Some(secs) = cli.timeout {
        config.registry.timeout_secs = secs;
    }
    tracing::debug!(
        base_url = %config.registry.base_url,
        timeout_secs = config.registry.timeout_secs,
        batch_size = config.batch.size,
        "configuration loaded"
    );

    let mut plates = cli.plates.clone();
    if let Some(path) = &cli.file {
        plates.extend(read_plate_file(path)?);
    }

    if plates.is_empty() {
        eprintln!("No plates given; pass plate numbers or --file <FILE>");
        std::process::exit(2);
    }

    let checker = PlateChecker::new(FirestoreRegistry::new(&config.registry)?);

    let pb = if !cli.quiet && plates.len() > 1 && matches!(cli.report, ReportFormat::Terminal) {
        let pb = ProgressBar::new(plates.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
                )?
                .progress_chars("#>-"),
        );
        Some(pb)
    } else {
        None
    };

    let reports = checker
        .check_batch(&plates, config.batch.size, pb.as_ref())
        .await;

    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    match cli.report {
        ReportFormat::Terminal => report::terminal::render(&reports, cli.quiet)?,
        ReportFormat::Json => println!("{}", serde_json::to_string_pretty(&reports)?),
    }

    if reports.iter().any(|r| r.is_error()) {
        std::process::exit(1);
    }

    Ok(())
}

/// Logs go to stderr so JSON reports on stdout stay parseable.
/// `RUST_LOG` wins over `-v` when set.
fn init_tracing(verbose: u8, json: bool) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}
