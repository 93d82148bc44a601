use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "plate-checkr",
    about = "Classify Indonesian license plates and look up their issuing region",
    version
)]
pub struct Cli {
    /// Plate numbers to check (e.g. B1234ABC, "D 5678 ZZP", 12345-00)
    pub plates: Vec<String>,

    /// Read additional plates from a file, one per line (`#` starts a comment)
    #[arg(short, long, value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Config file [default: ./.plate-checkr/config.toml, fallback ~/.config/plate-checkr/config.toml]
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Report format
    #[arg(long, default_value = "terminal", value_name = "FORMAT")]
    pub report: ReportFormat,

    /// Region lookup timeout in seconds (overrides config)
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// List supported plate formats and institution codes, then exit
    #[arg(long)]
    pub formats: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only print summary line
    #[arg(short, long)]
    pub quiet: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub log_json: bool,
}

#[derive(Debug, Clone, clap::ValueEnum)]
pub enum ReportFormat {
    Terminal,
    Json,
}

/// Read a plate list: one plate per line, blank lines and `#` comments skipped.
pub fn read_plate_file(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading plate list {}", path.display()))?;

    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect())
}
