//! Command-line arguments for the `harvest` binary.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::{Parser, ValueEnum};

/// Harvest every article listed on a catalog page into one JSON record each.
#[derive(Parser, Debug)]
#[command(name = "harvest", version, about)]
pub struct Cli {
    /// Directory the article records are written to; created if missing.
    pub output_dir: PathBuf,

    /// RON settings file overriding the built-in site profile.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Navigation backend.
    #[arg(long, value_enum, default_value_t = Driver::Chromium)]
    pub driver: Driver,

    /// Catalog page to start from.
    #[arg(long)]
    pub catalog_url: Option<String>,

    /// Run Chromium without a window (no interactive sign-in possible).
    #[arg(long)]
    pub headless: bool,

    /// Confirm both operator checkpoints automatically.
    #[arg(short, long)]
    pub yes: bool,

    /// Also write the log to this file.
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Driver {
    /// Real browser over the DevTools protocol.
    Chromium,
    /// Plain HTTP fetches of server-rendered HTML.
    Static,
}

/// Exit code for a failed parse: help and version are not failures, anything
/// else is a usage error.
pub fn exit_for_parse_error(err: clap::Error) -> ExitCode {
    let _ = err.print();
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
        _ => ExitCode::from(1),
    }
}
