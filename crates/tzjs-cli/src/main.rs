//! tzjs-tests
//!
//! Generates the tz.js regression test page from the system tz database.
//! With no arguments, every zone under /usr/share/zoneinfo is checked and
//! the page is written to stdout.

#![allow(clippy::doc_markdown)]

use std::path::PathBuf;

use clap::{ArgAction, Parser};
use tzjs_cli::{GenerateOptions, StderrTracer, run};
use tzjs_report::ReportFormat;

#[derive(Parser)]
#[command(name = "tzjs-tests")]
#[command(about = "Generate the tz.js regression test page", long_about = None)]
#[command(version)]
struct Cli {
    /// YAML configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Zone list file, one zone per line
    #[arg(long, value_name = "FILE")]
    zones_file: Option<PathBuf>,

    /// Only generate for this zone (repeatable)
    #[arg(long = "zone", value_name = "ZONE")]
    zones: Vec<String>,

    /// Compiled zone directory to discover zones in
    #[arg(long, value_name = "DIR")]
    zoneinfo_dir: Option<PathBuf>,

    /// First year outside the tested domain
    #[arg(long)]
    cutoff_year: Option<i32>,

    /// Number of randomized checks
    #[arg(long)]
    samples: Option<usize>,

    /// Report format (html, json)
    #[arg(long, default_value = "html")]
    format: ReportFormat,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// More logging on stderr (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl From<Cli> for GenerateOptions {
    fn from(cli: Cli) -> Self {
        Self {
            config: cli.config,
            zones_file: cli.zones_file,
            zones: cli.zones,
            zoneinfo_dir: cli.zoneinfo_dir,
            cutoff_year: cli.cutoff_year,
            samples: cli.samples,
            format: cli.format,
            output: cli.output,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = StderrTracer::from_env(cli.verbose).register() {
        eprintln!("warning: logging unavailable: {e}");
    }

    if let Err(e) = run(&GenerateOptions::from(cli)) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
