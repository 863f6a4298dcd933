//! tzjs-tests CLI Library
//!
//! Wiring between configuration, the reference oracle, the orchestrator
//! and the report sink. The binary is a thin clap layer over [`run`].

#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_const_for_fn)]
// Allow common patterns in test code
#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod logging;

use std::fs::File;
use std::path::PathBuf;

use thiserror::Error;
use tracing::info;
use tzjs_gen::{TestSuite, ZoneList};
use tzjs_report::{ReportFormat, report_digest, write_report};
use tzjs_runner::{CommandOracle, GeneratorConfig, Orchestrator, ZoneOracle};

pub use logging::{StderrTracer, verbosity_level};

/// Result type alias
pub type Result<T> = std::result::Result<T, CliError>;

/// Anything that aborts a run
#[derive(Debug, Error)]
pub enum CliError {
    /// Generation failed
    #[error(transparent)]
    Runner(#[from] tzjs_runner::Error),

    /// Rendering or writing failed
    #[error(transparent)]
    Report(#[from] tzjs_report::Error),

    /// Zone list or domain error
    #[error(transparent)]
    Generator(#[from] tzjs_gen::Error),

    /// Output file could not be created
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Command-line overrides of a [`GeneratorConfig`]
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// YAML configuration file
    pub config: Option<PathBuf>,
    /// Zone list file
    pub zones_file: Option<PathBuf>,
    /// Restrict generation to these zones
    pub zones: Vec<String>,
    /// Compiled zone directory to discover zones in
    pub zoneinfo_dir: Option<PathBuf>,
    /// Cutoff year override
    pub cutoff_year: Option<i32>,
    /// Randomized sample count override
    pub samples: Option<usize>,
    /// Report format
    pub format: ReportFormat,
    /// Output path (stdout when unset)
    pub output: Option<PathBuf>,
}

/// Load the configuration file (if any) and apply overrides
pub fn build_config(options: &GenerateOptions) -> Result<GeneratorConfig> {
    let mut config = match &options.config {
        Some(path) => GeneratorConfig::from_file(path)?,
        None => GeneratorConfig::default(),
    };
    if let Some(path) = &options.zones_file {
        config.zones_file = Some(path.clone());
    }
    if let Some(dir) = &options.zoneinfo_dir {
        config.zoneinfo_dir = dir.clone();
    }
    if let Some(year) = options.cutoff_year {
        config.cutoff_year = year;
    }
    if let Some(samples) = options.samples {
        config.sample_count = samples;
    }
    Ok(config)
}

/// The configured zone list, restricted to `only` when non-empty
pub fn resolve_zones(config: &GeneratorConfig, only: &[String]) -> Result<ZoneList> {
    let zones = config.zone_list()?;
    let source = config.zones_file.as_ref().map_or_else(
        || config.zoneinfo_dir.display().to_string(),
        |path| path.display().to_string(),
    );
    info!(zones = zones.len(), source = %source, "zone list loaded");

    if only.is_empty() {
        return Ok(zones);
    }
    let restricted = zones.restrict(only)?;
    info!(zones = restricted.len(), "zone list restricted");
    Ok(restricted)
}

/// Validate, generate and render; nothing is written here
pub fn generate_report<O: ZoneOracle>(
    oracle: O,
    config: &GeneratorConfig,
    zones: &ZoneList,
    format: ReportFormat,
) -> Result<(TestSuite, String)> {
    config.validate(zones)?;
    let suite = Orchestrator::new(oracle, config)?.generate(zones)?;
    let report = format.render(&suite)?;
    info!(
        format = %format,
        bytes = report.len(),
        sha256 = %report_digest(&report),
        "report rendered"
    );
    Ok((suite, report))
}

/// Run against the system tools and write the report
pub fn run(options: &GenerateOptions) -> Result<()> {
    let config = build_config(options)?;
    let zones = resolve_zones(&config, &options.zones)?;
    let oracle = CommandOracle::new(config.command_runner());
    let (_, report) = generate_report(oracle, &config, &zones, options.format)?;

    match &options.output {
        Some(path) => write_report(File::create(path)?, &report)?,
        None => write_report(std::io::stdout().lock(), &report)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};
    use tzjs_gen::{Timestamp, TransitionRecord, ZoneOffset};
    use tzjs_runner::MockZoneOracle;

    fn oracle() -> MockZoneOracle {
        MockZoneOracle::new()
            .with_zone(
                "America/Los_Angeles",
                ZoneOffset::new(-28800, "PST"),
                vec![TransitionRecord::new(
                    Timestamp::from_secs(1_300_010_400),
                    -25200,
                    "PDT",
                    true,
                )],
            )
            .with_fixed_zone("Etc/UTC", ZoneOffset::new(0, "UTC"))
    }

    fn zones_file(names: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{names}").unwrap();
        file
    }

    #[test]
    fn test_build_config_defaults() {
        let config = build_config(&GenerateOptions::default()).unwrap();
        assert_eq!(config, GeneratorConfig::default());
    }

    #[test]
    fn test_build_config_overrides_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "cutoff_year: 2040\nsample_count: 10").unwrap();
        let options = GenerateOptions {
            config: Some(file.path().to_path_buf()),
            samples: Some(3),
            zoneinfo_dir: Some(PathBuf::from("/tmp/zoneinfo")),
            ..GenerateOptions::default()
        };
        let config = build_config(&options).unwrap();
        assert_eq!(config.cutoff_year, 2040);
        assert_eq!(config.sample_count, 3);
        assert_eq!(config.zoneinfo_dir, PathBuf::from("/tmp/zoneinfo"));
    }

    #[test]
    fn test_build_config_missing_file() {
        let options = GenerateOptions {
            config: Some(PathBuf::from("/nonexistent/tzjs.yaml")),
            ..GenerateOptions::default()
        };
        assert!(matches!(build_config(&options), Err(CliError::Runner(_))));
    }

    #[test]
    fn test_resolve_zones_restricted() {
        let file = zones_file("America/Los_Angeles\nEtc/UTC\nEurope/Paris\n");
        let config = GeneratorConfig {
            zones_file: Some(file.path().to_path_buf()),
            ..GeneratorConfig::default()
        };
        let all = resolve_zones(&config, &[]).unwrap();
        assert_eq!(all.len(), 3);
        let some = resolve_zones(&config, &["Etc/UTC".to_string()]).unwrap();
        assert_eq!(some.as_slice(), &["Etc/UTC"]);
        assert!(matches!(
            resolve_zones(&config, &["Mars/Base".to_string()]),
            Err(CliError::Generator(_))
        ));
    }

    #[test]
    fn test_generate_report_html() {
        let config = GeneratorConfig {
            sample_count: 20,
            ..GeneratorConfig::default()
        };
        let zones = ZoneList::from_names(["America/Los_Angeles", "Etc/UTC"]).unwrap();
        let (suite, report) =
            generate_report(oracle(), &config, &zones, ReportFormat::Html).unwrap();
        assert_eq!(suite.random.len(), 20);
        let checks = report.lines().filter(|l| l.starts_with("check_offset(")).count();
        assert_eq!(checks, suite.counts().total() - suite.counts().enumeration);
    }

    #[test]
    fn test_generate_report_rejects_bad_config() {
        let config = GeneratorConfig {
            cutoff_year: 1960,
            ..GeneratorConfig::default()
        };
        let zones = ZoneList::from_names(["Etc/UTC"]).unwrap();
        let err = generate_report(oracle(), &config, &zones, ReportFormat::Json).unwrap_err();
        assert!(err.to_string().contains("Validation error"));

        let empty = generate_report(
            oracle(),
            &GeneratorConfig::default(),
            &ZoneList::default(),
            ReportFormat::Html,
        );
        assert!(empty.is_err());
    }

    #[test]
    fn test_run_fails_before_writing() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("tests.html");
        let options = GenerateOptions {
            zoneinfo_dir: Some(dir.path().join("missing")),
            output: Some(output.clone()),
            ..GenerateOptions::default()
        };
        assert!(run(&options).is_err());
        assert!(!output.exists());
    }
}
