//! Command execution abstraction for testability
//!
//! Three external calls feed the suite: `zdump -v` for a zone's
//! transitions, `date '+%Z %::z'` for the offset at an instant, and
//! `date +%s` to resolve zdump's UTC date strings. The trait lets the
//! oracle be tested against canned output without spawning processes.

use std::collections::BTreeMap;
use std::process::Command;

use chrono::NaiveDateTime;

use crate::error::{Error, Result};

/// Result of executing a command
#[derive(Debug, Clone)]
pub struct CommandOutput {
    /// Standard output
    pub stdout: String,
    /// Standard error
    pub stderr: String,
    /// Exit code (negative for signals)
    pub exit_code: i32,
    /// Whether the command succeeded
    pub success: bool,
}

impl CommandOutput {
    /// Create a successful command output
    #[must_use]
    pub fn success(stdout: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: String::new(),
            exit_code: 0,
            success: true,
        }
    }

    /// Create a failed command output
    #[must_use]
    pub fn failure(exit_code: i32, stderr: impl Into<String>) -> Self {
        Self {
            stdout: String::new(),
            stderr: stderr.into(),
            exit_code,
            success: false,
        }
    }

    /// Fail with [`Error::CommandFailed`] unless the command succeeded
    ///
    /// # Errors
    ///
    /// Returns [`Error::CommandFailed`] carrying `command` and stderr.
    pub fn check(self, command: impl Into<String>) -> Result<Self> {
        if self.success {
            Ok(self)
        } else {
            Err(Error::CommandFailed {
                command: command.into(),
                exit_code: self.exit_code,
                stderr: self.stderr,
            })
        }
    }
}

/// Trait for the tz tools the oracle shells out to
///
/// Implementations return `Err` only when the process could not be run;
/// a non-zero exit is reported through [`CommandOutput`].
pub trait CommandRunner: Send + Sync {
    /// `zdump -v -c <cutoff_year> <zone>`
    fn zdump(&self, zone: &str, cutoff_year: i32) -> Result<CommandOutput>;

    /// `date --date=@<secs> '+%Z %::z'` with `TZ=<zone>`
    fn date_format(&self, zone: &str, secs: i64) -> Result<CommandOutput>;

    /// `date --date=<datetime> +%s`
    fn date_epoch(&self, datetime: &str) -> Result<CommandOutput>;
}

/// Real command runner that executes the system tools
#[derive(Debug, Clone)]
pub struct RealCommandRunner {
    /// Path to zdump (default: "zdump")
    pub zdump_binary: String,
    /// Path to GNU date (default: "date")
    pub date_binary: String,
}

impl Default for RealCommandRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl RealCommandRunner {
    /// Create a runner using the tools on `PATH`
    #[must_use]
    pub fn new() -> Self {
        Self {
            zdump_binary: "zdump".to_string(),
            date_binary: "date".to_string(),
        }
    }

    /// Create with custom tool paths
    #[must_use]
    pub fn with_binaries(zdump_binary: impl Into<String>, date_binary: impl Into<String>) -> Self {
        Self {
            zdump_binary: zdump_binary.into(),
            date_binary: date_binary.into(),
        }
    }

    fn execute(&self, program: &str, args: &[&str], tz: Option<&str>) -> Result<CommandOutput> {
        let mut command = Command::new(program);
        // Tool output is parsed, so it must not be localized.
        command.args(args).env("LC_ALL", "C").env("LC_TIME", "C");
        if let Some(zone) = tz {
            command.env("TZ", zone);
        }

        let output = command
            .output()
            .map_err(|e| Error::ExternalProcessFailure {
                command: command_line(program, args),
                reason: e.to_string(),
            })?;
        let stdout =
            String::from_utf8(output.stdout).map_err(|e| Error::ExternalProcessFailure {
                command: command_line(program, args),
                reason: format!("stdout is not UTF-8: {e}"),
            })?;

        Ok(CommandOutput {
            stdout,
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            exit_code: output.status.code().unwrap_or(-1),
            success: output.status.success(),
        })
    }
}

impl CommandRunner for RealCommandRunner {
    fn zdump(&self, zone: &str, cutoff_year: i32) -> Result<CommandOutput> {
        let year = cutoff_year.to_string();
        self.execute(&self.zdump_binary, &["-v", "-c", &year, zone], None)
    }

    fn date_format(&self, zone: &str, secs: i64) -> Result<CommandOutput> {
        let at = format!("--date=@{secs}");
        self.execute(&self.date_binary, &[&at, "+%Z %::z"], Some(zone))
    }

    fn date_epoch(&self, datetime: &str) -> Result<CommandOutput> {
        let at = format!("--date={datetime}");
        self.execute(&self.date_binary, &[&at, "+%s"], None)
    }
}

/// Render a command line for error messages
#[must_use]
pub fn command_line(program: &str, args: &[&str]) -> String {
    std::iter::once(program)
        .chain(args.iter().copied())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Mock command runner for testing
///
/// `zdump` answers from canned text per zone (unknown zones dump nothing).
/// `date_format` answers from a per-zone table of designations, each in
/// force from its start second on. `date_epoch` really converts zdump's
/// `Sun Mar 13 10:00:00 2011 UT` strings, so canned dumps stay consistent.
#[derive(Debug, Clone, Default)]
pub struct MockCommandRunner {
    /// Canned `zdump -v` output per zone
    pub dumps: BTreeMap<String, String>,
    /// `(from_secs, "<abbr> <sign>HH:MM:SS")` per zone, ascending
    pub designations: BTreeMap<String, Vec<(i64, String)>>,
    /// Whether zdump should exit non-zero
    pub zdump_success: bool,
    /// Whether date should exit non-zero
    pub date_success: bool,
}

impl MockCommandRunner {
    /// Create a new mock runner where every tool succeeds
    #[must_use]
    pub fn new() -> Self {
        Self {
            zdump_success: true,
            date_success: true,
            ..Self::default()
        }
    }

    /// Set the zdump output for a zone
    #[must_use]
    pub fn with_dump(mut self, zone: impl Into<String>, output: impl Into<String>) -> Self {
        self.dumps.insert(zone.into(), output.into());
        self
    }

    /// Add a designation in force for `zone` from `from_secs` on
    #[must_use]
    pub fn with_designation(
        mut self,
        zone: impl Into<String>,
        from_secs: i64,
        line: impl Into<String>,
    ) -> Self {
        let table = self.designations.entry(zone.into()).or_default();
        table.push((from_secs, line.into()));
        table.sort_by_key(|(from, _)| *from);
        self
    }

    /// Make every zdump call fail
    #[must_use]
    pub fn with_zdump_failure(mut self) -> Self {
        self.zdump_success = false;
        self
    }

    /// Make every date call fail
    #[must_use]
    pub fn with_date_failure(mut self) -> Self {
        self.date_success = false;
        self
    }
}

impl CommandRunner for MockCommandRunner {
    fn zdump(&self, zone: &str, _cutoff_year: i32) -> Result<CommandOutput> {
        if !self.zdump_success {
            return Ok(CommandOutput::failure(1, format!("zdump: cannot dump {zone}")));
        }
        Ok(CommandOutput::success(
            self.dumps.get(zone).cloned().unwrap_or_default(),
        ))
    }

    fn date_format(&self, zone: &str, secs: i64) -> Result<CommandOutput> {
        if !self.date_success {
            return Ok(CommandOutput::failure(1, "date: invalid date"));
        }
        let line = self
            .designations
            .get(zone)
            .and_then(|table| table.iter().rev().find(|(from, _)| *from <= secs))
            .map_or("UTC +00:00:00", |(_, line)| line.as_str());
        Ok(CommandOutput::success(format!("{line}\n")))
    }

    fn date_epoch(&self, datetime: &str) -> Result<CommandOutput> {
        if !self.date_success {
            return Ok(CommandOutput::failure(1, "date: invalid date"));
        }
        match parse_zdump_utc(datetime) {
            Some(secs) => Ok(CommandOutput::success(format!("{secs}\n"))),
            None => Ok(CommandOutput::failure(
                1,
                format!("date: invalid date '{datetime}'"),
            )),
        }
    }
}

/// Seconds since the epoch for a zdump UTC string such as
/// `Sun Nov  6 09:00:00 2011 UT`
fn parse_zdump_utc(datetime: &str) -> Option<i64> {
    let mut tokens: Vec<&str> = datetime.split_whitespace().collect();
    if !matches!(tokens.pop(), Some("UT" | "UTC")) {
        return None;
    }
    NaiveDateTime::parse_from_str(&tokens.join(" "), "%a %b %d %H:%M:%S %Y")
        .ok()
        .map(|dt| dt.and_utc().timestamp())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_output_success() {
        let output = CommandOutput::success("hello");
        assert!(output.success);
        assert_eq!(output.exit_code, 0);
        assert_eq!(output.stdout, "hello");
        assert!(output.stderr.is_empty());
    }

    #[test]
    fn test_command_output_failure() {
        let output = CommandOutput::failure(1, "error message");
        assert!(!output.success);
        assert_eq!(output.exit_code, 1);
        assert!(output.stdout.is_empty());
        assert_eq!(output.stderr, "error message");
    }

    #[test]
    fn test_check_propagates_failure() {
        let err = CommandOutput::failure(2, "boom").check("zdump -v").unwrap_err();
        match err {
            Error::CommandFailed {
                command,
                exit_code,
                stderr,
            } => {
                assert_eq!(command, "zdump -v");
                assert_eq!(exit_code, 2);
                assert_eq!(stderr, "boom");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(CommandOutput::success("ok").check("date").is_ok());
    }

    #[test]
    fn test_command_line() {
        assert_eq!(
            command_line("zdump", &["-v", "-c", "2050", "UTC"]),
            "zdump -v -c 2050 UTC"
        );
        assert_eq!(command_line("date", &[]), "date");
    }

    #[test]
    fn test_real_runner_defaults() {
        let runner = RealCommandRunner::default();
        assert_eq!(runner.zdump_binary, "zdump");
        assert_eq!(runner.date_binary, "date");
        let custom = RealCommandRunner::with_binaries("/opt/tz/zdump", "gdate");
        assert_eq!(custom.zdump_binary, "/opt/tz/zdump");
        assert_eq!(custom.date_binary, "gdate");
    }

    #[test]
    fn test_real_runner_missing_binary() {
        let runner = RealCommandRunner::with_binaries(
            "/nonexistent/tzjs/zdump",
            "/nonexistent/tzjs/date",
        );
        let err = runner.zdump("UTC", 2050).unwrap_err();
        assert!(matches!(err, Error::ExternalProcessFailure { .. }));
        assert!(err.to_string().contains("/nonexistent/tzjs/zdump -v -c 2050 UTC"));
        assert!(runner.date_epoch("now").is_err());
    }

    #[test]
    fn test_mock_zdump() {
        let runner = MockCommandRunner::new().with_dump("Europe/Paris", "line\n");
        assert_eq!(runner.zdump("Europe/Paris", 2050).unwrap().stdout, "line\n");
        assert!(runner.zdump("Asia/Tokyo", 2050).unwrap().stdout.is_empty());
        assert!(!MockCommandRunner::new()
            .with_zdump_failure()
            .zdump("UTC", 2050)
            .unwrap()
            .success);
    }

    #[test]
    fn test_mock_date_format_table() {
        let runner = MockCommandRunner::new()
            .with_designation("America/Los_Angeles", 1_300_010_400, "PDT -07:00:00")
            .with_designation("America/Los_Angeles", i64::MIN, "PST -08:00:00");
        let at = |secs| runner.date_format("America/Los_Angeles", secs).unwrap().stdout;
        assert_eq!(at(1_300_010_399), "PST -08:00:00\n");
        assert_eq!(at(1_300_010_400), "PDT -07:00:00\n");
        assert_eq!(
            runner.date_format("Etc/UTC", 0).unwrap().stdout,
            "UTC +00:00:00\n"
        );
    }

    #[test]
    fn test_mock_date_epoch() {
        let runner = MockCommandRunner::new();
        let out = runner.date_epoch("Sun Mar 13 10:00:00 2011 UT").unwrap();
        assert_eq!(out.stdout, "1300010400\n");
        let out = runner.date_epoch("Sun Nov  6 09:00:00 2011 UT").unwrap();
        assert_eq!(out.stdout, "1320570000\n");
        let out = runner.date_epoch("Fri Dec 13 20:45:52 1901 UT").unwrap();
        assert_eq!(out.stdout, "-2147483648\n");
    }

    #[test]
    fn test_mock_date_epoch_rejects_local_time() {
        let runner = MockCommandRunner::new();
        let out = runner.date_epoch("Sun Mar 13 03:00:00 2011 PDT").unwrap();
        assert!(!out.success);
        assert!(!MockCommandRunner::new()
            .with_date_failure()
            .date_epoch("Sun Mar 13 10:00:00 2011 UT")
            .unwrap()
            .success);
    }
}
