//! Report formats, digest and output sink

use std::fmt;
use std::io::Write;
use std::str::FromStr;

use sha2::{Digest, Sha256};
use tzjs_gen::TestSuite;

use crate::error::{Error, Result};
use crate::html::HarnessReport;
use crate::json::to_json;

/// Published form of a suite
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportFormat {
    /// Executable HTML/JS harness
    #[default]
    Html,
    /// Machine-readable export
    Json,
}

impl ReportFormat {
    /// Render `suite` in this format
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    pub fn render(self, suite: &TestSuite) -> Result<String> {
        match self {
            Self::Html => HarnessReport::new().generate(suite),
            Self::Json => to_json(suite),
        }
    }
}

impl FromStr for ReportFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "html" => Ok(Self::Html),
            "json" => Ok(Self::Json),
            _ => Err(Error::UnknownFormat(s.to_string())),
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Html => write!(f, "html"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// SHA-256 of a rendered report, lowercase hex
#[must_use]
pub fn report_digest(report: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(report.as_bytes());
    let result = hasher.finalize();
    format!("{result:x}")
}

/// Write a rendered report in a single write, then flush
///
/// # Errors
///
/// Returns an error if the sink rejects the write or flush.
pub fn write_report<W: Write>(mut writer: W, report: &str) -> Result<()> {
    writer.write_all(report.as_bytes())?;
    writer.flush()?;
    Ok(())
}
