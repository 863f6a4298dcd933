//! Error types for tzjs-gen

use thiserror::Error;

use crate::timestamp::Timestamp;

/// Result type alias for tzjs-gen operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while generating test points
#[derive(Debug, Error)]
pub enum Error {
    /// An external tool produced a line outside its grammar
    #[error("Malformed {tool} output: {line:?}")]
    MalformedExternalOutput {
        /// Tool that produced the line (`zdump`, `date`)
        tool: String,
        /// The offending line
        line: String,
    },

    /// Zone list could not be built
    #[error("Invalid zone list: {0}")]
    InvalidZoneList(String),

    /// Cutoff year outside the supported domain
    #[error("Invalid cutoff year: {0} (must be after 1970)")]
    InvalidCutoff(i32),

    /// Sampling domain `[0, cutoff)` holds no whole second
    #[error("Empty sampling domain: cutoff {0}")]
    EmptyDomain(Timestamp),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl Error {
    /// Shorthand for a [`Error::MalformedExternalOutput`]
    #[must_use]
    pub fn malformed(tool: &str, line: impl Into<String>) -> Self {
        Self::MalformedExternalOutput {
            tool: tool.to_string(),
            line: line.into(),
        }
    }
}
