//! Error types for tzjs-runner

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while generating a suite
#[derive(Debug, Error)]
pub enum Error {
    /// A subprocess could not be started or its output could not be read
    #[error("External process failure: {command} - {reason}")]
    ExternalProcessFailure {
        /// The command line
        command: String,
        /// Underlying reason
        reason: String,
    },

    /// A subprocess ran but exited unsuccessfully
    #[error("Command failed: {command} (exit code: {exit_code})")]
    CommandFailed {
        /// The command line
        command: String,
        /// Exit code
        exit_code: i32,
        /// Stderr output
        stderr: String,
    },

    /// Configuration or input rejected before generation
    #[error("Validation error: {0}")]
    Validation(String),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// YAML error
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// Parse or domain error from the generator crate
    #[error("Generator error: {0}")]
    Generator(#[from] tzjs_gen::Error),
}

impl Error {
    /// True if the run was aborted by unexpected tool output
    #[must_use]
    pub fn is_malformed_output(&self) -> bool {
        matches!(
            self,
            Self::Generator(tzjs_gen::Error::MalformedExternalOutput { .. })
        )
    }
}
