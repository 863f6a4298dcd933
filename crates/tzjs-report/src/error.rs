//! Error types for tzjs-report

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while rendering or writing a report
#[derive(Debug, Error)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// Unsupported report format name
    #[error("Unknown report format: {0} (expected html or json)")]
    UnknownFormat(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_format_display() {
        let err = Error::UnknownFormat("xml".to_string());
        assert!(err.to_string().contains("xml"));
        assert!(err.to_string().contains("html or json"));
    }

    #[test]
    fn test_io_error() {
        let err: Error = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed").into();
        assert!(err.to_string().contains("closed"));
    }
}
