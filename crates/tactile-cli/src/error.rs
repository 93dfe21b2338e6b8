//! Error types for the CLI

use thiserror::Error;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Errors that can occur in the CLI
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// One or more scenarios failed
    #[error("Suite failed: {message}")]
    SuiteFailed {
        /// Error message
        message: String,
    },

    /// Runtime or server error
    #[error("Runtime error: {message}")]
    Runtime {
        /// Error message
        message: String,
    },

    /// IO error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON output error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Tactile library error
    #[error("{0}")]
    Tactile(#[from] tactile::InteractionError),
}

impl CliError {
    /// Create a configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a suite failure error
    #[must_use]
    pub fn suite_failed(message: impl Into<String>) -> Self {
        Self::SuiteFailed {
            message: message.into(),
        }
    }

    /// Create a runtime error
    #[must_use]
    pub fn runtime(message: impl Into<String>) -> Self {
        Self::Runtime {
            message: message.into(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error() {
        let err = CliError::config("bad browser");
        assert!(err.to_string().contains("Configuration"));
        assert!(err.to_string().contains("bad browser"));
    }

    #[test]
    fn test_suite_failed_error() {
        let err = CliError::suite_failed("2 scenario(s) failed");
        assert_eq!(err.to_string(), "Suite failed: 2 scenario(s) failed");
    }

    #[test]
    fn test_runtime_error() {
        let err = CliError::runtime("no runtime");
        assert!(err.to_string().contains("Runtime"));
    }

    #[test]
    fn test_library_error_passes_through() {
        let err: CliError =
            tactile::InteractionError::config("TACTILE_WEBDRIVER_URL is not set").into();
        assert!(err.to_string().contains("TACTILE_WEBDRIVER_URL"));
    }

    #[test]
    fn test_io_error_from() {
        let io_err = std::io::Error::new(std::io::ErrorKind::AddrInUse, "port taken");
        let cli_err: CliError = io_err.into();
        assert!(cli_err.to_string().contains("I/O"));
    }
}
