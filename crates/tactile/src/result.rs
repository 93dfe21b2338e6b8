//! Result and error types for Tactile.

use thiserror::Error;

/// Result type for Tactile operations
pub type InteractionResult<T> = Result<T, InteractionError>;

/// Errors that can occur while composing, dispatching or verifying interactions
#[derive(Debug, Error)]
pub enum InteractionError {
    /// Element lookup failed on the remote end
    #[error("No such element: {message}")]
    ElementNotFound {
        /// Error message
        message: String,
    },

    /// Remote end answered with a W3C error body
    #[error("WebDriver error '{error}': {message}")]
    WebDriver {
        /// W3C error code (e.g. "invalid argument")
        error: String,
        /// Error message
        message: String,
    },

    /// Connection or transport failure
    #[error("HTTP transport failed: {message}")]
    Http {
        /// Error message
        message: String,
    },

    /// Session could not be created
    #[error("Failed to create session: {message}")]
    SessionNotCreated {
        /// Error message
        message: String,
    },

    /// Operation timed out
    #[error("Timed out after {ms}ms waiting for {waited_for}")]
    Timeout {
        /// Timeout in milliseconds
        ms: u64,
        /// Description of what was waited for
        waited_for: String,
    },

    /// Assertion failed
    #[error("Assertion failed: {message}")]
    AssertionFailed {
        /// Error message
        message: String,
    },

    /// Invalid state error (operation called in wrong state)
    #[error("Invalid state: {message}")]
    InvalidState {
        /// Error message
        message: String,
    },

    /// Test page server error
    #[error("Page server error: {message}")]
    PageServer {
        /// Error message
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl InteractionError {
    /// Create an assertion failure
    #[must_use]
    pub fn assertion(message: impl Into<String>) -> Self {
        Self::AssertionFailed {
            message: message.into(),
        }
    }

    /// Create an invalid state error
    #[must_use]
    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidState {
            message: message.into(),
        }
    }

    /// Create a configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Whether this error came from an element lookup that found nothing
    #[must_use]
    pub const fn is_no_such_element(&self) -> bool {
        matches!(self, Self::ElementNotFound { .. })
    }
}

impl From<reqwest::Error> for InteractionError {
    fn from(err: reqwest::Error) -> Self {
        Self::Http {
            message: err.to_string(),
        }
    }
}
