//! Error types for the Nordpuls application.

use thiserror::Error;

/// The main error type for Nordpuls.
#[derive(Error, Debug)]
pub enum Error {
    /// IO errors (file operations, terminal, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Transport-level HTTP failures (DNS, refused connection, timeout).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-2xx status.
    #[error("API error: {status} {status_text}")]
    Request { status: u16, status_text: String },

    /// Response body did not match the expected shape.
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic application error
    #[error("{0}")]
    Application(String),
}

/// Alias for Result with our Error type.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a new request error from an HTTP status.
    pub fn request(status: u16, status_text: impl Into<String>) -> Self {
        Self::Request {
            status,
            status_text: status_text.into(),
        }
    }

    /// Create a new config error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new application error.
    pub fn application(msg: impl Into<String>) -> Self {
        Self::Application(msg.into())
    }

    /// True when the API could not be reached or refused the request.
    ///
    /// Views render these as the generic connectivity banner.
    pub fn is_connectivity(&self) -> bool {
        matches!(self, Self::Http(_) | Self::Request { .. })
    }

    /// Check if this error is recoverable (the next poll may succeed).
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Http(_) => true,
            Self::Request { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}
