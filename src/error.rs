// src/error.rs

//! Unified error handling for the catalog explorer.

use reqwest::StatusCode;
use thiserror::Error;

/// Result type alias for explorer operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// HTTP transport failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Upstream returned a non-success status
    #[error("Unexpected status {status} from {url}")]
    Status { status: StatusCode, url: String },

    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Page number outside the valid range
    #[error("Page {requested} out of range 1..={total_pages}")]
    InvalidPage { requested: usize, total_pages: usize },

    /// Search invoked with a blank term
    #[error("Search term is empty")]
    EmptyQuery,

    /// Unknown category name
    #[error("Unknown category: {0}")]
    UnknownCategory(String),
}

impl AppError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a non-success status error.
    pub fn status(status: StatusCode, url: impl Into<String>) -> Self {
        Self::Status {
            status,
            url: url.into(),
        }
    }

    /// True for failures of the network layer (transport or upstream status).
    ///
    /// These leave the affected category unloaded and are reported per
    /// category instead of aborting a fan-out load.
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Http(_) | Self::Status { .. })
    }
}
