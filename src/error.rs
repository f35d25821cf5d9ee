//! Error types for the editorial planner.
//!
//! Only run-aborting conditions live here. External calls that fail degrade to
//! [`crate::types::Fetched::Degraded`] instead of producing an [`Error`].

use thiserror::Error;

/// Result type alias for planner operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that stop a run before or while it executes
#[derive(Debug, Error)]
pub enum Error {
    /// A required form field is blank
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// More competitor URLs than the form allows
    #[error("Too many competitors: {given} given, at most {max} allowed")]
    TooManyCompetitors { given: usize, max: usize },

    /// One or more API keys were not supplied
    #[error("API keys not configured: {}", .0.join(", "))]
    MissingCredentials(Vec<&'static str>),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Language-model client could not be set up
    #[error("LLM error: {0}")]
    Llm(#[from] crate::llm::LlmError),

    /// Spreadsheet serialization error
    #[error("Export error: {0}")]
    Export(#[from] rust_xlsxwriter::XlsxError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Whether the error was raised before any outbound call was made
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Error::MissingField(_) | Error::TooManyCompetitors { .. } | Error::MissingCredentials(_)
        )
    }
}

impl From<config::ConfigError> for Error {
    fn from(err: config::ConfigError) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Config(format!("HTTP client setup failed: {}", err))
    }
}
