//! LLM error types

use thiserror::Error;

/// Errors raised by the language-model client
#[derive(Error, Debug)]
pub enum LlmError {
    /// The provider answered with an error
    #[error("API error: {0}")]
    ApiError(String),

    /// The request could not be built
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Provider kind not supported
    #[error("Unsupported provider: {0}")]
    UnsupportedProvider(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// JSON parse error
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// LLM result type
pub type LlmResult<T> = Result<T, LlmError>;
