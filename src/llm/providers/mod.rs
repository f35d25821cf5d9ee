//! LLM provider implementations

pub mod openai;

use crate::llm::{
    config::LlmConfig,
    error::LlmResult,
    types::{LlmRequest, LlmResponse},
};
use async_trait::async_trait;

/// Chat-completion backend
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Sends one completion request
    async fn complete(&self, request: &LlmRequest) -> LlmResult<LlmResponse>;

    /// Provider name
    fn name(&self) -> &str;
}

/// Builds the provider described by `config`
pub fn create_provider(config: &LlmConfig) -> LlmResult<Box<dyn LlmProvider>> {
    Ok(Box::new(openai::OpenAIProvider::new(config.clone())?))
}
