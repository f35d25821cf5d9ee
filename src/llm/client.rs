//! LLM client

use crate::llm::{
    config::LlmConfig,
    error::LlmResult,
    providers::{create_provider, LlmProvider},
    types::{LlmRequest, LlmResponse, Message},
};

/// LLM client bound to one provider for the lifetime of a run
pub struct LlmClient {
    provider: Box<dyn LlmProvider>,
    config: LlmConfig,
}

impl LlmClient {
    /// Creates a client for the provider described by `config`
    pub fn new(config: LlmConfig) -> LlmResult<Self> {
        config.validate()?;
        let provider = create_provider(&config)?;
        Ok(Self { provider, config })
    }

    /// Creates a client around an already-built provider
    pub fn with_provider(provider: Box<dyn LlmProvider>, config: LlmConfig) -> Self {
        Self { provider, config }
    }

    /// Sends a completion request, filling unset options from the config
    pub async fn complete(&self, request: LlmRequest) -> LlmResult<LlmResponse> {
        let request = LlmRequest {
            model: request.model.or_else(|| Some(self.config.default_model.clone())),
            temperature: request.temperature.or(Some(self.config.default_temperature)),
            max_tokens: request.max_tokens.or(Some(self.config.default_max_tokens)),
            ..request
        };
        self.provider.complete(&request).await
    }

    /// Single user message in, reply text out
    pub async fn complete_text(&self, prompt: impl Into<String>) -> LlmResult<String> {
        let request = LlmRequest::new(vec![Message::user(prompt)]);
        let response = self.complete(request).await?;
        Ok(response.content)
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }
}
