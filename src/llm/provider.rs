use async_trait::async_trait;

use crate::types::{AppError, AppResult, LLMRequest, LLMResponse};

#[async_trait]
pub trait LLMAdapter: Send + Sync {
    async fn create_chat_completion(&self, request: &LLMRequest) -> AppResult<LLMResponse>;
}

/// Configuration for an LLM provider
pub struct LLMProviderConfig {
    pub name: String,
    pub api_key: String,
}

pub struct LLM {
    adapter: Box<dyn LLMAdapter>,
    provider_name: String,
}

impl LLM {
    /// Build the adapter for the named provider. Unknown names are a
    /// configuration error, caught at startup rather than per request.
    pub fn new(provider: LLMProviderConfig, http: reqwest::Client) -> AppResult<Self> {
        let adapter: Box<dyn LLMAdapter> = match provider.name.as_str() {
            "google" => Box::new(crate::llm::google::GoogleAdapter::new(
                &provider.api_key,
                http,
            )),
            "openai" => Box::new(crate::llm::openai::OpenAIAdapter::new(
                &provider.api_key,
                http,
            )),
            "openrouter" => Box::new(crate::llm::openrouter::OpenRouterAdapter::new(
                &provider.api_key,
                http,
            )),
            _ => {
                return Err(AppError::Config(format!(
                    "Unsupported provider: {}",
                    provider.name
                )))
            }
        };

        Ok(Self {
            adapter,
            provider_name: provider.name,
        })
    }

    pub fn provider_name(&self) -> &str {
        &self.provider_name
    }

    pub async fn create_chat_completion(&self, request: &LLMRequest) -> AppResult<LLMResponse> {
        self.adapter.create_chat_completion(request).await
    }
}
