//! OpenAI-compatible adapter
//!
//! Speaks the `/chat/completions` wire format, which OpenAI and a number
//! of compatible gateways share. The API base is overridable so other
//! adapters can delegate here.

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::debug;

use crate::llm::provider::LLMAdapter;
use crate::types::{AppError, AppResult, LLMRequest, LLMResponse, TokenUsage};

const OPENAI_API_BASE: &str = "https://api.openai.com/v1";

pub struct OpenAIAdapter {
    api_key: String,
    api_base: String,
    http: reqwest::Client,
}

impl OpenAIAdapter {
    pub fn new(api_key: &str, http: reqwest::Client) -> Self {
        Self::new_with_api_base(api_key, OPENAI_API_BASE, http)
    }

    pub fn new_with_api_base(api_key: &str, api_base: &str, http: reqwest::Client) -> Self {
        Self {
            api_key: api_key.to_string(),
            api_base: api_base.to_string(),
            http,
        }
    }
}

#[async_trait]
impl LLMAdapter for OpenAIAdapter {
    async fn create_chat_completion(&self, request: &LLMRequest) -> AppResult<LLMResponse> {
        let url = format!("{}/chat/completions", self.api_base);

        let body = build_request_body(request);
        debug!(model = %request.model, "Sending chat completion request");

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(AppError::LLMApi(format!(
                "Chat completion API returned {}: {}",
                status, detail
            )));
        }

        let payload: Value = response.json().await?;
        parse_response(&payload)
    }
}

fn build_request_body(request: &LLMRequest) -> Value {
    // The system prompt rides as the leading message in this format
    let mut messages: Vec<Value> = Vec::new();
    if let Some(system) = &request.system_instruction {
        messages.push(json!({ "role": "system", "content": system }));
    }
    for m in &request.messages {
        messages.push(json!({ "role": m.role, "content": m.content }));
    }

    let mut body = json!({
        "model": request.model,
        "messages": messages,
    });

    if let Some(max_tokens) = request.max_tokens {
        body["max_tokens"] = json!(max_tokens);
    }
    if let Some(temperature) = request.temperature {
        body["temperature"] = json!(temperature);
    }

    body
}

fn parse_response(payload: &Value) -> AppResult<LLMResponse> {
    let choice = payload
        .get("choices")
        .and_then(|c| c.as_array())
        .and_then(|c| c.first())
        .ok_or_else(|| AppError::LLMApi("Chat completion response has no choices".to_string()))?;

    let content = choice
        .get("message")
        .and_then(|m| m.get("content"))
        .and_then(|c| c.as_str())
        .unwrap_or_default()
        .to_string();

    let finish_reason = choice
        .get("finish_reason")
        .and_then(|f| f.as_str())
        .unwrap_or("stop")
        .to_string();

    let usage_value = payload.get("usage");
    let usage = TokenUsage {
        prompt_tokens: read_count(usage_value, "prompt_tokens"),
        completion_tokens: read_count(usage_value, "completion_tokens"),
        total_tokens: read_count(usage_value, "total_tokens"),
    };

    Ok(LLMResponse {
        content,
        finish_reason,
        usage,
    })
}

fn read_count(usage: Option<&Value>, field: &str) -> u32 {
    usage
        .and_then(|u| u.get(field))
        .and_then(|v| v.as_u64())
        .unwrap_or(0) as u32
}
