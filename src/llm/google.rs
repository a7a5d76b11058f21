//! Google Gemini adapter
//!
//! Talks to the `generateContent` REST endpoint. Gemini names the
//! assistant role "model" and takes the system prompt as a separate
//! `systemInstruction` block rather than a message.

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::debug;

use crate::llm::provider::LLMAdapter;
use crate::types::{AppError, AppResult, LLMRequest, LLMResponse, TokenUsage};

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

pub struct GoogleAdapter {
    api_key: String,
    api_base: String,
    http: reqwest::Client,
}

impl GoogleAdapter {
    pub fn new(api_key: &str, http: reqwest::Client) -> Self {
        Self {
            api_key: api_key.to_string(),
            api_base: GEMINI_API_BASE.to_string(),
            http,
        }
    }

    /// Override the API base URL (used by tests)
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }
}

#[async_trait]
impl LLMAdapter for GoogleAdapter {
    async fn create_chat_completion(&self, request: &LLMRequest) -> AppResult<LLMResponse> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.api_base, request.model, self.api_key
        );

        let body = build_request_body(request);
        debug!(model = %request.model, "Sending Gemini generateContent request");

        let response = self.http.post(&url).json(&body).send().await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(AppError::LLMApi(format!(
                "Gemini API returned {}: {}",
                status, detail
            )));
        }

        let payload: Value = response.json().await?;
        parse_response(&payload)
    }
}

fn build_request_body(request: &LLMRequest) -> Value {
    let contents: Vec<Value> = request
        .messages
        .iter()
        .map(|m| {
            let role = match m.role.as_str() {
                "assistant" => "model",
                _ => "user",
            };
            json!({
                "role": role,
                "parts": [{ "text": m.content }]
            })
        })
        .collect();

    let mut body = json!({ "contents": contents });

    if let Some(system) = &request.system_instruction {
        body["systemInstruction"] = json!({ "parts": [{ "text": system }] });
    }

    let mut generation_config = serde_json::Map::new();
    if let Some(temperature) = request.temperature {
        generation_config.insert("temperature".to_string(), json!(temperature));
    }
    if let Some(max_tokens) = request.max_tokens {
        generation_config.insert("maxOutputTokens".to_string(), json!(max_tokens));
    }
    if !generation_config.is_empty() {
        body["generationConfig"] = Value::Object(generation_config);
    }

    body
}

fn parse_response(payload: &Value) -> AppResult<LLMResponse> {
    let candidate = payload
        .get("candidates")
        .and_then(|c| c.as_array())
        .and_then(|c| c.first())
        .ok_or_else(|| AppError::LLMApi("Gemini response has no candidates".to_string()))?;

    let content = candidate
        .get("content")
        .and_then(|c| c.get("parts"))
        .and_then(|p| p.as_array())
        .map(|parts| {
            parts
                .iter()
                .filter_map(|p| p.get("text").and_then(|t| t.as_str()))
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_default();

    let finish_reason = candidate
        .get("finishReason")
        .and_then(|f| f.as_str())
        .unwrap_or("STOP")
        .to_string();

    let usage_metadata = payload.get("usageMetadata");
    let usage = TokenUsage {
        prompt_tokens: read_count(usage_metadata, "promptTokenCount"),
        completion_tokens: read_count(usage_metadata, "candidatesTokenCount"),
        total_tokens: read_count(usage_metadata, "totalTokenCount"),
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LLMMessage;

    #[test]
    fn test_build_request_body_maps_roles() {
        let request = LLMRequest {
            provider: "google".to_string(),
            model: "gemini-2.5-flash".to_string(),
            messages: vec![
                LLMMessage::user("hello"),
                LLMMessage::assistant("hi there"),
            ],
            max_tokens: Some(1024),
            temperature: Some(0.3),
            system_instruction: Some("Be brief.".to_string()),
        };

        let body = build_request_body(&request);
        assert_eq!(body["contents"][0]["role"], "user");
        assert_eq!(body["contents"][1]["role"], "model");
        assert_eq!(body["systemInstruction"]["parts"][0]["text"], "Be brief.");
        assert_eq!(body["generationConfig"]["maxOutputTokens"], 1024);
    }

    #[test]
    fn test_parse_response_joins_parts() {
        let payload = serde_json::json!({
            "candidates": [{
                "content": { "parts": [{ "text": "Hello " }, { "text": "world" }] },
                "finishReason": "STOP"
            }],
            "usageMetadata": {
                "promptTokenCount": 12,
                "candidatesTokenCount": 4,
                "totalTokenCount": 16
            }
        });

        let response = parse_response(&payload).unwrap();
        assert_eq!(response.content, "Hello world");
        assert_eq!(response.finish_reason, "STOP");
        assert_eq!(response.usage.total_tokens, 16);
    }

    #[test]
    fn test_parse_response_without_candidates_errors() {
        let payload = serde_json::json!({ "candidates": [] });
        assert!(parse_response(&payload).is_err());
    }

    #[tokio::test]
    async fn test_create_chat_completion_against_mock_server() {
        let mut server = mockito::Server::new_async().await;

        let _mock = server
            .mock(
                "POST",
                mockito::Matcher::Regex(r"^/models/.*:generateContent.*".to_string()),
            )
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"candidates":[{"content":{"parts":[{"text":"ok"}]},"finishReason":"STOP"}]}"#,
            )
            .create_async()
            .await;

        let adapter =
            GoogleAdapter::new("test-key", reqwest::Client::new()).with_api_base(server.url());
        let request = LLMRequest {
            provider: "google".to_string(),
            model: "gemini-2.5-flash".to_string(),
            messages: vec![LLMMessage::user("ping")],
            max_tokens: None,
            temperature: None,
            system_instruction: None,
        };

        let response = adapter.create_chat_completion(&request).await.unwrap();
        assert_eq!(response.content, "ok");
    }
}
