//! Summarizer Agent
//!
//! Condenses raw research text into a fixed 8-section academic summary.
//! The section structure is a prompt contract only; the output is not
//! validated against it.

use async_trait::async_trait;
use tracing::info;

use crate::agents::SummarizerCollaborator;
use crate::config::Config;
use crate::llm::provider::{LLMProviderConfig, LLM};
use crate::types::{AppResult, LLMMessage, LLMRequest};

pub struct SummarizerAgent {
    llm: LLM,
    provider: String,
    model: String,
}

impl SummarizerAgent {
    pub fn from_config(config: &Config, http: reqwest::Client) -> AppResult<Self> {
        let api_key = config.llm.active_api_key().unwrap_or_default();
        let llm = LLM::new(
            LLMProviderConfig {
                name: config.llm.default_provider.clone(),
                api_key,
            },
            http,
        )?;

        Ok(Self {
            llm,
            provider: config.llm.default_provider.clone(),
            model: config.llm.default_model.clone(),
        })
    }

    fn create_summary_prompt(content: &str) -> String {
        format!(
            r#"Act as a professional research summarization agent.

Using the content below, generate a structured academic summary with the following sections:

1. Topic Overview
2. Background Context
3. Key Mechanisms / Core Concepts
4. Use-cases & Applications
5. Advantages
6. Challenges / Limitations
7. Future Scope
8. Conclusion

Content to summarize:
"""{content}"""

Ensure:
- correctness
- detail
- clarity
- technical depth
- no fluff
- no repetition
- no hallucination"#,
        )
    }
}

#[async_trait]
impl SummarizerCollaborator for SummarizerAgent {
    async fn invoke(&self, content: &str) -> AppResult<String> {
        info!(content_len = content.len(), "Starting summarization");

        let prompt = Self::create_summary_prompt(content);

        let request = LLMRequest {
            provider: self.provider.clone(),
            model: self.model.clone(),
            messages: vec![LLMMessage::user(&prompt)],
            max_tokens: Some(2048),
            temperature: Some(0.4),
            system_instruction: None,
        };

        let response = self.llm.create_chat_completion(&request).await?;
        info!(summary_len = response.content.len(), "Summarization complete");

        Ok(response.content)
    }
}
