//! Agent System
//!
//! This module contains the agents behind the report pipeline:
//!
//! - **Research Agent**: answers the query from Wikipedia, web, and arXiv sources
//! - **Summarizer Agent**: condenses raw research into a structured academic summary
//! - **Email Agent**: formats the summary as a ready-to-send letter
//!
//! ## Pipeline Overview
//!
//! ```text
//! User Query
//!      │
//!      ▼
//! ┌─────────────┐
//! │  Research   │  → Gathers sources, synthesizes a brief
//! │   Agent     │    (failure falls back to the raw query)
//! └─────────────┘
//!      │
//!      ▼
//! ┌─────────────┐
//! │ Summarizer  │  → 8-section structured summary
//! │   Agent     │
//! └─────────────┘
//!      │
//!      ▼
//! ┌─────────────┐
//! │   Email     │  → Letter with derived subject line
//! │   Agent     │
//! └─────────────┘
//!      │
//!      ▼
//!  Response Payload
//! ```

pub mod email;
pub mod research;
pub mod summarizer;

// Re-export main components
pub use email::EmailAgent;
pub use research::{trim_arxiv_output, ResearchAgent};
pub use summarizer::SummarizerAgent;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::models::{ResearchBlock, RunResponse};
use crate::types::AppResult;

/// Raw result of the research stage.
#[derive(Debug, Clone, Default)]
pub struct ResearchOutput {
    /// Synthesized research text; `None` when the collaborator produced
    /// nothing usable.
    pub output: Option<String>,
}

/// Research stage seam. May fail with any error; the pipeline recovers.
#[async_trait]
pub trait ResearchCollaborator: Send + Sync {
    async fn invoke(&self, query: &str) -> AppResult<ResearchOutput>;
}

/// Summary stage seam. Errors here are NOT recovered.
#[async_trait]
pub trait SummarizerCollaborator: Send + Sync {
    async fn invoke(&self, content: &str) -> AppResult<String>;
}

/// Execute the full report pipeline for a user query.
///
/// The research stage is the only one with a recovery path: any error from
/// the collaborator is swallowed and the raw query stands in for the
/// research text, so the caller always gets a 200 with best-effort content.
/// A summarizer error propagates.
pub async fn run_pipeline(
    query: &str,
    researcher: &dyn ResearchCollaborator,
    summarizer: &dyn SummarizerCollaborator,
) -> AppResult<RunResponse> {
    info!(query_len = query.len(), "Starting report pipeline");

    // Step 1: research
    let (raw_output, research_block) = match researcher.invoke(query).await {
        Ok(result) => {
            let raw = result.output.unwrap_or_else(|| query.to_string());
            let arxiv = if raw.to_lowercase().contains("arxiv") {
                Some(trim_arxiv_output(&raw))
            } else {
                None
            };
            let block = ResearchBlock {
                wiki_web: raw.clone(),
                arxiv,
            };
            (raw, block)
        }
        Err(e) => {
            warn!(error = %e, "Research stage failed, falling back to the raw query");
            (
                query.to_string(),
                ResearchBlock {
                    wiki_web: query.to_string(),
                    arxiv: None,
                },
            )
        }
    };

    // Step 2: summary
    let summary = summarizer.invoke(&raw_output).await?;
    info!(summary_len = summary.len(), "Summary stage complete");

    // Step 3: email
    let email = EmailAgent::format(&summary);

    info!("Report pipeline complete");

    // Empty strings serialize as null, mirroring the endpoint contract
    Ok(RunResponse {
        research: Some(research_block),
        summary: (!summary.is_empty()).then_some(summary),
        email: (!email.is_empty()).then_some(email),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AppError;

    struct StaticResearcher {
        output: Option<String>,
    }

    #[async_trait]
    impl ResearchCollaborator for StaticResearcher {
        async fn invoke(&self, _query: &str) -> AppResult<ResearchOutput> {
            Ok(ResearchOutput {
                output: self.output.clone(),
            })
        }
    }

    struct FailingResearcher;

    #[async_trait]
    impl ResearchCollaborator for FailingResearcher {
        async fn invoke(&self, _query: &str) -> AppResult<ResearchOutput> {
            Err(AppError::LLMApi("quota exceeded".to_string()))
        }
    }

    struct StaticSummarizer {
        summary: String,
    }

    #[async_trait]
    impl SummarizerCollaborator for StaticSummarizer {
        async fn invoke(&self, _content: &str) -> AppResult<String> {
            Ok(self.summary.clone())
        }
    }

    struct FailingSummarizer;

    #[async_trait]
    impl SummarizerCollaborator for FailingSummarizer {
        async fn invoke(&self, _content: &str) -> AppResult<String> {
            Err(AppError::LLMApi("model overloaded".to_string()))
        }
    }

    #[tokio::test]
    async fn test_research_failure_falls_back_to_query() {
        let response = run_pipeline(
            "quantum computing",
            &FailingResearcher,
            &StaticSummarizer {
                summary: "A summary.".to_string(),
            },
        )
        .await
        .unwrap();

        let research = response.research.unwrap();
        assert_eq!(research.wiki_web, "quantum computing");
        assert_eq!(research.arxiv, None);
        assert_eq!(response.summary.as_deref(), Some("A summary."));
        assert!(response.email.is_some());
    }

    #[tokio::test]
    async fn test_arxiv_mention_triggers_trim() {
        let raw = "Arxiv: paper1\npaper2\n\n\npaper3\npaper4\npaper5\npaper6";
        let response = run_pipeline(
            "quantum computing",
            &StaticResearcher {
                output: Some(raw.to_string()),
            },
            &StaticSummarizer {
                summary: "A summary.".to_string(),
            },
        )
        .await
        .unwrap();

        let research = response.research.unwrap();
        assert_eq!(research.wiki_web, raw);
        assert_eq!(
            research.arxiv.as_deref(),
            Some("Arxiv: paper1\npaper2\npaper3\npaper4\npaper5")
        );
    }

    #[tokio::test]
    async fn test_no_arxiv_mention_leaves_arxiv_absent() {
        let response = run_pipeline(
            "quantum computing",
            &StaticResearcher {
                output: Some("plain web result".to_string()),
            },
            &StaticSummarizer {
                summary: "A summary.".to_string(),
            },
        )
        .await
        .unwrap();

        let research = response.research.unwrap();
        assert_eq!(research.wiki_web, "plain web result");
        assert_eq!(research.arxiv, None);
    }

    #[tokio::test]
    async fn test_unusable_research_output_substitutes_query() {
        let response = run_pipeline(
            "protein folding",
            &StaticResearcher { output: None },
            &StaticSummarizer {
                summary: "A summary.".to_string(),
            },
        )
        .await
        .unwrap();

        assert_eq!(response.research.unwrap().wiki_web, "protein folding");
    }

    #[tokio::test]
    async fn test_empty_summary_serializes_as_null() {
        let response = run_pipeline(
            "quantum computing",
            &StaticResearcher {
                output: Some("plain web result".to_string()),
            },
            &StaticSummarizer {
                summary: String::new(),
            },
        )
        .await
        .unwrap();

        // Empty success is indistinguishable from failure at the payload
        // level; the email is still built from the empty summary.
        assert_eq!(response.summary, None);
        assert!(response.email.is_some());
    }

    #[tokio::test]
    async fn test_summarizer_failure_propagates() {
        let result = run_pipeline(
            "quantum computing",
            &StaticResearcher {
                output: Some("plain web result".to_string()),
            },
            &FailingSummarizer,
        )
        .await;

        assert!(result.is_err());
    }
}
