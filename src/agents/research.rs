//! Research Agent
//!
//! Answers a free-text query from three sources: Wikipedia extracts, a
//! general web search, and arXiv preprints. Individual source failures
//! are tolerated (the brief just gets thinner); the LLM synthesis call is
//! the stage's one hard dependency, and its error propagates so the
//! pipeline can apply the query-text fallback.

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::agents::{ResearchCollaborator, ResearchOutput};
use crate::config::Config;
use crate::llm::provider::{LLMProviderConfig, LLM};
use crate::search::{ArxivClient, ArxivEntry, WebResult, WebSearchClient, WikiPage, WikipediaClient};
use crate::types::{AppResult, LLMMessage, LLMRequest};

/// Everything the source lookups produced for one query
#[derive(Debug, Default)]
struct SourceDigest {
    wiki: Vec<WikiPage>,
    web: Vec<WebResult>,
    arxiv: Vec<ArxivEntry>,
}

impl SourceDigest {
    fn is_empty(&self) -> bool {
        self.wiki.is_empty() && self.web.is_empty() && self.arxiv.is_empty()
    }
}

pub struct ResearchAgent {
    llm: LLM,
    provider: String,
    model: String,
    wikipedia: WikipediaClient,
    arxiv: ArxivClient,
    web: Option<WebSearchClient>,
}

impl ResearchAgent {
    pub fn from_config(config: &Config, http: reqwest::Client) -> AppResult<Self> {
        let api_key = config.llm.active_api_key().unwrap_or_default();
        let llm = LLM::new(
            LLMProviderConfig {
                name: config.llm.default_provider.clone(),
                api_key,
            },
            http.clone(),
        )?;

        let web = WebSearchClient::from_config(&config.search);
        if web.is_none() {
            warn!("No SerpAPI key configured, web search tool disabled");
        }

        Ok(Self {
            llm,
            provider: config.llm.default_provider.clone(),
            model: config.llm.default_model.clone(),
            wikipedia: WikipediaClient::new(http.clone())
                .with_max_results(config.search.wiki_max_results),
            arxiv: ArxivClient::new(http).with_max_results(config.search.arxiv_max_results),
            web,
        })
    }

    /// Run all enabled lookups. Each one may fail on its own; a failed
    /// lookup contributes nothing to the digest.
    async fn gather_sources(&self, query: &str) -> SourceDigest {
        let wiki_fut = self.wikipedia.search(query);
        let arxiv_fut = self.arxiv.search(query);
        let web_fut = async {
            match &self.web {
                Some(client) => Some(client.search(query).await),
                None => None,
            }
        };

        let (wiki_res, arxiv_res, web_res) = futures::join!(wiki_fut, arxiv_fut, web_fut);

        let mut digest = SourceDigest::default();

        match wiki_res {
            Ok(pages) => digest.wiki = pages,
            Err(e) => warn!(error = %e, "Wikipedia lookup failed"),
        }

        match arxiv_res {
            Ok(entries) => digest.arxiv = entries,
            Err(e) => warn!(error = %e, "arXiv lookup failed"),
        }

        match web_res {
            Some(Ok(results)) => digest.web = results,
            Some(Err(e)) => warn!(error = %e, "Web lookup failed"),
            None => debug!("Web search disabled, skipping"),
        }

        digest
    }
}

#[async_trait]
impl ResearchCollaborator for ResearchAgent {
    async fn invoke(&self, query: &str) -> AppResult<ResearchOutput> {
        info!(query = %query, provider = %self.llm.provider_name(), "Starting research");

        let digest = self.gather_sources(query).await;
        info!(
            wiki_count = digest.wiki.len(),
            web_count = digest.web.len(),
            arxiv_count = digest.arxiv.len(),
            "Source gathering complete"
        );

        let prompt = create_research_prompt(query, &digest);

        let request = LLMRequest {
            provider: self.provider.clone(),
            model: self.model.clone(),
            messages: vec![LLMMessage::user(&prompt)],
            max_tokens: Some(2048),
            temperature: Some(0.3),
            system_instruction: Some(
                "You are a research agent that consolidates encyclopedia, web, and academic-paper findings into a factual brief. Stay grounded in the provided material.".to_string(),
            ),
        };

        let response = self.llm.create_chat_completion(&request).await?;
        info!(response_len = response.content.len(), "Research synthesis complete");

        let text = response.content.trim().to_string();
        Ok(ResearchOutput {
            output: (!text.is_empty()).then_some(text),
        })
    }
}

/// Build the synthesis prompt from whatever the lookups produced
fn create_research_prompt(query: &str, digest: &SourceDigest) -> String {
    let mut sources = String::new();

    if !digest.wiki.is_empty() {
        sources.push_str("WIKIPEDIA EXTRACTS:\n");
        for page in &digest.wiki {
            sources.push_str(&format!("- {}: {}\n", page.title, page.extract));
        }
        sources.push('\n');
    }

    if !digest.web.is_empty() {
        sources.push_str("WEB RESULTS:\n");
        for result in &digest.web {
            sources.push_str(&format!("- {} ({}): {}\n", result.title, result.link, result.snippet));
        }
        sources.push('\n');
    }

    if !digest.arxiv.is_empty() {
        sources.push_str("ARXIV PAPERS:\n");
        for entry in &digest.arxiv {
            sources.push_str(&format!("- {}: {}\n", entry.title, entry.summary));
        }
        sources.push('\n');
    }

    if digest.is_empty() {
        sources.push_str("(No source material was retrieved. Answer from your own knowledge and say so.)\n\n");
    }

    let arxiv_instruction = if digest.arxiv.is_empty() {
        ""
    } else {
        "\n- End with a section that starts with the line \"Arxiv:\" listing the papers above, one per line"
    };

    format!(
        r#"Research the following question and write a consolidated brief.

QUESTION:
{query}

SOURCE MATERIAL:
{sources}
Requirements:
- Lead with the key facts that answer the question
- Attribute claims to their sources where possible
- Note disagreements between sources instead of papering over them{arxiv_instruction}"#,
    )
}

/// Keep the first 5 non-empty, whitespace-trimmed lines, in order.
pub fn trim_arxiv_output(raw_text: &str) -> String {
    let mut papers = Vec::new();
    for ln in raw_text.split('\n') {
        let trimmed = ln.trim();
        if !trimmed.is_empty() {
            papers.push(trimmed);
        }
        if papers.len() >= 5 {
            break;
        }
    }
    papers.join("\n")
}
