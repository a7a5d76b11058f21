//! Web Search Client
//!
//! General web search through SerpAPI's `google_light` engine: a fast,
//! lightweight search used to give the research agent current-web context
//! alongside Wikipedia and arXiv. Only constructed when a SerpAPI key is
//! configured.

use serpapi_search_rust::serp_api_search::SerpApiSearch;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use tracing::{debug, info};

use super::SearchError;

/// Result from a web search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebResult {
    /// Title of the result
    pub title: String,
    /// Snippet/description
    pub snippet: String,
    /// URL link
    pub link: String,
    /// Source domain
    pub source: Option<String>,
}

pub struct WebSearchClient {
    api_key: String,
    max_results: usize,
}

impl WebSearchClient {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            max_results: 5,
        }
    }

    /// Configure client from config; `None` when no key is set
    pub fn from_config(config: &crate::config::SearchConfig) -> Option<Self> {
        if config.serpapi_key.is_empty() {
            return None;
        }

        Some(Self {
            api_key: config.serpapi_key.clone(),
            max_results: config.web_max_results,
        })
    }

    /// Set maximum results per search
    pub fn with_max_results(mut self, max: usize) -> Self {
        self.max_results = max;
        self
    }

    /// Search the web for quick general results
    pub async fn search(&self, query: &str) -> Result<Vec<WebResult>, SearchError> {
        info!(query = %query, "Searching the web via SerpAPI");

        let mut params = HashMap::<String, String>::new();
        params.insert("engine".to_string(), "google_light".to_string());
        params.insert("q".to_string(), query.to_string());
        params.insert("hl".to_string(), "en".to_string());
        params.insert("gl".to_string(), "us".to_string());
        params.insert("num".to_string(), self.max_results.to_string());

        let search = SerpApiSearch::google(params, self.api_key.clone());

        let results = search
            .json()
            .await
            .map_err(|e| SearchError::RequestFailed(e.to_string()))?;

        debug!("Raw web search response received");

        parse_organic_results(&results, self.max_results)
    }
}

/// Walk SerpAPI's `organic_results` array into `WebResult`s
fn parse_organic_results(results: &Value, max: usize) -> Result<Vec<WebResult>, SearchError> {
    let organic_results = results
        .get("organic_results")
        .ok_or(SearchError::NoResults)?;

    let results_array = organic_results
        .as_array()
        .ok_or_else(|| SearchError::ParseError("Expected array of results".to_string()))?;

    if results_array.is_empty() {
        return Err(SearchError::NoResults);
    }

    let mut web_results = Vec::new();
    for result in results_array.iter().take(max) {
        let title = result
            .get("title")
            .and_then(|v| v.as_str())
            .unwrap_or("Untitled")
            .to_string();

        let snippet = result
            .get("snippet")
            .and_then(|v| v.as_str())
            .unwrap_or("")
            .to_string();

        let link = result
            .get("link")
            .and_then(|v| v.as_str())
            .unwrap_or("")
            .to_string();

        let source = result
            .get("source")
            .and_then(|v| v.as_str())
            .map(String::from)
            .or_else(|| {
                // Extract domain from link
                link.split('/').nth(2).map(String::from)
            });

        web_results.push(WebResult {
            title,
            snippet,
            link,
            source,
        });
    }

    Ok(web_results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_organic_results() {
        let raw = json!({
            "organic_results": [
                {
                    "title": "Quantum computing - Overview",
                    "snippet": "Quantum computers use qubits.",
                    "link": "https://example.com/quantum",
                    "source": "example.com"
                },
                {
                    "title": "Intro to qubits",
                    "snippet": "A qubit is a two-state system.",
                    "link": "https://physics.example.org/qubits"
                }
            ]
        });

        let results = parse_organic_results(&raw, 5).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].source.as_deref(), Some("example.com"));
        // Domain fallback when SerpAPI omits the source field
        assert_eq!(results[1].source.as_deref(), Some("physics.example.org"));
    }

    #[test]
    fn test_parse_organic_results_empty() {
        let raw = json!({ "organic_results": [] });
        assert!(matches!(
            parse_organic_results(&raw, 5),
            Err(SearchError::NoResults)
        ));
    }

    #[test]
    fn test_from_config_requires_key() {
        let config = crate::config::SearchConfig {
            serpapi_key: String::new(),
            wiki_max_results: 3,
            arxiv_max_results: 5,
            web_max_results: 5,
            http_timeout_secs: 30,
        };
        assert!(WebSearchClient::from_config(&config).is_none());
    }
}
