//! Wikipedia Client
//!
//! Queries the MediaWiki API in two steps:
//! 1. `list=search` to find the best-matching page titles
//! 2. `prop=extracts` to pull plain-text intro extracts for those titles
//!
//! Extracts are requested with `explaintext`, so no HTML stripping is
//! needed on our side.

use serde_json::Value;
use tracing::{debug, info};

use super::SearchError;

const WIKIPEDIA_API_BASE: &str = "https://en.wikipedia.org";

/// A Wikipedia page with its plain-text intro extract
#[derive(Debug, Clone)]
pub struct WikiPage {
    pub title: String,
    pub extract: String,
}

pub struct WikipediaClient {
    http: reqwest::Client,
    base_url: String,
    max_results: usize,
}

impl WikipediaClient {
    pub fn new(http: reqwest::Client) -> Self {
        Self {
            http,
            base_url: WIKIPEDIA_API_BASE.to_string(),
            max_results: 3,
        }
    }

    /// Override the API base URL (used by tests)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set maximum pages fetched per search
    pub fn with_max_results(mut self, max: usize) -> Self {
        self.max_results = max;
        self
    }

    /// Search Wikipedia and return intro extracts for the top matches
    pub async fn search(&self, query: &str) -> Result<Vec<WikiPage>, SearchError> {
        info!(query = %query, "Searching Wikipedia");

        let titles = self.search_titles(query).await?;
        if titles.is_empty() {
            return Err(SearchError::NoResults);
        }

        let pages = self.fetch_extracts(&titles).await?;
        info!(count = pages.len(), "Wikipedia search completed");
        Ok(pages)
    }

    async fn search_titles(&self, query: &str) -> Result<Vec<String>, SearchError> {
        let url = format!("{}/w/api.php", self.base_url);
        let limit = self.max_results.to_string();
        let params = [
            ("action", "query"),
            ("list", "search"),
            ("srsearch", query),
            ("srlimit", limit.as_str()),
            ("format", "json"),
        ];

        let body: Value = self
            .http
            .get(&url)
            .query(&params)
            .send()
            .await?
            .error_for_status()
            .map_err(|e| SearchError::RequestFailed(e.to_string()))?
            .json()
            .await?;

        debug!("Raw Wikipedia search response received");

        let results = body
            .get("query")
            .and_then(|q| q.get("search"))
            .and_then(|s| s.as_array())
            .ok_or_else(|| SearchError::ParseError("Expected query.search array".to_string()))?;

        Ok(results
            .iter()
            .filter_map(|r| r.get("title").and_then(|t| t.as_str()))
            .map(String::from)
            .collect())
    }

    async fn fetch_extracts(&self, titles: &[String]) -> Result<Vec<WikiPage>, SearchError> {
        let url = format!("{}/w/api.php", self.base_url);
        let joined = titles.join("|");
        let params = [
            ("action", "query"),
            ("prop", "extracts"),
            ("exintro", "1"),
            ("explaintext", "1"),
            ("titles", joined.as_str()),
            ("format", "json"),
        ];

        let body: Value = self
            .http
            .get(&url)
            .query(&params)
            .send()
            .await?
            .error_for_status()
            .map_err(|e| SearchError::RequestFailed(e.to_string()))?
            .json()
            .await?;

        let pages = body
            .get("query")
            .and_then(|q| q.get("pages"))
            .and_then(|p| p.as_object())
            .ok_or_else(|| SearchError::ParseError("Expected query.pages object".to_string()))?;

        let mut wiki_pages = Vec::new();
        for page in pages.values() {
            let title = page
                .get("title")
                .and_then(|t| t.as_str())
                .unwrap_or("Untitled")
                .to_string();

            // Pages without an extract (redirects, missing pages) are skipped
            let extract = match page.get("extract").and_then(|e| e.as_str()) {
                Some(text) if !text.trim().is_empty() => text.trim().to_string(),
                _ => continue,
            };

            wiki_pages.push(WikiPage { title, extract });
        }

        if wiki_pages.is_empty() {
            return Err(SearchError::NoResults);
        }

        Ok(wiki_pages)
    }
}
