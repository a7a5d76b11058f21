//! arXiv Client
//!
//! Queries the arXiv export API (`/api/query`) and extracts entries from
//! the Atom feed. The feed is well-formed enough that targeted regex
//! extraction of `<entry>` blocks is sufficient; we only need titles,
//! abstracts, and links.

use regex::Regex;
use tracing::{debug, info};

use super::SearchError;

const ARXIV_API_BASE: &str = "https://export.arxiv.org";

/// One preprint from the arXiv Atom feed
#[derive(Debug, Clone)]
pub struct ArxivEntry {
    pub title: String,
    pub summary: String,
    pub link: String,
}

pub struct ArxivClient {
    http: reqwest::Client,
    base_url: String,
    max_results: usize,
}

impl ArxivClient {
    pub fn new(http: reqwest::Client) -> Self {
        Self {
            http,
            base_url: ARXIV_API_BASE.to_string(),
            max_results: 5,
        }
    }

    /// Override the API base URL (used by tests)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set maximum entries fetched per search
    pub fn with_max_results(mut self, max: usize) -> Self {
        self.max_results = max;
        self
    }

    /// Search arXiv preprints matching the query
    pub async fn search(&self, query: &str) -> Result<Vec<ArxivEntry>, SearchError> {
        info!(query = %query, "Searching arXiv");

        let url = format!(
            "{}/api/query?search_query=all:{}&start=0&max_results={}",
            self.base_url,
            urlencoding::encode(query),
            self.max_results,
        );

        let body = self
            .http
            .get(&url)
            .send()
            .await?
            .error_for_status()
            .map_err(|e| SearchError::RequestFailed(e.to_string()))?
            .text()
            .await?;

        debug!(bytes = body.len(), "Raw arXiv feed received");

        let entries = parse_atom_entries(&body, self.max_results)?;
        if entries.is_empty() {
            return Err(SearchError::NoResults);
        }

        info!(count = entries.len(), "arXiv search completed");
        Ok(entries)
    }
}

/// Extract entries from an arXiv Atom feed
fn parse_atom_entries(feed: &str, max: usize) -> Result<Vec<ArxivEntry>, SearchError> {
    let entry_re = Regex::new(r"(?s)<entry>(.*?)</entry>")
        .map_err(|e| SearchError::ParseError(e.to_string()))?;
    let title_re = Regex::new(r"(?s)<title>(.*?)</title>")
        .map_err(|e| SearchError::ParseError(e.to_string()))?;
    let summary_re = Regex::new(r"(?s)<summary>(.*?)</summary>")
        .map_err(|e| SearchError::ParseError(e.to_string()))?;
    let id_re =
        Regex::new(r"(?s)<id>(.*?)</id>").map_err(|e| SearchError::ParseError(e.to_string()))?;

    let mut entries = Vec::new();
    for cap in entry_re.captures_iter(feed).take(max) {
        let block = &cap[1];

        let title = title_re
            .captures(block)
            .map(|c| collapse_whitespace(&unescape_xml(&c[1])))
            .unwrap_or_else(|| "Untitled".to_string());

        let summary = summary_re
            .captures(block)
            .map(|c| collapse_whitespace(&unescape_xml(&c[1])))
            .unwrap_or_default();

        let link = id_re
            .captures(block)
            .map(|c| c[1].trim().to_string())
            .unwrap_or_default();

        entries.push(ArxivEntry {
            title,
            summary,
            link,
        });
    }

    Ok(entries)
}

/// Decode the named entities the export feed actually uses
fn unescape_xml(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
