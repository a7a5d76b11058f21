//! Search Module
//!
//! Lookup tools used by the research agent:
//! - Wikipedia (MediaWiki search + plain-text extracts)
//! - Web (general web search via SerpAPI's google_light engine)
//! - arXiv (export API Atom feed)
//!
//! Each tool can fail independently; the research agent decides how to
//! degrade when one does.

pub mod arxiv;
pub mod web;
pub mod wikipedia;

pub use arxiv::{ArxivClient, ArxivEntry};
pub use web::{WebResult, WebSearchClient};
pub use wikipedia::{WikiPage, WikipediaClient};

use thiserror::Error;

/// Errors that can occur during search operations
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Search request failed: {0}")]
    RequestFailed(String),

    #[error("Failed to parse search results: {0}")]
    ParseError(String),

    #[error("No results found for query")]
    NoResults,
}

impl From<reqwest::Error> for SearchError {
    fn from(err: reqwest::Error) -> Self {
        SearchError::RequestFailed(err.to_string())
    }
}
