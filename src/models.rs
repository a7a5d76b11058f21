use std::sync::Arc;

use crate::agents::{ResearchCollaborator, SummarizerCollaborator};
use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub researcher: Arc<dyn ResearchCollaborator>,
    pub summarizer: Arc<dyn SummarizerCollaborator>,
}

// API Request/Response types

#[derive(Debug, serde::Deserialize)]
pub struct RunRequest {
    pub query: String,
}

/// Research stage block of the pipeline response.
///
/// `arxiv` is only populated when the research text mentions arXiv.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ResearchBlock {
    pub wiki_web: String,
    pub arxiv: Option<String>,
}

/// Full pipeline response. Each block is null when its stage produced
/// nothing; the endpoint itself always answers 200 for research failures.
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct RunResponse {
    pub research: Option<ResearchBlock>,
    pub summary: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, serde::Serialize)]
pub struct HomeResponse {
    pub message: String,
}

#[derive(Debug, serde::Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}
